//! Adaptive modifiers and their per-tier targets.

use bathala_core::DifficultyTier;

bitflags::bitflags! {
    /// Run-level hints the map and reward layers may honour.
    #[derive(
        Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
    )]
    pub struct ModifierFlags: u8 {
        const FAVOR_REST = 1 << 0;
        const FAVOR_TREASURE = 1 << 1;
        const BLESSING = 1 << 2;
        const CHALLENGE = 1 << 3;
    }
}

/// Multipliers applied to enemies and the economy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdaptiveModifiers {
    pub enemy_health: f32,
    pub enemy_damage: f32,
    pub enemy_block: f32,
    pub shop_prices: f32,
    pub gold_rewards: f32,
    pub flags: ModifierFlags,
}

impl Default for AdaptiveModifiers {
    fn default() -> Self {
        Self::neutral()
    }
}

impl AdaptiveModifiers {
    pub const fn neutral() -> Self {
        Self {
            enemy_health: 1.0,
            enemy_damage: 1.0,
            enemy_block: 1.0,
            shop_prices: 1.0,
            gold_rewards: 1.0,
            flags: ModifierFlags::empty(),
        }
    }

    /// Target modifiers for a tier.
    ///
    /// | Tier       | Health | Damage | Block | Shop | Gold | Flags              |
    /// |------------|--------|--------|-------|------|------|--------------------|
    /// | Struggling | 0.75   | 0.75   | 0.80  | 0.80 | 1.20 | rest, blessing     |
    /// | Learning 1 | 0.90   | 0.90   | 0.95  | 0.90 | 1.10 | rest               |
    /// | Learning 2 | 1.00   | 1.00   | 1.00  | 1.00 | 1.00 |                    |
    /// | Thriving 1 | 1.10   | 1.05   | 1.10  | 1.00 | 1.00 | treasure           |
    /// | Thriving 2 | 1.20   | 1.15   | 1.20  | 1.10 | 0.95 | treasure, challenge|
    /// | Mastering  | 1.25   | 1.25   | 1.25  | 1.20 | 0.90 | challenge          |
    pub const fn for_tier(tier: DifficultyTier) -> Self {
        let (enemy_health, enemy_damage, enemy_block, shop_prices, gold_rewards, flags) =
            match tier {
                DifficultyTier::Struggling => (
                    0.75,
                    0.75,
                    0.8,
                    0.8,
                    1.2,
                    ModifierFlags::FAVOR_REST.union(ModifierFlags::BLESSING),
                ),
                DifficultyTier::Learning1 => (0.9, 0.9, 0.95, 0.9, 1.1, ModifierFlags::FAVOR_REST),
                DifficultyTier::Learning2 => (1.0, 1.0, 1.0, 1.0, 1.0, ModifierFlags::empty()),
                DifficultyTier::Thriving1 => {
                    (1.1, 1.05, 1.1, 1.0, 1.0, ModifierFlags::FAVOR_TREASURE)
                }
                DifficultyTier::Thriving2 => (
                    1.2,
                    1.15,
                    1.2,
                    1.1,
                    0.95,
                    ModifierFlags::FAVOR_TREASURE.union(ModifierFlags::CHALLENGE),
                ),
                DifficultyTier::Mastering => (1.25, 1.25, 1.25, 1.2, 0.9, ModifierFlags::CHALLENGE),
            };
        Self {
            enemy_health,
            enemy_damage,
            enemy_block,
            shop_prices,
            gold_rewards,
            flags,
        }
    }

    /// True when health and damage are both within `threshold` of `target`.
    pub fn is_settled(&self, target: &Self, threshold: f32) -> bool {
        (self.enemy_health - target.enemy_health).abs() < threshold
            && (self.enemy_damage - target.enemy_damage).abs() < threshold
    }

    /// Moves every multiplier `rate` of the way toward `target`; flags snap.
    pub fn step_toward(&mut self, target: &Self, rate: f32) {
        let step = |current: &mut f32, goal: f32| *current += (goal - *current) * rate;
        step(&mut self.enemy_health, target.enemy_health);
        step(&mut self.enemy_damage, target.enemy_damage);
        step(&mut self.enemy_block, target.enemy_block);
        step(&mut self.shop_prices, target.shop_prices);
        step(&mut self.gold_rewards, target.gold_rewards);
        self.flags = target.flags;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn middle_tier_is_neutral() {
        assert_eq!(
            AdaptiveModifiers::for_tier(DifficultyTier::Learning2),
            AdaptiveModifiers::neutral()
        );
    }

    #[test]
    fn harder_tiers_grow_enemies() {
        let targets: Vec<_> = DifficultyTier::iter()
            .map(AdaptiveModifiers::for_tier)
            .collect();
        for pair in targets.windows(2) {
            assert!(pair[1].enemy_health > pair[0].enemy_health);
            assert!(pair[1].gold_rewards <= pair[0].gold_rewards);
        }
    }

    #[test]
    fn struggling_flags() {
        let target = AdaptiveModifiers::for_tier(DifficultyTier::Struggling);
        assert!(target.flags.contains(ModifierFlags::FAVOR_REST | ModifierFlags::BLESSING));
        assert!(!target.flags.contains(ModifierFlags::CHALLENGE));
    }

    #[test]
    fn stepping_halves_the_gap() {
        let mut current = AdaptiveModifiers::neutral();
        let target = AdaptiveModifiers::for_tier(DifficultyTier::Mastering);
        current.step_toward(&target, 0.5);
        assert!((current.enemy_health - 1.125).abs() < 1e-6);
        assert_eq!(current.flags, ModifierFlags::CHALLENGE);
        assert!(!current.is_settled(&target, 0.02));
    }
}
