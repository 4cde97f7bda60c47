//! Tier-driven difficulty adjustment.
//!
//! The adjuster reads the tracker's tier, looks up that tier's target
//! modifiers and eases the live modifiers toward it. Enemies are scaled by
//! copy, never in place.

use std::collections::VecDeque;

use bathala_content::NarrativePools;
use bathala_core::{DdaTuning, DifficultyTier, Enemy};
use rand::RngCore;

use super::snapshot::SessionSnapshot;
use super::tiers::AdaptiveModifiers;
use super::tracker::PerformanceTracker;

/// Number of recent events carried in a snapshot summary.
const SNAPSHOT_RECENT_EVENTS: usize = 10;

/// A narrative line announced on a tier change.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NarrativeEvent {
    pub from: DifficultyTier,
    pub to: DifficultyTier,
    pub pps: f32,
    pub line: String,
}

#[derive(Clone, Debug)]
pub struct DifficultyAdjuster {
    tuning: DdaTuning,
    tracker: PerformanceTracker,
    modifiers: AdaptiveModifiers,
    pools: NarrativePools,
    narrative: VecDeque<NarrativeEvent>,
    last_tier: DifficultyTier,
    adjustments: u32,
    announcements: u64,
}

impl Default for DifficultyAdjuster {
    fn default() -> Self {
        Self::new(DdaTuning::default(), NarrativePools::builtin())
    }
}

impl DifficultyAdjuster {
    pub fn new(tuning: DdaTuning, pools: NarrativePools) -> Self {
        Self {
            tracker: PerformanceTracker::new(tuning.clone()),
            tuning,
            modifiers: AdaptiveModifiers::neutral(),
            pools,
            narrative: VecDeque::new(),
            last_tier: DifficultyTier::default(),
            adjustments: 0,
            announcements: 0,
        }
    }

    /// Eases the live modifiers one step toward the current tier's target.
    ///
    /// A tier change since the previous call appends a narrative line whether
    /// or not the modifiers move.
    ///
    /// # Returns
    ///
    /// `false` when health and damage are already within the stability
    /// threshold of the target.
    pub fn update(&mut self, rng: &mut dyn RngCore) -> bool {
        let tier = self.tracker.tier();
        if tier != self.last_tier {
            self.announce(self.last_tier, tier, rng);
            self.last_tier = tier;
        }

        let target = AdaptiveModifiers::for_tier(tier);
        if self
            .modifiers
            .is_settled(&target, self.tuning.stability_threshold)
        {
            tracing::debug!("DifficultyAdjuster: {} modifiers settled", tier.label());
            return false;
        }

        self.modifiers
            .step_toward(&target, self.tuning.adaptation_rate);
        self.adjustments += 1;
        tracing::debug!(
            "DifficultyAdjuster: toward {} health x{:.3} damage x{:.3}",
            tier.label(),
            self.modifiers.enemy_health,
            self.modifiers.enemy_damage
        );
        true
    }

    fn announce(&mut self, from: DifficultyTier, to: DifficultyTier, rng: &mut dyn RngCore) {
        tracing::info!(
            "Difficulty tier {} -> {} (PPS {:.2})",
            from.label(),
            to.label(),
            self.tracker.pps()
        );
        let Some(line) = self.pools.pick(to, rng) else {
            return;
        };
        if self.tuning.narrative_capacity == 0 {
            return;
        }
        if self.narrative.len() >= self.tuning.narrative_capacity {
            self.narrative.pop_front();
        }
        self.narrative.push_back(NarrativeEvent {
            from,
            to,
            pps: self.tracker.pps(),
            line: line.to_string(),
        });
        self.announcements += 1;
    }

    /// A scaled copy of `enemy`.
    ///
    /// Max and current health share one multiplier so the health percentage
    /// survives. The block modifier covers both standing block and the armor
    /// a defend grants. Results truncate toward zero.
    pub fn apply_enemy_modifiers(&self, enemy: &Enemy) -> Enemy {
        let scale = |value: u32, factor: f32| (value as f32 * factor) as u32;
        let mut scaled = enemy.clone();
        scaled.max_health = scale(enemy.max_health, self.modifiers.enemy_health);
        scaled.current_health = scale(enemy.current_health, self.modifiers.enemy_health);
        scaled.block = scale(enemy.block, self.modifiers.enemy_block);
        scaled.armor = scale(enemy.armor, self.modifiers.enemy_block);
        scaled.damage = scale(enemy.damage, self.modifiers.enemy_damage);
        scaled
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn tracker(&self) -> &PerformanceTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut PerformanceTracker {
        &mut self.tracker
    }

    pub fn modifiers(&self) -> &AdaptiveModifiers {
        &self.modifiers
    }

    pub fn current_tier(&self) -> DifficultyTier {
        self.tracker.tier()
    }

    pub fn adjustments(&self) -> u32 {
        self.adjustments
    }

    /// Narrative lines logged since creation or the last reset, evicted ones included.
    pub fn announcements(&self) -> u64 {
        self.announcements
    }

    /// The newest `count` narrative events, oldest first.
    pub fn recent_narrative(&self, count: usize) -> impl Iterator<Item = &NarrativeEvent> {
        self.narrative
            .iter()
            .skip(self.narrative.len().saturating_sub(count))
    }

    pub fn status(&self) -> String {
        format!(
            "PPS {:.2} ({}) | enemy health x{:.2} damage x{:.2} block x{:.2} | shop x{:.2} gold x{:.2} | flags {:?}",
            self.tracker.pps(),
            self.tracker.tier().label(),
            self.modifiers.enemy_health,
            self.modifiers.enemy_damage,
            self.modifiers.enemy_block,
            self.modifiers.shop_prices,
            self.modifiers.gold_rewards,
            self.modifiers.flags
        )
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let pps_history: Vec<f32> = self.tracker.pps_history().collect();
        SessionSnapshot {
            summary: self.tracker.summary(SNAPSHOT_RECENT_EVENTS),
            tier_progression: pps_history
                .iter()
                .map(|&pps| DifficultyTier::from_pps(pps))
                .collect(),
            pps_history,
            events: self.tracker.events().cloned().collect(),
            combats: self.tracker.combats().to_vec(),
            modifiers: self.modifiers,
            adjustments: self.adjustments,
            narrative: self.narrative.iter().cloned().collect(),
            ai_combats: Vec::new(),
        }
    }

    /// Fresh tracker, neutral modifiers, empty narrative log.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.modifiers = AdaptiveModifiers::neutral();
        self.narrative.clear();
        self.last_tier = DifficultyTier::default();
        self.adjustments = 0;
        self.announcements = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bathala_core::seeded_rng;

    use crate::difficulty::tiers::ModifierFlags;

    fn dominant_win(adjuster: &mut DifficultyAdjuster) {
        let tracker = adjuster.tracker_mut();
        tracker.start_combat(100);
        tracker.end_combat(true, 100, 3).unwrap();
    }

    #[test]
    fn neutral_tier_does_not_move() {
        let mut adjuster = DifficultyAdjuster::default();
        assert!(!adjuster.update(&mut seeded_rng(1)));
        assert_eq!(adjuster.modifiers(), &AdaptiveModifiers::neutral());
        assert_eq!(adjuster.recent_narrative(5).count(), 0);
    }

    #[test]
    fn tier_change_eases_and_narrates() {
        let mut adjuster = DifficultyAdjuster::default();
        let mut rng = seeded_rng(2);
        dominant_win(&mut adjuster);
        assert_eq!(adjuster.current_tier(), DifficultyTier::Learning2);
        dominant_win(&mut adjuster);
        assert_eq!(adjuster.current_tier(), DifficultyTier::Thriving1);

        assert!(adjuster.update(&mut rng));
        let modifiers = adjuster.modifiers();
        assert!((modifiers.enemy_health - 1.01).abs() < 1e-5);
        assert_eq!(modifiers.flags, ModifierFlags::FAVOR_TREASURE);

        let narrative: Vec<_> = adjuster.recent_narrative(5).collect();
        assert_eq!(narrative.len(), 1);
        assert_eq!(narrative[0].to, DifficultyTier::Thriving1);
        assert!(
            NarrativePools::builtin()
                .lines(DifficultyTier::Thriving1)
                .contains(&narrative[0].line)
        );

        adjuster.update(&mut rng);
        assert_eq!(adjuster.recent_narrative(5).count(), 1);
    }

    #[test]
    fn enemy_copy_is_scaled() {
        let mut adjuster = DifficultyAdjuster::default();
        adjuster.modifiers.enemy_health = 1.5;
        adjuster.modifiers.enemy_damage = 0.5;
        adjuster.modifiers.enemy_block = 2.0;
        let mut enemy = Enemy::new("Kapre", 40, 9).with_armor(5);
        enemy.current_health = 20;
        enemy.block = 3;

        let scaled = adjuster.apply_enemy_modifiers(&enemy);
        assert_eq!(scaled.max_health, 60);
        assert_eq!(scaled.current_health, 30);
        assert_eq!(scaled.damage, 4);
        assert_eq!(scaled.block, 6);
        assert_eq!(scaled.armor, 10);
        assert_eq!(enemy.max_health, 40);
        assert_eq!(enemy.armor, 5);
    }

    #[test]
    fn mastering_enemies_defend_harder() {
        let mut adjuster = DifficultyAdjuster::default();
        let mut rng = seeded_rng(8);
        let tracker = adjuster.tracker_mut();
        for _ in 0..5 {
            tracker.start_combat(100);
            tracker.end_combat(true, 100, 3).unwrap();
        }
        assert_eq!(adjuster.current_tier(), DifficultyTier::Mastering);
        while adjuster.update(&mut rng) {}

        let enemy = Enemy::new("Dwende", 40, 10).with_armor(8);
        let scaled = adjuster.apply_enemy_modifiers(&enemy);
        assert!(scaled.armor > enemy.armor);
        assert_eq!(scaled.damage, 12);
    }

    #[test]
    fn narrative_is_a_ring_buffer() {
        let tuning = DdaTuning {
            narrative_capacity: 2,
            ..DdaTuning::default()
        };
        let mut adjuster = DifficultyAdjuster::new(tuning, NarrativePools::builtin());
        let mut rng = seeded_rng(3);
        for _ in 0..5 {
            dominant_win(&mut adjuster);
            adjuster.update(&mut rng);
        }
        // PPS 1..=5: Thriving1, Thriving2 and Mastering are announced
        let narrative: Vec<_> = adjuster.recent_narrative(10).collect();
        assert_eq!(narrative.len(), 2);
        assert_eq!(narrative[1].to, DifficultyTier::Mastering);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut adjuster = DifficultyAdjuster::default();
        dominant_win(&mut adjuster);
        adjuster.update(&mut seeded_rng(4));
        let snapshot = adjuster.snapshot();
        assert_eq!(snapshot.tier_progression.len(), snapshot.pps_history.len());
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"pps_history\""));
        assert_eq!(SessionSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn reset_restores_neutral() {
        let mut adjuster = DifficultyAdjuster::default();
        let mut rng = seeded_rng(5);
        dominant_win(&mut adjuster);
        dominant_win(&mut adjuster);
        adjuster.update(&mut rng);
        adjuster.reset();
        assert_eq!(adjuster.modifiers(), &AdaptiveModifiers::neutral());
        assert_eq!(adjuster.tracker().pps(), 0.0);
        assert_eq!(adjuster.recent_narrative(5).count(), 0);
        assert_eq!(adjuster.adjustments(), 0);
    }
}
