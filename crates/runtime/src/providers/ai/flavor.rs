//! Creature-specific damage flavor.
//!
//! Applied after scoring, to the difficulty-scaled damage of an attack. An
//! attack always deals at least one point, even a heavy hitter's miss.

use bathala_content::{ActionBias, DamageProfile, Roster};
use bathala_core::{Card, DeckTheme, ElementCounts};
use rand::{Rng, RngCore};

/// Everything the roster knows about one creature beyond its personality.
///
/// Unknown creatures get neutral flavor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreatureFlavor {
    pub flavor_text: Option<String>,
    pub damage_profile: DamageProfile,
    pub signature_effect: Option<String>,
    pub action_bias: ActionBias,
    pub deck_theme: DeckTheme,
}

impl CreatureFlavor {
    pub fn from_roster(roster: &Roster, name: &str) -> Self {
        Self {
            flavor_text: roster.flavor_text(name).map(str::to_string),
            damage_profile: roster.damage_profile(name),
            signature_effect: roster.signature_effect(name).map(str::to_string),
            action_bias: roster.action_bias(name),
            deck_theme: roster.deck_theme(name),
        }
    }
}

/// Final damage of an attack worth `damage` before flavor.
///
/// `turns` is the number of turns the creature has acted this combat.
pub fn apply_damage_profile(
    profile: DamageProfile,
    damage: f32,
    cards: &[Card],
    turns: u32,
    rng: &mut dyn RngCore,
) -> u32 {
    let adjusted = match profile {
        DamageProfile::Standard => damage,
        DamageProfile::Variance { min, max } => damage * variance(min, max, rng),
        DamageProfile::Heavy {
            multiplier,
            miss_chance,
        } => {
            if rng.gen_bool(f64::from(miss_chance.clamp(0.0, 1.0))) {
                0.0
            } else {
                damage * multiplier
            }
        }
        DamageProfile::Steady { multiplier } => damage * multiplier,
        DamageProfile::ElementalPurity { multiplier } => {
            if !cards.is_empty() && ElementCounts::of(cards).distinct() == 1 {
                damage * multiplier
            } else {
                damage
            }
        }
        DamageProfile::Escalating { per_turn, cap } => {
            damage * (1.0 + per_turn * turns as f32).min(cap)
        }
    };
    (adjusted.max(0.0) as u32).max(1)
}

/// Final block of a defend worth `block` before flavor.
///
/// Only the multiplicative part of a profile carries over: heavy hitters
/// never miss a defend, and card or turn driven profiles leave block alone.
pub fn apply_block_profile(profile: DamageProfile, block: f32, rng: &mut dyn RngCore) -> u32 {
    let adjusted = match profile {
        DamageProfile::Variance { min, max } => block * variance(min, max, rng),
        DamageProfile::Heavy { multiplier, .. } | DamageProfile::Steady { multiplier } => {
            block * multiplier
        }
        DamageProfile::Standard
        | DamageProfile::ElementalPurity { .. }
        | DamageProfile::Escalating { .. } => block,
    };
    adjusted.max(0.0).round() as u32
}

fn variance(min: f32, max: f32, rng: &mut dyn RngCore) -> f32 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    if high > low {
        rng.gen_range(low..=high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bathala_core::{Element, Rank, Suit, seeded_rng};

    #[test]
    fn unknown_creature_has_plain_flavor() {
        let flavor = CreatureFlavor::from_roster(&Roster::builtin(), "Mystery Wisp");
        assert_eq!(flavor, CreatureFlavor::default());
        let tikbalang = CreatureFlavor::from_roster(&Roster::builtin(), "Tikbalang");
        assert_eq!(tikbalang.deck_theme, DeckTheme::Air);
        assert!(tikbalang.signature_effect.is_some());
    }

    #[test]
    fn damage_floors_at_one() {
        let mut rng = seeded_rng(1);
        assert_eq!(
            apply_damage_profile(DamageProfile::Standard, 0.2, &[], 0, &mut rng),
            1
        );
        assert_eq!(
            apply_damage_profile(DamageProfile::Steady { multiplier: 0.5 }, 10.0, &[], 0, &mut rng),
            5
        );
    }

    #[test]
    fn variance_stays_in_band() {
        let mut rng = seeded_rng(2);
        for _ in 0..50 {
            let damage = apply_damage_profile(
                DamageProfile::Variance { min: 0.7, max: 1.3 },
                20.0,
                &[],
                0,
                &mut rng,
            );
            assert!((13..=26).contains(&damage), "{damage}");
        }
    }

    #[test]
    fn escalation_caps() {
        let mut rng = seeded_rng(3);
        let profile = DamageProfile::Escalating {
            per_turn: 0.25,
            cap: 1.5,
        };
        assert_eq!(apply_damage_profile(profile, 100.0, &[], 1, &mut rng), 125);
        assert_eq!(apply_damage_profile(profile, 100.0, &[], 10, &mut rng), 150);
    }

    #[test]
    fn purity_needs_one_element() {
        let mut rng = seeded_rng(4);
        let profile = DamageProfile::ElementalPurity { multiplier: 1.25 };
        let pure = [
            Card::new(Rank::Two, Suit::Clubs, Element::Earth),
            Card::new(Rank::Two, Suit::Hearts, Element::Earth),
        ];
        let mixed = [pure[0], Card::new(Rank::Two, Suit::Spades, Element::Air)];
        assert_eq!(apply_damage_profile(profile, 20.0, &pure, 0, &mut rng), 25);
        assert_eq!(apply_damage_profile(profile, 20.0, &mixed, 0, &mut rng), 20);
    }

    #[test]
    fn block_keeps_only_multipliers() {
        let mut rng = seeded_rng(6);
        let heavy = DamageProfile::Heavy {
            multiplier: 1.5,
            miss_chance: 1.0,
        };
        assert_eq!(apply_block_profile(heavy, 10.0, &mut rng), 15);
        let escalating = DamageProfile::Escalating {
            per_turn: 0.5,
            cap: 2.0,
        };
        assert_eq!(apply_block_profile(escalating, 10.0, &mut rng), 10);
        assert_eq!(
            apply_block_profile(DamageProfile::Standard, 0.0, &mut rng),
            0
        );
        for _ in 0..20 {
            let block = apply_block_profile(
                DamageProfile::Variance { min: 0.5, max: 1.5 },
                10.0,
                &mut rng,
            );
            assert!((5..=15).contains(&block), "{block}");
        }
    }

    #[test]
    fn heavy_miss_still_grazes() {
        let mut rng = seeded_rng(5);
        let always_miss = DamageProfile::Heavy {
            multiplier: 1.2,
            miss_chance: 1.0,
        };
        assert_eq!(apply_damage_profile(always_miss, 30.0, &[], 0, &mut rng), 1);
        let never_miss = DamageProfile::Heavy {
            multiplier: 1.5,
            miss_chance: 0.0,
        };
        assert_eq!(apply_damage_profile(never_miss, 30.0, &[], 0, &mut rng), 45);
    }
}
