//! Personality archetypes and their weighting profiles.
//!
//! A [`PersonalityProfile`] is static data: many creatures share one profile and
//! nothing mutates it after construction. Weight fields are independent
//! multipliers in `[0, 1]`; they do not need to sum to one.

use crate::card::ElementSet;

/// Named behaviour archetype.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum PersonalityArchetype {
    /// Defensive, values block and avoids risky plays.
    Cautious,
    /// High risk, favours big damage.
    Aggressive,
    /// Balanced, efficiency-driven play. Fallback for unknown creatures.
    #[default]
    Calculating,
    /// Builds elemental synergies.
    Elemental,
    /// Unpredictable, injects noise into every score.
    Chaotic,
    /// Learns from the opponent's recent plays.
    Adaptive,
}

/// Weighting table governing how an opponent scores and selects plays.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonalityProfile {
    pub archetype: PersonalityArchetype,
    pub description: String,
    pub risk_tolerance: f32,
    pub damage_weight: f32,
    pub defense_weight: f32,
    pub hand_type_weight: f32,
    pub elemental_weight: f32,
    /// Plays below this total value are discarded before selection.
    pub min_playable_value: i32,
    pub preferred_elements: ElementSet,
    pub bluff_chance: f32,
    pub randomness_weight: f32,
    /// Learning rate for opponent modelling; zero disables adaptation.
    pub adaptation_rate: f32,
    /// How many observed opponent plays are remembered.
    pub memory_depth: usize,
}

impl PersonalityProfile {
    /// Builds the reference tuning for an archetype.
    pub fn for_archetype(archetype: PersonalityArchetype) -> Self {
        match archetype {
            PersonalityArchetype::Cautious => Self {
                archetype,
                description: "Plays defensively, values block and healing".into(),
                risk_tolerance: 0.2,
                damage_weight: 0.4,
                defense_weight: 0.8,
                hand_type_weight: 0.7,
                elemental_weight: 0.5,
                min_playable_value: 15,
                preferred_elements: ElementSet::EARTH | ElementSet::WATER,
                bluff_chance: 0.1,
                randomness_weight: 0.1,
                adaptation_rate: 0.2,
                memory_depth: 10,
            },
            PersonalityArchetype::Aggressive => Self {
                archetype,
                description: "High risk, high reward. Favors damage over defense".into(),
                risk_tolerance: 0.9,
                damage_weight: 1.0,
                defense_weight: 0.2,
                hand_type_weight: 0.9,
                elemental_weight: 0.7,
                min_playable_value: 8,
                preferred_elements: ElementSet::FIRE | ElementSet::AIR,
                bluff_chance: 0.4,
                randomness_weight: 0.3,
                adaptation_rate: 0.3,
                memory_depth: 8,
            },
            PersonalityArchetype::Calculating => Self {
                archetype,
                description: "Analyzes probabilities and makes optimal plays".into(),
                risk_tolerance: 0.5,
                damage_weight: 0.7,
                defense_weight: 0.6,
                hand_type_weight: 0.8,
                elemental_weight: 0.6,
                min_playable_value: 12,
                preferred_elements: ElementSet::NEUTRAL,
                bluff_chance: 0.15,
                randomness_weight: 0.05,
                adaptation_rate: 0.1,
                memory_depth: 15,
            },
            PersonalityArchetype::Elemental => Self {
                archetype,
                description: "Focuses on elemental synergies and combinations".into(),
                risk_tolerance: 0.6,
                damage_weight: 0.6,
                defense_weight: 0.4,
                hand_type_weight: 0.5,
                elemental_weight: 1.0,
                min_playable_value: 10,
                preferred_elements: ElementSet::FIRE
                    | ElementSet::WATER
                    | ElementSet::EARTH
                    | ElementSet::AIR,
                bluff_chance: 0.2,
                randomness_weight: 0.2,
                adaptation_rate: 0.25,
                memory_depth: 12,
            },
            PersonalityArchetype::Chaotic => Self {
                archetype,
                description: "Unpredictable plays, high randomness".into(),
                risk_tolerance: 0.8,
                damage_weight: 0.7,
                defense_weight: 0.3,
                hand_type_weight: 0.6,
                elemental_weight: 0.8,
                min_playable_value: 5,
                preferred_elements: ElementSet::FIRE | ElementSet::AIR,
                bluff_chance: 0.5,
                randomness_weight: 0.6,
                adaptation_rate: 0.4,
                memory_depth: 5,
            },
            PersonalityArchetype::Adaptive => Self {
                archetype,
                description: "Learns and adapts to player behavior".into(),
                risk_tolerance: 0.5,
                damage_weight: 0.6,
                defense_weight: 0.5,
                hand_type_weight: 0.7,
                elemental_weight: 0.6,
                min_playable_value: 10,
                preferred_elements: ElementSet::NEUTRAL,
                bluff_chance: 0.25,
                randomness_weight: 0.15,
                adaptation_rate: 0.5,
                memory_depth: 20,
            },
        }
    }

    pub fn name(&self) -> &str {
        self.archetype.as_ref()
    }

    pub fn is(&self, archetype: PersonalityArchetype) -> bool {
        self.archetype == archetype
    }
}

impl Default for PersonalityProfile {
    fn default() -> Self {
        Self::for_archetype(PersonalityArchetype::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Element;
    use strum::IntoEnumIterator;

    #[test]
    fn weights_stay_in_unit_range() {
        for archetype in PersonalityArchetype::iter() {
            let profile = PersonalityProfile::for_archetype(archetype);
            for weight in [
                profile.risk_tolerance,
                profile.damage_weight,
                profile.defense_weight,
                profile.hand_type_weight,
                profile.elemental_weight,
                profile.bluff_chance,
                profile.randomness_weight,
                profile.adaptation_rate,
            ] {
                assert!((0.0..=1.0).contains(&weight), "{archetype}: {weight}");
            }
            assert!(profile.memory_depth > 0);
        }
    }

    #[test]
    fn default_is_calculating() {
        let profile = PersonalityProfile::default();
        assert_eq!(profile.archetype, PersonalityArchetype::Calculating);
        assert_eq!(profile.min_playable_value, 12);
        assert!(profile.preferred_elements.has(Element::Neutral));
    }

    #[test]
    fn archetype_parses_case_insensitively() {
        assert_eq!(
            "chaotic".parse::<PersonalityArchetype>().ok(),
            Some(PersonalityArchetype::Chaotic)
        );
    }
}
