//! Fixed-action scorer (attack / defend / status without cards).
//!
//! # Preferences
//!
//! Base weights come from the personality plus the creature's bias and are
//! normalized to sum to one:
//!
//! ```text
//! attack = damage_weight + risk_tolerance × 0.5
//! defend = defense_weight + (1 - risk_tolerance) × 0.5
//! status = elemental_weight × 0.5 + randomness_weight × 0.5
//! ```
//!
//! Each turn a copy is nudged by the situation and renormalized. The top action
//! is taken with `best_action_probability`; otherwise one is drawn by weight.

use bathala_content::ActionBias;
use bathala_core::{
    ATTACK_TOKEN, ActionKind, Enemy, GameContext, PersonalityArchetype, PersonalityProfile,
};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, RngCore};

use super::{ActionScorer, ActionWeights, FixedChoice, ScoredAction, ScorerKind, ScoringInput};
use crate::error::Result;

/// Smallest weight any action keeps before normalization.
const MIN_WEIGHT: f32 = 0.01;

/// Turns counted as the opening, when status effects are favoured.
const OPENING_TURNS: u32 = 2;

#[derive(Clone, Debug)]
pub struct FixedActionScorer {
    best_action_probability: f32,
}

impl Default for FixedActionScorer {
    fn default() -> Self {
        Self::new(bathala_core::AiTuning::DEFAULT_BEST_ACTION_PROBABILITY)
    }
}

impl FixedActionScorer {
    pub fn new(best_action_probability: f32) -> Self {
        Self {
            best_action_probability: best_action_probability.clamp(0.0, 1.0),
        }
    }

    /// Personality preferences before the situation is considered.
    ///
    /// Status is unavailable to creatures whose pattern holds no ability.
    pub fn base_preferences(
        profile: &PersonalityProfile,
        bias: ActionBias,
        enemy: &Enemy,
    ) -> ActionWeights {
        let risk = profile.risk_tolerance;
        let mut weights = ActionWeights::new(
            profile.damage_weight + risk * 0.5 + bias.attack,
            profile.defense_weight + (1.0 - risk) * 0.5 + bias.defend,
            profile.elemental_weight * 0.5 + profile.randomness_weight * 0.5 + bias.status,
        );
        weights.attack = weights.attack.max(MIN_WEIGHT);
        weights.defend = weights.defend.max(MIN_WEIGHT);
        weights.status = if has_ability(enemy) {
            weights.status.max(MIN_WEIGHT)
        } else {
            0.0
        };
        weights.normalized()
    }

    /// Situational nudges applied to a copy of the base preferences.
    ///
    /// # Factors
    ///
    /// - own health below 30%: defend +0.3 (aggressive opponents attack instead)
    /// - opponent below 30%: attack +0.3
    /// - opening turns: status +0.2 when an ability exists
    pub fn situational(
        base: ActionWeights,
        ctx: &GameContext,
        profile: &PersonalityProfile,
    ) -> ActionWeights {
        let mut weights = base;
        if ctx.ai_health_ratio() < 0.3 {
            if profile.is(PersonalityArchetype::Aggressive) {
                weights.attack += 0.3;
            } else {
                weights.defend += 0.3;
            }
        }
        if ctx.player_health_ratio() < 0.3 {
            weights.attack += 0.3;
        }
        if ctx.turn_number <= OPENING_TURNS && base.status > 0.0 {
            weights.status += 0.2;
        }
        weights.normalized()
    }
}

impl ActionScorer for FixedActionScorer {
    fn kind(&self) -> ScorerKind {
        ScorerKind::Actions
    }

    fn score(&self, input: &ScoringInput<'_>, rng: &mut dyn RngCore) -> Result<ScoredAction> {
        let base = Self::base_preferences(input.profile, input.bias, input.enemy);
        let weights = Self::situational(base, input.ctx, input.profile);

        tracing::debug!(
            "FixedActionScorer: {} weights attack={:.2} defend={:.2} status={:.2}",
            input.enemy.name,
            weights.attack,
            weights.defend,
            weights.status
        );

        let greedy = rng.gen_bool(f64::from(self.best_action_probability));
        let kind = if greedy {
            weights.best()
        } else {
            match WeightedIndex::new(ActionKind::SCORED.iter().map(|&kind| weights.get(kind))) {
                Ok(distribution) => ActionKind::SCORED[distribution.sample(rng)],
                Err(_) => weights.best(),
            }
        };

        Ok(ScoredAction::Fixed(FixedChoice {
            kind,
            weights,
            greedy,
        }))
    }
}

fn has_ability(enemy: &Enemy) -> bool {
    enemy
        .attack_pattern
        .iter()
        .any(|token| token != ATTACK_TOKEN)
}
