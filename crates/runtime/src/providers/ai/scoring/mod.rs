//! Action scoring for opponent turns.
//!
//! Two interchangeable scorers share one [`DecisionController`] shell:
//!
//! 1. **Card play** ([`cards`]): enumerate card subsets of the pool and rank them
//!    with the [`heuristics`].
//! 2. **Fixed actions** ([`actions`]): weigh attack, defend and status directly
//!    from the personality and the situation.
//!
//! A scorer only proposes. Scaling, ability interception, bluffing and creature
//! flavor are applied by the controller, so both scorers produce decisions of
//! the same shape.
//!
//! [`DecisionController`]: super::DecisionController

pub mod actions;
pub mod cards;
pub mod heuristics;

use bathala_content::ActionBias;
use bathala_core::{ActionKind, AiTuning, Card, Enemy, GameContext, PersonalityProfile};
use rand::RngCore;

pub use actions::FixedActionScorer;
pub use cards::CardPlayScorer;

use super::candidate::CandidatePlay;
use super::memory::OpponentMemory;
use crate::error::Result;

/// Which scorer an opponent uses.
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
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ScorerKind {
    /// Poker-hand combinations from a card pool.
    #[default]
    Cards,
    /// Flat attack / defend / status choice.
    Actions,
}

impl ScorerKind {
    pub fn build(self, tuning: &AiTuning) -> Box<dyn ActionScorer> {
        match self {
            Self::Cards => Box::new(CardPlayScorer::new(tuning.clone())),
            Self::Actions => Box::new(FixedActionScorer::new(tuning.best_action_probability)),
        }
    }

    /// Whether the scorer plays from a card pool.
    pub const fn uses_cards(self) -> bool {
        matches!(self, Self::Cards)
    }
}

/// Everything a scorer may read for one decision.
#[derive(Clone, Copy, Debug)]
pub struct ScoringInput<'a> {
    pub ctx: &'a GameContext,
    pub enemy: &'a Enemy,
    pub profile: &'a PersonalityProfile,
    pub memory: &'a OpponentMemory,
    pub pool: &'a [Card],
    pub bias: ActionBias,
}

/// A scorer's proposal for the turn.
#[derive(Clone, Debug, PartialEq)]
pub enum ScoredAction {
    /// Play these cards.
    Play(CandidatePlay),
    /// Take a fixed action.
    Fixed(FixedChoice),
    /// Nothing worth doing.
    Pass(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FixedChoice {
    pub kind: ActionKind,
    /// Situational weights the choice was drawn from.
    pub weights: ActionWeights,
    /// `true` when the top weight was taken, `false` for a weighted draw.
    pub greedy: bool,
}

/// Preference weights over the three scored actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActionWeights {
    pub attack: f32,
    pub defend: f32,
    pub status: f32,
}

impl ActionWeights {
    pub const fn new(attack: f32, defend: f32, status: f32) -> Self {
        Self {
            attack,
            defend,
            status,
        }
    }

    pub fn get(&self, kind: ActionKind) -> f32 {
        match kind {
            ActionKind::Attack => self.attack,
            ActionKind::Defend => self.defend,
            ActionKind::Status => self.status,
            ActionKind::EndTurn => 0.0,
        }
    }

    pub fn get_mut(&mut self, kind: ActionKind) -> Option<&mut f32> {
        match kind {
            ActionKind::Attack => Some(&mut self.attack),
            ActionKind::Defend => Some(&mut self.defend),
            ActionKind::Status => Some(&mut self.status),
            ActionKind::EndTurn => None,
        }
    }

    pub fn total(&self) -> f32 {
        self.attack + self.defend + self.status
    }

    /// Rescaled to sum to one. All-zero weights stay zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        let total = self.total();
        if total <= 0.0 {
            return self;
        }
        Self::new(self.attack / total, self.defend / total, self.status / total)
    }

    /// Highest weight; ties keep declaration order.
    pub fn best(&self) -> ActionKind {
        let mut best = ActionKind::Attack;
        for kind in ActionKind::SCORED {
            if self.get(kind) > self.get(best) {
                best = kind;
            }
        }
        best
    }
}

/// Proposes the opponent's action for one turn.
///
/// Implementations are read-only: the controller applies every state change
/// after the proposal is accepted.
pub trait ActionScorer: Send + Sync {
    fn kind(&self) -> ScorerKind;

    /// # Errors
    ///
    /// Propagates precondition violations such as an oversized card pool.
    fn score(&self, input: &ScoringInput<'_>, rng: &mut dyn RngCore) -> Result<ScoredAction>;
}

impl core::fmt::Debug for dyn ActionScorer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ActionScorer({})", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_normalize() {
        let weights = ActionWeights::new(2.0, 1.0, 1.0).normalized();
        assert!((weights.total() - 1.0).abs() < 1e-6);
        assert_eq!(weights.best(), ActionKind::Attack);
        assert_eq!(ActionWeights::default().normalized(), ActionWeights::default());
    }

    #[test]
    fn scorer_kind_parses() {
        assert_eq!("actions".parse::<ScorerKind>().ok(), Some(ScorerKind::Actions));
        assert_eq!(ScorerKind::Cards.to_string(), "cards");
        assert!(ScorerKind::Cards.uses_cards());
    }
}
