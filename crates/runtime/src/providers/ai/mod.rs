//! Opponent AI for card combat.
//!
//! Decision-making is split into small, separately testable pieces:
//!
//! 1. **Memory** ([`memory`]): rolling window of the opponent's observed plays
//! 2. **Candidates** ([`candidate`]): every card subset worth considering
//! 3. **Scoring** ([`scoring`]): heuristics plus two interchangeable scorers
//! 4. **Strategy** ([`strategy`]): filtering and personality-driven selection
//! 5. **Control** ([`controller`]): turns a proposal into a committed [`Decision`]
//!
//! # Core Components
//!
//! - [`DecisionController`]: per-combat opponent state and turn loop
//! - [`StrategyEngine`]: card-play selection
//! - [`ActionScorer`]: the seam between card play and fixed actions
//!
//! [`Decision`]: bathala_core::Decision

pub mod candidate;
pub mod controller;
pub mod flavor;
pub mod memory;
pub mod scoring;
pub mod strategy;

pub use candidate::{CandidatePlay, card_subsets};
pub use controller::{AiStatistics, CombatRecord, DecisionController};
pub use flavor::{CreatureFlavor, apply_damage_profile};
pub use memory::{ObservedPlay, OpponentMemory};
pub use scoring::{
    ActionScorer, ActionWeights, CardPlayScorer, FixedActionScorer, FixedChoice, ScoredAction,
    ScorerKind, ScoringInput,
};
pub use strategy::StrategyEngine;
