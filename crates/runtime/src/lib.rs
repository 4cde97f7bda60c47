//! Opponent AI and dynamic difficulty runtime.
//!
//! This crate turns the pure model in `bathala-core` and the lookup tables in
//! `bathala-content` into the two engines a card-combat game loop drives:
//! an opponent that picks card plays or fixed actions each turn, and a
//! difficulty engine that scores the player and eases enemies toward a
//! fitting challenge.
//!
//! Modules are organized by responsibility:
//! - [`providers`] hosts the opponent AI (strategy engine, scorers, controller)
//! - [`manager`] is the integration facade a game loop talks to
//! - [`difficulty`] tracks player performance and adapts modifiers
//! - [`session`] wires the AI and the difficulty engine into one run
//! - [`error`] defines the runtime error type
pub mod difficulty;
pub mod error;
pub mod manager;
pub mod providers;
pub mod session;

pub use difficulty::{
    AdaptiveModifiers, CombatId, CombatMetrics, DifficultyAdjuster, EventDetails, EventKind,
    ModifierFlags, NarrativeEvent, PerformanceEvent, PerformanceSummary, PerformanceTracker,
    ResourceKind, SessionSnapshot,
};
pub use error::{Result, RuntimeError};
pub use manager::{AiAnalytics, AiConfig, AiManager, AiTurnResult, decision_quality};
pub use providers::ai::{
    ActionScorer, AiStatistics, CandidatePlay, CardPlayScorer, DecisionController,
    FixedActionScorer, OpponentMemory, ScorerKind, StrategyEngine,
};
pub use session::{CombatOutcome, Session, SessionBuilder, SessionConfig};
