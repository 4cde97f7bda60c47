//! Card, hand and personality model shared by the opponent AI and difficulty engine.
//!
//! `bathala-core` holds the pure building blocks: cards with elemental affinity,
//! the [`HandEvaluator`], static [`PersonalityProfile`]s, per-decision
//! [`GameContext`] snapshots, difficulty tiers and tunable configuration.
//! Nothing here performs I/O or keeps hidden state; randomness is always passed
//! in explicitly.
pub mod action;
pub mod card;
pub mod config;
pub mod context;
pub mod enemy;
pub mod error;
pub mod hand;
pub mod personality;
pub mod rng;
pub mod supply;
pub mod tier;

pub use action::{ActionKind, Decision};
pub use card::{Card, Element, ElementCounts, ElementSet, Rank, Suit};
pub use config::{AiTuning, ConfigError, DdaTuning, DifficultyLevel, GameConfig};
pub use context::{CombatPhase, CombatState, GameContext, health_ratio};
pub use enemy::{ATTACK_TOKEN, Enemy};
pub use error::{ErrorSeverity, GameError};
pub use hand::{
    Hand, HandCategory, HandError, HandEvaluation, HandEvaluator, MAX_HAND_SIZE, SpecialEffect,
};
pub use personality::{PersonalityArchetype, PersonalityProfile};
pub use rng::{AiRng, RngStream, compute_seed, seeded_rng};
pub use supply::{CardSupplier, DeckTheme};
pub use tier::DifficultyTier;
