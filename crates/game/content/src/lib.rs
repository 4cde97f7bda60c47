//! Data-driven content for the opponent AI and difficulty engine.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Creature roster: archetype, flavor, deck theme and damage profile per name
//! - Special abilities referenced by creature attack patterns
//! - Narrative lines per difficulty tier
//! - Elemental decks and themed card supply
//! - Game configuration (data-driven via TOML)
//!
//! Content is consumed by the runtime as read-only lookup data.

pub mod abilities;
pub mod deck;
pub mod narrative;
pub mod roster;
pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use abilities::{AbilityCondition, AbilityEntry, AbilityTable, DEFAULT_ABILITY_VALUE};
pub use deck::{Deck, ThemedSupplier, theme_weights};
pub use narrative::NarrativePools;
pub use roster::{ActionBias, CreatureEntry, CreatureStats, DamageProfile, Roster};
pub use tables::ContentTables;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, ConfigLoader, ContentFactory, LoadResult, NarrativeLoader, RosterLoader,
};
