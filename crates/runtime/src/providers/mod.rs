//! Opponent behaviour providers.

pub mod ai;
