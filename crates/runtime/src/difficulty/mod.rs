//! Dynamic difficulty adjustment.
//!
//! [`PerformanceTracker`] turns combat events into a Player Performance Score;
//! [`DifficultyAdjuster`] maps the score's tier onto smoothed
//! [`AdaptiveModifiers`] and scales enemies with them.

pub mod adjuster;
pub mod snapshot;
pub mod tiers;
pub mod tracker;

pub use adjuster::{DifficultyAdjuster, NarrativeEvent};
pub use snapshot::SessionSnapshot;
pub use tiers::{AdaptiveModifiers, ModifierFlags};
pub use tracker::{
    CombatId, CombatMetrics, EventDetails, EventKind, PerformanceEvent, PerformanceSummary,
    PerformanceTracker, ResourceKind,
};
