//! Serializable session export.
//!
//! Persisting the snapshot is the caller's business; this module only shapes
//! the data and renders JSON.

use bathala_core::DifficultyTier;

use super::adjuster::NarrativeEvent;
use super::tiers::AdaptiveModifiers;
use super::tracker::{CombatMetrics, PerformanceEvent, PerformanceSummary};
use crate::manager::AiAnalytics;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SessionSnapshot {
    pub summary: PerformanceSummary,
    pub pps_history: Vec<f32>,
    /// Tier of every entry in `pps_history`.
    pub tier_progression: Vec<DifficultyTier>,
    pub events: Vec<PerformanceEvent>,
    pub combats: Vec<CombatMetrics>,
    pub modifiers: AdaptiveModifiers,
    pub adjustments: u32,
    pub narrative: Vec<NarrativeEvent>,
    /// Per-combat opponent analytics, filled in by the session.
    #[serde(default)]
    pub ai_combats: Vec<AiAnalytics>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Tiers in the order the player passed through them, repeats collapsed.
    pub fn tier_path(&self) -> Vec<DifficultyTier> {
        let mut path: Vec<DifficultyTier> = Vec::new();
        for &tier in &self.tier_progression {
            if path.last() != Some(&tier) {
                path.push(tier);
            }
        }
        path
    }
}
