//! Narrative pool loader.

use std::path::Path;

use bathala_core::DifficultyTier;

use crate::loaders::{LoadResult, read_file};
use crate::narrative::NarrativePools;

/// Loader for per-tier narrative lines from RON files.
pub struct NarrativeLoader;

impl NarrativeLoader {
    /// Load narrative pools from a RON file.
    ///
    /// RON format: `Vec<(DifficultyTier, Vec<String>)>`. Tiers left out keep
    /// the built-in lines.
    pub fn load(path: &Path) -> LoadResult<NarrativePools> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<NarrativePools> {
        let raw: Vec<(DifficultyTier, Vec<String>)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse narrative RON: {}", e))?;

        let mut pools = NarrativePools::builtin();
        for (tier, lines) in raw {
            pools.set(tier, lines);
        }
        Ok(pools)
    }
}
