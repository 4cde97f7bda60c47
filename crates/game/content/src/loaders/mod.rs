//! Content loaders for reading game data from files.
//!
//! Tuning is TOML; roster, abilities and narrative pools are RON.

pub mod abilities;
pub mod config;
pub mod factory;
pub mod narrative;
pub mod roster;

pub use abilities::AbilityLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use narrative::NarrativeLoader;
pub use roster::RosterLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
