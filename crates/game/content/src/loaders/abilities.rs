//! Special-ability table loader.

use std::path::Path;

use crate::abilities::{AbilityEntry, AbilityTable};
use crate::loaders::{LoadResult, read_file};

/// Loader for ability tables from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load abilities from a RON file.
    ///
    /// RON format: `Vec<(String, AbilityEntry)>` keyed by pattern token.
    pub fn load(path: &Path) -> LoadResult<AbilityTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AbilityTable> {
        let raw: Vec<(String, AbilityEntry)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability RON: {}", e))?;

        let mut table = AbilityTable::new();
        for (token, entry) in raw {
            if entry.high < 0.0 || entry.low < 0.0 {
                anyhow::bail!("Ability '{}' has a negative value", token);
            }
            table.insert(token, entry);
        }
        Ok(table)
    }
}
