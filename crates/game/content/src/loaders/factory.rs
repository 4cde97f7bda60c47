//! Content factory for building lookup tables from a data directory.

use std::path::{Path, PathBuf};

use bathala_core::GameConfig;
use tracing::debug;

use crate::ContentTables;
use crate::abilities::AbilityTable;
use crate::loaders::{AbilityLoader, ConfigLoader, LoadResult, NarrativeLoader, RosterLoader};
use crate::narrative::NarrativePools;
use crate::roster::Roster;

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── roster.ron
/// ├── abilities.ron
/// └── narrative.ron
/// ```
///
/// Every file is optional: a missing file yields the built-in table, a present
/// but malformed one is an error.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        self.load_or("config.toml", ConfigLoader::load, GameConfig::default)
    }

    /// Load the creature roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        self.load_or("roster.ron", RosterLoader::load, Roster::builtin)
    }

    /// Load special abilities from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<AbilityTable> {
        self.load_or("abilities.ron", AbilityLoader::load, AbilityTable::builtin)
    }

    /// Load narrative pools from `narrative.ron`.
    pub fn load_narrative(&self) -> LoadResult<NarrativePools> {
        self.load_or("narrative.ron", NarrativeLoader::load, NarrativePools::builtin)
    }

    /// Load every lookup table.
    pub fn load_tables(&self) -> LoadResult<ContentTables> {
        Ok(ContentTables {
            roster: self.load_roster()?,
            abilities: self.load_abilities()?,
            narrative: self.load_narrative()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn load_or<T>(
        &self,
        file: &str,
        load: impl FnOnce(&Path) -> LoadResult<T>,
        fallback: impl FnOnce() -> T,
    ) -> LoadResult<T> {
        let path = self.data_dir.join(file);
        if path.exists() {
            debug!(path = %path.display(), "loading content file");
            load(&path)
        } else {
            debug!(path = %path.display(), "content file missing, using built-in");
            Ok(fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_directory_falls_back_to_builtin() {
        let factory = ContentFactory::new("/nonexistent/bathala-data");
        let tables = factory.load_tables().unwrap();
        assert_eq!(tables.roster.len(), Roster::builtin().len());
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
    }
}
