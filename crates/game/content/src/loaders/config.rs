//! Game configuration loader.

use std::path::Path;

use bathala_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing sections and fields fall back to their defaults; the result is
    /// validated before it is returned.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing GameConfig
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a TOML document.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [ai]
            max_pool_size = 10

            [dda]
            adaptation_rate = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(config.ai.max_pool_size, 10);
        assert_eq!(config.ai.min_viable_play, 5);
        assert_eq!(config.dda.adaptation_rate, 0.2);
        assert_eq!(config.dda.pps_history_capacity, 100);
    }

    #[test]
    fn invalid_range_is_rejected() {
        let err = ConfigLoader::parse(
            r#"
            [dda]
            pps_min = 5.0
            pps_max = 1.0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }
}
