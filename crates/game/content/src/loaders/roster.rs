//! Creature roster loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::roster::{CreatureEntry, Roster};

/// Loader for the creature roster from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: `Vec<CreatureEntry>`. Duplicate names keep the last entry.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let entries: Vec<CreatureEntry> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let mut roster = Roster::new();
        for entry in entries {
            if entry.name.trim().is_empty() {
                anyhow::bail!("Roster entry with empty name");
            }
            roster.insert(entry);
        }
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bathala_core::{DeckTheme, PersonalityArchetype};

    #[test]
    fn parses_minimal_entry() {
        let roster = RosterLoader::parse(
            r#"[
                (
                    name: "Bakunawa",
                    archetype: Chaotic,
                    deck_theme: water,
                    damage_profile: Escalating(per_turn: 0.1, cap: 2.0),
                ),
            ]"#,
        )
        .unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.archetype_for("Bakunawa"), PersonalityArchetype::Chaotic);
        assert_eq!(roster.deck_theme("Bakunawa"), DeckTheme::Water);
        assert!(roster.flavor_text("Bakunawa").is_none());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(RosterLoader::parse(r#"[(name: " ", archetype: Cautious)]"#).is_err());
    }
}
