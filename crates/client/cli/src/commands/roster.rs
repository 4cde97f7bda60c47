//! List the creatures the opponent AI knows about.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bathala_content::{ContentFactory, CreatureEntry, Roster};
use clap::Parser;

/// Show every creature with its personality and stat block
#[derive(Parser, Debug)]
pub struct ShowRoster {
    /// Directory with roster.ron; built-in creatures when omitted
    #[arg(long, value_name = "DIR")]
    content: Option<PathBuf>,

    /// Include flavor text
    #[arg(short, long)]
    verbose: bool,
}

impl ShowRoster {
    pub fn execute(self) -> Result<()> {
        let roster = match &self.content {
            Some(dir) => ContentFactory::new(dir)
                .load_roster()
                .with_context(|| format!("Failed to load roster from {}", dir.display()))?,
            None => Roster::builtin(),
        };

        println!("{:<14} {:<12} {:<10} {}", "Creature", "Archetype", "Theme", "Stats");
        for entry in roster.entries() {
            println!("{}", describe(entry));
            if self.verbose {
                if let Some(text) = &entry.flavor_text {
                    println!("    {text}");
                }
            }
        }
        println!("{} creature(s)", roster.len());
        Ok(())
    }
}

fn describe(entry: &CreatureEntry) -> String {
    let stats = match &entry.stats {
        Some(stats) => format!(
            "{} hp, {} dmg, {} armor [{}]",
            stats.max_health,
            stats.damage,
            stats.armor,
            stats.attack_pattern.join(" > ")
        ),
        None => "-".to_string(),
    };
    format!(
        "{:<14} {:<12} {:<10} {}",
        entry.name,
        entry.archetype.as_ref(),
        entry.deck_theme.to_string(),
        stats
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bathala_core::PersonalityArchetype;

    #[test]
    fn creatures_without_stats_show_a_dash() {
        let entry = CreatureEntry::new("Wisp", PersonalityArchetype::Calculating);
        assert!(describe(&entry).ends_with('-'));
    }

    #[test]
    fn stat_blocks_list_the_pattern() {
        let entry = CreatureEntry::new("Wisp", PersonalityArchetype::Aggressive).stats(
            30,
            6,
            2,
            &["attack", "defend"],
        );
        assert!(describe(&entry).contains("30 hp, 6 dmg, 2 armor [attack > defend]"));
    }
}
