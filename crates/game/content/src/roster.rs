//! Creature roster: personality, flavor and stat lookups keyed by creature name.
//!
//! The roster is read-only lookup data. New creatures are added through
//! `roster.ron` without touching engine logic, and an unknown name never blocks
//! a decision: it resolves to the Calculating archetype with neutral flavor.
//!
//! # Lookups
//!
//! | Lookup | Unknown name |
//! |--------|--------------|
//! | [`Roster::archetype_for`] | [`PersonalityArchetype::Calculating`] |
//! | [`Roster::flavor_text`] | `None` |
//! | [`Roster::deck_theme`] | [`DeckTheme::Balanced`] |
//! | [`Roster::damage_profile`] | [`DamageProfile::Standard`] |

use std::collections::HashMap;

use bathala_core::{DeckTheme, Enemy, PersonalityArchetype, PersonalityProfile};

/// Per-creature adjustment of final damage, applied after scoring.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageProfile {
    /// Damage passes through unchanged.
    #[default]
    Standard,
    /// Uniform variance multiplier in `[min, max]`.
    Variance { min: f32, max: f32 },
    /// Flat multiplier with a chance to whiff down to the one-damage floor.
    Heavy { multiplier: f32, miss_chance: f32 },
    /// Flat multiplier, no randomness.
    Steady { multiplier: f32 },
    /// Multiplier applied only to single-element plays.
    ElementalPurity { multiplier: f32 },
    /// `1 + per_turn * turns`, capped.
    Escalating { per_turn: f32, cap: f32 },
}

/// Additive nudges to the fixed-action preferences of a creature.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionBias {
    pub attack: f32,
    pub defend: f32,
    pub status: f32,
}

impl ActionBias {
    pub const fn new(attack: f32, defend: f32, status: f32) -> Self {
        Self {
            attack,
            defend,
            status,
        }
    }
}

/// Spawnable stat block for roster creatures.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureStats {
    pub max_health: u32,
    pub damage: u32,
    pub armor: u32,
    pub attack_pattern: Vec<String>,
}

/// Everything the engine knows about one creature name.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureEntry {
    pub name: String,
    pub archetype: PersonalityArchetype,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flavor_text: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deck_theme: DeckTheme,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_profile: DamageProfile,
    /// Extra effect announced on strong plays (total value above 25).
    #[cfg_attr(feature = "serde", serde(default))]
    pub signature_effect: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub action_bias: ActionBias,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: Option<CreatureStats>,
}

impl CreatureEntry {
    /// Minimal entry: archetype only, neutral flavor.
    pub fn new(name: impl Into<String>, archetype: PersonalityArchetype) -> Self {
        Self {
            name: name.into(),
            archetype,
            flavor_text: None,
            deck_theme: DeckTheme::Balanced,
            damage_profile: DamageProfile::Standard,
            signature_effect: None,
            action_bias: ActionBias::default(),
            stats: None,
        }
    }

    #[must_use]
    pub fn flavor(mut self, text: impl Into<String>) -> Self {
        self.flavor_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: DeckTheme) -> Self {
        self.deck_theme = theme;
        self
    }

    #[must_use]
    pub fn damage(mut self, profile: DamageProfile) -> Self {
        self.damage_profile = profile;
        self
    }

    #[must_use]
    pub fn signature(mut self, effect: impl Into<String>) -> Self {
        self.signature_effect = Some(effect.into());
        self
    }

    #[must_use]
    pub fn bias(mut self, bias: ActionBias) -> Self {
        self.action_bias = bias;
        self
    }

    #[must_use]
    pub fn stats(mut self, max_health: u32, damage: u32, armor: u32, pattern: &[&str]) -> Self {
        self.stats = Some(CreatureStats {
            max_health,
            damage,
            armor,
            attack_pattern: pattern.iter().map(|token| token.to_string()).collect(),
        });
        self
    }
}

/// Name-keyed creature table.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    entries: HashMap<String, CreatureEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, entry: CreatureEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&CreatureEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> Vec<&CreatureEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    pub fn archetype_for(&self, name: &str) -> PersonalityArchetype {
        self.get(name)
            .map(|entry| entry.archetype)
            .unwrap_or_default()
    }

    /// Personality profile for a creature; unknown names get Calculating.
    pub fn profile_for(&self, name: &str) -> PersonalityProfile {
        PersonalityProfile::for_archetype(self.archetype_for(name))
    }

    pub fn flavor_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|entry| entry.flavor_text.as_deref())
    }

    pub fn deck_theme(&self, name: &str) -> DeckTheme {
        self.get(name)
            .map(|entry| entry.deck_theme)
            .unwrap_or_default()
    }

    pub fn damage_profile(&self, name: &str) -> DamageProfile {
        self.get(name)
            .map(|entry| entry.damage_profile)
            .unwrap_or_default()
    }

    pub fn signature_effect(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|entry| entry.signature_effect.as_deref())
    }

    pub fn action_bias(&self, name: &str) -> ActionBias {
        self.get(name)
            .map(|entry| entry.action_bias)
            .unwrap_or_default()
    }

    /// Builds a fresh enemy for a creature with known stats.
    pub fn spawn(&self, name: &str) -> Option<Enemy> {
        let stats = self.get(name)?.stats.as_ref()?;
        Some(
            Enemy::new(name, stats.max_health, stats.damage)
                .with_armor(stats.armor)
                .with_pattern(stats.attack_pattern.iter().cloned()),
        )
    }

    /// The built-in bestiary.
    pub fn builtin() -> Self {
        use DamageProfile::*;
        use PersonalityArchetype::*;

        let mut roster = Self::new();
        let entries = [
            CreatureEntry::new("Tikbalang", Chaotic)
                .flavor("The trickster spirit plays unpredictably")
                .theme(DeckTheme::Air)
                .damage(Variance { min: 0.7, max: 1.3 })
                .signature("🌀 Misdirection: Player loses next card draw")
                .bias(ActionBias::new(0.0, 0.0, 0.15))
                .stats(35, 8, 4, &["attack", "confuse", "attack", "chaos"]),
            CreatureEntry::new("Dwende", Cautious)
                .flavor("The earth spirit plays defensively")
                .theme(DeckTheme::Earth)
                .damage(Steady { multiplier: 0.9 })
                .bias(ActionBias::new(0.0, 0.15, 0.05))
                .stats(25, 6, 5, &["attack", "mischief", "defend"]),
            CreatureEntry::new("Kapre", Elemental)
                .flavor("The tree spirit draws power from nature's elements")
                .theme(DeckTheme::Earth)
                .damage(ElementalPurity { multiplier: 1.25 })
                .signature("🌳 Nature's Blessing: Heals 3 HP")
                .bias(ActionBias::new(0.0, 0.05, 0.1))
                .stats(30, 7, 5, &["attack", "smoke", "nature_blessing"]),
            CreatureEntry::new("Sigbin", Aggressive)
                .flavor("The shadow creature moves with deadly stealth")
                .theme(DeckTheme::Fire)
                .damage(Heavy {
                    multiplier: 1.2,
                    miss_chance: 0.1,
                })
                .signature("👻 Shadow Strike: Ignores 50% of block")
                .bias(ActionBias::new(0.15, 0.0, 0.0)),
            CreatureEntry::new("Tiyanak", Cautious)
                .flavor("The deceptive spirit lures with false innocence")
                .damage(Steady { multiplier: 0.9 })
                .bias(ActionBias::new(0.0, 0.05, 0.1)),
            CreatureEntry::new("Manananggal", Adaptive)
                .flavor("The flying terror strikes with supernatural precision")
                .theme(DeckTheme::Air)
                .signature("🦇 Terror: Player loses 1 block")
                .bias(ActionBias::new(0.1, 0.0, 0.05))
                .stats(50, 12, 8, &["attack", "flight", "terror", "split"]),
            CreatureEntry::new("Aswang", Aggressive)
                .flavor("The shapeshifter hunts with primal cunning")
                .theme(DeckTheme::Fire)
                .damage(Heavy {
                    multiplier: 1.2,
                    miss_chance: 0.1,
                })
                .signature("👹 Intimidate: Player discards lowest card")
                .bias(ActionBias::new(0.15, 0.0, 0.0)),
            CreatureEntry::new("Duwende Chief", Calculating)
                .theme(DeckTheme::Earth)
                .bias(ActionBias::new(0.0, 0.05, 0.05)),
            CreatureEntry::new("Bakunawa", Adaptive)
                .flavor("The dragon's ancient wisdom guides its strategy")
                .theme(DeckTheme::Chaos)
                .damage(Escalating {
                    per_turn: 0.02,
                    cap: 1.5,
                })
                .signature("🐉 Dragon Fear: Player cannot gain block next turn")
                .bias(ActionBias::new(0.1, 0.0, 0.1))
                .stats(100, 18, 12, &["attack", "eclipse", "devour", "dragon_fear"]),
            CreatureEntry::new("Forest Goblin", Cautious),
            CreatureEntry::new("Fire Elemental", Elemental).theme(DeckTheme::Fire),
            CreatureEntry::new("Shadow Beast", Aggressive),
            CreatureEntry::new("Ancient Dragon", Adaptive),
        ];
        for entry in entries {
            roster.insert(entry);
        }
        roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_creature_defaults_to_calculating() {
        let roster = Roster::builtin();
        assert_eq!(
            roster.archetype_for("Mystery Wisp"),
            PersonalityArchetype::Calculating
        );
        assert_eq!(
            roster.profile_for("Mystery Wisp"),
            PersonalityProfile::for_archetype(PersonalityArchetype::Calculating)
        );
        assert_eq!(roster.deck_theme("Mystery Wisp"), DeckTheme::Balanced);
        assert_eq!(roster.damage_profile("Mystery Wisp"), DamageProfile::Standard);
        assert!(roster.flavor_text("Mystery Wisp").is_none());
    }

    #[test]
    fn builtin_mappings() {
        let roster = Roster::builtin();
        assert_eq!(roster.archetype_for("Tikbalang"), PersonalityArchetype::Chaotic);
        assert_eq!(roster.archetype_for("Duwende Chief"), PersonalityArchetype::Calculating);
        assert_eq!(roster.deck_theme("Bakunawa"), DeckTheme::Chaos);
        assert_eq!(roster.len(), 13);
    }

    #[test]
    fn spawn_uses_stats() {
        let roster = Roster::builtin();
        let enemy = roster.spawn("Bakunawa").unwrap();
        assert_eq!(enemy.max_health, 100);
        assert_eq!(enemy.damage, 18);
        assert_eq!(enemy.attack_pattern.len(), 4);
        assert!(roster.spawn("Aswang").is_none());
    }
}
