//! Enemy stat blocks.
//!
//! Enemies are plain values. Difficulty scaling returns modified copies and
//! never touches the input.

use crate::context::health_ratio;

/// Pattern token for a plain attack.
pub const ATTACK_TOKEN: &str = "attack";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub name: String,
    pub max_health: u32,
    pub current_health: u32,
    pub block: u32,
    /// Flat damage of a plain attack.
    pub damage: u32,
    /// Flat block of a plain defend.
    pub armor: u32,
    /// Scripted action cycle, e.g. `["attack", "confuse", "attack", "chaos"]`.
    pub attack_pattern: Vec<String>,
    pub pattern_index: usize,
}

impl Enemy {
    /// Creates an enemy at full health with a plain attack pattern.
    pub fn new(name: impl Into<String>, max_health: u32, damage: u32) -> Self {
        Self {
            name: name.into(),
            max_health,
            current_health: max_health,
            block: 0,
            damage,
            armor: damage.div_ceil(2),
            attack_pattern: vec![ATTACK_TOKEN.to_string()],
            pattern_index: 0,
        }
    }

    #[must_use]
    pub fn with_pattern<I, S>(mut self, pattern: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attack_pattern = pattern.into_iter().map(Into::into).collect();
        self.pattern_index = 0;
        self
    }

    #[must_use]
    pub fn with_armor(mut self, armor: u32) -> Self {
        self.armor = armor;
        self
    }

    /// Current pattern slot. An empty pattern always attacks.
    pub fn current_action(&self) -> &str {
        if self.attack_pattern.is_empty() {
            return ATTACK_TOKEN;
        }
        &self.attack_pattern[self.pattern_index % self.attack_pattern.len()]
    }

    pub fn advance_pattern(&mut self) {
        if !self.attack_pattern.is_empty() {
            self.pattern_index = (self.pattern_index + 1) % self.attack_pattern.len();
        }
    }

    pub fn health_ratio(&self) -> f32 {
        health_ratio(self.current_health, self.max_health)
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }
}
