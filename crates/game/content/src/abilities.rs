//! Special-ability table: context-sensitive value, description and block.
//!
//! An opponent whose scripted pattern slot names an ability weighs that ability
//! against its best card play. Values here are game-balance data; the
//! interception rule itself lives in the runtime.

use std::collections::HashMap;

use bathala_core::GameContext;

/// Strategic value used for tokens missing from the table.
pub const DEFAULT_ABILITY_VALUE: f32 = 25.0;

/// When an ability is worth its `high` value instead of its `low` one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityCondition {
    Always,
    OwnHealthBelow(f32),
    OpponentHealthAbove(f32),
    OpponentHealthBelow(f32),
    TurnBefore(u32),
    CardsRemainingAbove(u32),
}

impl AbilityCondition {
    pub fn holds(&self, ctx: &GameContext) -> bool {
        match *self {
            Self::Always => true,
            Self::OwnHealthBelow(ratio) => ctx.ai_health_ratio() < ratio,
            Self::OpponentHealthAbove(ratio) => ctx.player_health_ratio() > ratio,
            Self::OpponentHealthBelow(ratio) => ctx.player_health_ratio() < ratio,
            Self::TurnBefore(turn) => ctx.turn_number < turn,
            Self::CardsRemainingAbove(count) => ctx.cards_remaining > count,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityEntry {
    pub description: String,
    pub condition: AbilityCondition,
    pub high: f32,
    pub low: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: u32,
}

impl AbilityEntry {
    fn new(description: &str, condition: AbilityCondition, high: f32, low: f32) -> Self {
        Self {
            description: description.to_string(),
            condition,
            high,
            low,
            block: 0,
        }
    }

    fn fixed(description: &str, value: f32) -> Self {
        Self::new(description, AbilityCondition::Always, value, value)
    }

    fn with_block(mut self, block: u32) -> Self {
        self.block = block;
        self
    }

    pub fn value(&self, ctx: &GameContext) -> f32 {
        if self.condition.holds(ctx) {
            self.high
        } else {
            self.low
        }
    }
}

/// Token-keyed ability lookup.
#[derive(Clone, Debug, Default)]
pub struct AbilityTable {
    entries: HashMap<String, AbilityEntry>,
}

impl AbilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>, entry: AbilityEntry) {
        self.entries.insert(token.into(), entry);
    }

    pub fn get(&self, token: &str) -> Option<&AbilityEntry> {
        self.entries.get(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Strategic value of using `token` now.
    pub fn value(&self, token: &str, ctx: &GameContext) -> f32 {
        self.get(token)
            .map(|entry| entry.value(ctx))
            .unwrap_or(DEFAULT_ABILITY_VALUE)
    }

    pub fn description(&self, token: &str) -> String {
        match self.get(token) {
            Some(entry) => entry.description.clone(),
            None => format!("⚡ {}: Special ability activated", title_case(token)),
        }
    }

    pub fn block(&self, token: &str) -> u32 {
        self.get(token).map(|entry| entry.block).unwrap_or(0)
    }

    /// The built-in ability set.
    pub fn builtin() -> Self {
        use AbilityCondition::*;

        let mut table = Self::new();
        table.insert(
            "defend",
            AbilityEntry::new("🛡️ Defensive Stance: +10 block", OwnHealthBelow(0.5), 30.0, 15.0)
                .with_block(10),
        );
        table.insert(
            "smoke",
            AbilityEntry::new(
                "💨 Smoke Screen: +8 block, reduce player accuracy",
                OwnHealthBelow(0.6),
                25.0,
                12.0,
            )
            .with_block(8),
        );
        table.insert(
            "block",
            AbilityEntry::new("🛡️ Block: +12 block", OwnHealthBelow(0.4), 35.0, 18.0)
                .with_block(12),
        );
        table.insert(
            "buff",
            AbilityEntry::new("💪 Power Up: +5 damage next turn", TurnBefore(5), 40.0, 20.0),
        );
        table.insert(
            "command",
            AbilityEntry::new("👑 Command: Summons ally creature", TurnBefore(6), 35.0, 15.0),
        );
        table.insert(
            "power_up",
            AbilityEntry::new("💪 Power Up: +5 damage next turn", TurnBefore(7), 30.0, 10.0),
        );
        table.insert(
            "confuse",
            AbilityEntry::new(
                "😵 Confuse: Player discards a random card",
                CardsRemainingAbove(5),
                25.0,
                10.0,
            ),
        );
        table.insert(
            "mischief",
            AbilityEntry::new(
                "😈 Mischief: Shuffles player's hand",
                CardsRemainingAbove(4),
                20.0,
                8.0,
            ),
        );
        table.insert(
            "deceive",
            AbilityEntry::new(
                "🎭 Deceive: Shows false intent next turn",
                OpponentHealthAbove(0.6),
                30.0,
                15.0,
            ),
        );
        table.insert(
            "invisibility",
            AbilityEntry::fixed("👻 Invisibility: Next attack ignores block", 35.0),
        );
        table.insert(
            "shapeshift",
            AbilityEntry::fixed("🔄 Shapeshift: Changes element affinity", 25.0).with_block(5),
        );
        table.insert(
            "split",
            AbilityEntry::new("✂️ Split: Creates copy with half health", OwnHealthBelow(0.3), 40.0, 20.0),
        );
        table.insert(
            "flight",
            AbilityEntry::fixed("🦅 Flight: Immune to ground attacks", 30.0),
        );
        table.insert(
            "eclipse",
            AbilityEntry::new(
                "🌑 Eclipse: Blocks all healing this turn",
                OpponentHealthBelow(0.5),
                45.0,
                25.0,
            ),
        );
        table.insert(
            "devour",
            AbilityEntry::new(
                "🦈 Devour: Steals player cards and gains health",
                CardsRemainingAbove(6),
                50.0,
                30.0,
            ),
        );
        table.insert(
            "summon",
            AbilityEntry::fixed("👑 Summon: Calls an ally to the fight", 35.0),
        );
        table
    }
}

fn title_case(token: &str) -> String {
    token
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
