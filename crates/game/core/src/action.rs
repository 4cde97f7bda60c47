//! Externally visible opponent decisions.

use core::fmt;

use crate::card::Card;
use crate::hand::HandEvaluation;

/// What the opponent does this turn.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    /// Deal damage, with a card combination or the creature's flat attack.
    Attack,
    /// Gain block.
    Defend,
    /// Use a scripted special ability.
    Status,
    /// Pass: no viable play this turn.
    EndTurn,
}

impl ActionKind {
    /// The three actions a fixed-action opponent chooses between.
    pub const SCORED: [ActionKind; 3] = [Self::Attack, Self::Defend, Self::Status];
}

/// One opponent turn, produced once and never mutated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    pub kind: ActionKind,
    pub cards_used: Vec<Card>,
    /// Difficulty-scaled evaluation of the cards, when cards were played.
    pub evaluation: Option<HandEvaluation>,
    /// Special ability token, for [`ActionKind::Status`] decisions.
    pub ability: Option<String>,
    pub estimated_damage: u32,
    pub estimated_block: u32,
    pub confidence: f32,
    pub risk_level: f32,
    pub bluff_factor: f32,
    pub reasoning: String,
    pub special_effects: Vec<String>,
}

impl Decision {
    /// Pass decision used when nothing clears the play thresholds.
    pub fn end_turn(reasoning: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::EndTurn,
            cards_used: Vec::new(),
            evaluation: None,
            ability: None,
            estimated_damage: 0,
            estimated_block: 0,
            confidence: 0.3,
            risk_level: 0.0,
            bluff_factor: 0.0,
            reasoning: reasoning.into(),
            special_effects: Vec::new(),
        }
    }

    pub fn is_bluff(&self) -> bool {
        self.bluff_factor > 0.3
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::Attack if !self.cards_used.is_empty() => {
                let cards: Vec<String> = self.cards_used.iter().map(Card::to_string).collect();
                write!(f, "plays [{}]", cards.join(" "))?;
                if let Some(evaluation) = &self.evaluation {
                    write!(f, " - {}", evaluation.description)?;
                }
                write!(f, " for {} damage", self.estimated_damage)
            }
            ActionKind::Attack => write!(f, "attacks for {} damage", self.estimated_damage),
            ActionKind::Defend => write!(f, "defends for {} block", self.estimated_block),
            ActionKind::Status => write!(
                f,
                "uses {}",
                self.ability.as_deref().unwrap_or("a special ability")
            ),
            ActionKind::EndTurn => f.write_str("ends turn"),
        }
    }
}
