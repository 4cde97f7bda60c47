//! Hand evaluation: poker categories generalized to 1-5 cards plus elemental bonuses.
//!
//! [`HandEvaluator`] is a pure function of its input cards. It never caches: the
//! strategy engine re-evaluates every subset each turn because the available
//! pool changes.
//!
//! # Elemental Rules
//!
//! | Element | Contribution |
//! |---------|--------------|
//! | Fire    | +2 damage per card, +5 "Ignite" at three or more |
//! | Water   | +2 block per card, no damage (see [`HandEvaluation::block_value`]) |
//! | Earth   | +1 damage per card, +5 damage and +5 block at three or more |
//! | Air     | an all-air hand of two or more cards adds its base value again |
//!
//! Four or more distinct elements cost 3; a single element across more than two
//! cards earns 3. The bonus is floored at zero after penalties.

use core::cmp::Ordering;
use core::fmt;

use arrayvec::ArrayVec;

use crate::card::{Card, Element, ElementCounts};
use crate::error::{ErrorSeverity, GameError};

/// Maximum number of cards in one played hand.
pub const MAX_HAND_SIZE: usize = 5;

/// Poker hand category, ordered from weakest to strongest.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HandCategory {
    #[default]
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandCategory {
    /// Base damage value of the category. Strictly increasing with category rank.
    pub const fn base_value(self) -> i32 {
        match self {
            Self::HighCard => 5,
            Self::Pair => 10,
            Self::TwoPair => 20,
            Self::ThreeOfAKind => 30,
            Self::Straight => 40,
            Self::Flush => 50,
            Self::FullHouse => 70,
            Self::FourOfAKind => 100,
            Self::StraightFlush => 150,
            Self::RoyalFlush => 200,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::HighCard => "High Card",
            Self::Pair => "Pair",
            Self::TwoPair => "Two Pair",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::Straight => "Straight",
            Self::Flush => "Flush",
            Self::FullHouse => "Full House",
            Self::FourOfAKind => "Four of a Kind",
            Self::StraightFlush => "Straight Flush",
            Self::RoyalFlush => "Royal Flush",
        }
    }

    /// Four of a Kind or better. Counts toward the strategic-quality bonus.
    pub const fn is_high_quality(self) -> bool {
        matches!(
            self,
            Self::FourOfAKind | Self::StraightFlush | Self::RoyalFlush
        )
    }

    /// Full House or better.
    pub const fn is_rare(self) -> bool {
        matches!(
            self,
            Self::FullHouse | Self::FourOfAKind | Self::StraightFlush | Self::RoyalFlush
        )
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Effect tag attached to an evaluation. Ordered as produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "effect", rename_all = "snake_case"))]
pub enum SpecialEffect {
    FireSynergy { damage: i32 },
    Ignite,
    WaterSynergy { block: i32 },
    HealingSpring,
    EarthSynergy { damage: i32 },
    EarthMastery,
    AirMastery { damage: i32 },
    AirSynergy { speed: i32 },
    ElementalChaos { penalty: i32 },
    Purity { element: Element, damage: i32 },
}

impl fmt::Display for SpecialEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FireSynergy { damage } => write!(f, "🔥 Fire synergy: +{damage} damage"),
            Self::Ignite => f.write_str("🔥 Ignite: Burn damage over time"),
            Self::WaterSynergy { block } => write!(f, "💧 Water synergy: +{block} block"),
            Self::HealingSpring => f.write_str("💧 Healing Spring: Restore health"),
            Self::EarthSynergy { damage } => write!(f, "🌍 Earth synergy: +{damage} damage"),
            Self::EarthMastery => f.write_str("🌍 Earth Mastery: +5 damage and armor"),
            Self::AirMastery { damage } => write!(f, "💨 Air Mastery: Double damage (+{damage})"),
            Self::AirSynergy { speed } => write!(f, "💨 Air synergy: +{speed} speed"),
            Self::ElementalChaos { penalty } => write!(f, "⚡ Elemental chaos: -{penalty} damage"),
            Self::Purity { element, damage } => write!(f, "✨ Pure {element}: +{damage} damage"),
        }
    }
}

/// Result of scoring a set of cards.
///
/// Invariants: `total_value == base_value + elemental_bonus` and
/// `elemental_bonus >= 0`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandEvaluation {
    pub category: HandCategory,
    pub base_value: i32,
    pub elemental_bonus: i32,
    pub total_value: i32,
    /// Block granted by the play (water and earth mastery). Never part of `total_value`.
    pub block_value: i32,
    pub special_effects: Vec<SpecialEffect>,
    pub description: String,
}

impl HandEvaluation {
    /// Zero-value evaluation of an empty play.
    pub fn empty() -> Self {
        Self {
            category: HandCategory::HighCard,
            base_value: 0,
            elemental_bonus: 0,
            total_value: 0,
            block_value: 0,
            special_effects: Vec::new(),
            description: "No cards played".to_string(),
        }
    }

    /// Returns a copy with damage and block scaled by a difficulty modifier.
    ///
    /// Base and bonus are scaled separately so the total stays their sum.
    #[must_use]
    pub fn scaled(&self, modifier: f32) -> Self {
        let scale = |value: i32| (value as f32 * modifier).round() as i32;
        let base_value = scale(self.base_value);
        let elemental_bonus = scale(self.elemental_bonus).max(0);
        let mut description = self.description.clone();
        if modifier > 1.0 {
            description.push_str(&format!(" (Enhanced x{modifier:.1})"));
        }
        Self {
            category: self.category,
            base_value,
            elemental_bonus,
            total_value: base_value + elemental_bonus,
            block_value: scale(self.block_value).max(0),
            special_effects: self.special_effects.clone(),
            description,
        }
    }

    /// Orders two evaluations by total value, then by category.
    pub fn compare_strength(&self, other: &Self) -> Ordering {
        self.total_value
            .cmp(&other.total_value)
            .then(self.category.cmp(&other.category))
    }
}

/// Errors raised when a card set cannot be evaluated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HandError {
    #[error("a hand holds at most 5 cards, got {count}")]
    TooManyCards { count: usize },

    #[error("strict evaluation requires exactly 5 cards, got {count}")]
    NotFiveCards { count: usize },
}

impl GameError for HandError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooManyCards { .. } => "HAND_TOO_MANY_CARDS",
            Self::NotFiveCards { .. } => "HAND_NOT_FIVE_CARDS",
        }
    }
}

/// Up to five cards, validated at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hand(ArrayVec<Card, MAX_HAND_SIZE>);

impl Hand {
    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn evaluate(&self) -> HandEvaluation {
        HandEvaluator::evaluate(self)
    }
}

impl TryFrom<&[Card]> for Hand {
    type Error = HandError;

    fn try_from(cards: &[Card]) -> Result<Self, Self::Error> {
        ArrayVec::try_from(cards)
            .map(Self)
            .map_err(|_| HandError::TooManyCards { count: cards.len() })
    }
}

/// Scores card sets into a [`HandEvaluation`].
pub struct HandEvaluator;

impl HandEvaluator {
    /// Evaluates a validated hand. Empty hands yield [`HandEvaluation::empty`].
    pub fn evaluate(hand: &Hand) -> HandEvaluation {
        Self::evaluate_unchecked(hand.cards())
    }

    /// Evaluates any slice of 0-5 cards.
    ///
    /// # Errors
    ///
    /// [`HandError::TooManyCards`] when more than five cards are passed.
    pub fn evaluate_cards(cards: &[Card]) -> Result<HandEvaluation, HandError> {
        Hand::try_from(cards).map(|hand| hand.evaluate())
    }

    /// Strict evaluator for complete five-card hands.
    ///
    /// # Errors
    ///
    /// [`HandError::NotFiveCards`] for any other length.
    pub fn evaluate_five(cards: &[Card]) -> Result<HandEvaluation, HandError> {
        if cards.len() != MAX_HAND_SIZE {
            return Err(HandError::NotFiveCards { count: cards.len() });
        }
        Ok(Self::evaluate_unchecked(cards))
    }

    /// Classifies 1-5 cards. Straights and flushes need all five.
    pub fn categorize(cards: &[Card]) -> HandCategory {
        if cards.len() <= 1 {
            return HandCategory::HighCard;
        }

        let mut rank_counts = [0u8; 15];
        for card in cards {
            rank_counts[card.rank.value() as usize] += 1;
        }
        // Largest and second-largest rank groups
        let (mut first, mut second) = (0u8, 0u8);
        for &count in &rank_counts {
            if count > first {
                second = first;
                first = count;
            } else if count > second {
                second = count;
            }
        }

        let complete = cards.len() == MAX_HAND_SIZE;
        let is_flush = complete && cards.iter().all(|card| card.suit == cards[0].suit);
        let is_straight = complete && Self::is_straight(&rank_counts);

        if is_straight && is_flush {
            if Self::is_broadway(&rank_counts) {
                HandCategory::RoyalFlush
            } else {
                HandCategory::StraightFlush
            }
        } else if first >= 4 {
            HandCategory::FourOfAKind
        } else if first == 3 && second == 2 {
            HandCategory::FullHouse
        } else if is_flush {
            HandCategory::Flush
        } else if is_straight {
            HandCategory::Straight
        } else if first == 3 {
            HandCategory::ThreeOfAKind
        } else if first == 2 && second == 2 {
            HandCategory::TwoPair
        } else if first == 2 {
            HandCategory::Pair
        } else {
            HandCategory::HighCard
        }
    }

    fn evaluate_unchecked(cards: &[Card]) -> HandEvaluation {
        if cards.is_empty() {
            return HandEvaluation::empty();
        }

        let category = Self::categorize(cards);
        let base_value = category.base_value();
        let counts = ElementCounts::of(cards);
        let (elemental_bonus, block_value, special_effects) =
            Self::elemental_bonus(cards.len(), base_value, &counts);

        let dominant = Self::dominant_element(cards, &counts);
        let description = if elemental_bonus > 0 {
            format!("{} ({dominant} enhanced)", category.name())
        } else {
            format!("{} ({dominant})", category.name())
        };

        HandEvaluation {
            category,
            base_value,
            elemental_bonus,
            total_value: base_value + elemental_bonus,
            block_value,
            special_effects,
            description,
        }
    }

    /// Returns `(damage bonus, block, effects)`.
    fn elemental_bonus(
        len: usize,
        base_value: i32,
        counts: &ElementCounts,
    ) -> (i32, i32, Vec<SpecialEffect>) {
        let mut bonus = 0i32;
        let mut block = 0i32;
        let mut effects = Vec::new();

        let fire = counts.get(Element::Fire) as i32;
        if fire > 0 {
            bonus += fire * 2;
            effects.push(SpecialEffect::FireSynergy { damage: fire * 2 });
            if fire >= 3 {
                bonus += 5;
                effects.push(SpecialEffect::Ignite);
            }
        }

        let water = counts.get(Element::Water) as i32;
        if water > 0 {
            block += water * 2;
            effects.push(SpecialEffect::WaterSynergy { block: water * 2 });
            if water >= 3 {
                effects.push(SpecialEffect::HealingSpring);
            }
        }

        let earth = counts.get(Element::Earth) as i32;
        if earth > 0 {
            if earth >= 3 {
                bonus += earth + 5;
                block += 5;
                effects.push(SpecialEffect::EarthMastery);
            } else {
                bonus += earth;
                effects.push(SpecialEffect::EarthSynergy { damage: earth });
            }
        }

        let air = counts.get(Element::Air) as usize;
        if air == len && len > 1 {
            bonus += base_value;
            effects.push(SpecialEffect::AirMastery { damage: base_value });
        } else if air > 0 {
            effects.push(SpecialEffect::AirSynergy { speed: air as i32 });
        }

        let distinct = counts.distinct();
        if distinct > 3 {
            bonus -= 3;
            effects.push(SpecialEffect::ElementalChaos { penalty: 3 });
        }
        if distinct == 1 && len > 2 {
            bonus += 3;
            if let Some(element) = Self::only_element(counts) {
                effects.push(SpecialEffect::Purity { element, damage: 3 });
            }
        }

        (bonus.max(0), block, effects)
    }

    fn only_element(counts: &ElementCounts) -> Option<Element> {
        use strum::IntoEnumIterator;
        Element::iter().find(|&element| counts.get(element) > 0)
    }

    /// Most frequent element; ties go to the element seen first.
    fn dominant_element(cards: &[Card], counts: &ElementCounts) -> Element {
        let mut best = cards[0].element;
        for card in cards {
            if counts.get(card.element) > counts.get(best) {
                best = card.element;
            }
        }
        best
    }

    fn is_straight(rank_counts: &[u8; 15]) -> bool {
        let present: ArrayVec<u8, MAX_HAND_SIZE> = (2u8..=14)
            .filter(|&value| rank_counts[value as usize] > 0)
            .take(MAX_HAND_SIZE)
            .collect();
        if present.len() != MAX_HAND_SIZE {
            return false;
        }
        let ace_low = [2u8, 3, 4, 5, 14];
        present[4] - present[0] == 4 || present.as_slice() == ace_low
    }

    fn is_broadway(rank_counts: &[u8; 15]) -> bool {
        (10..=14).all(|value| rank_counts[value] == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn card(rank: Rank, suit: Suit, element: Element) -> Card {
        Card::new(rank, suit, element)
    }

    #[test]
    fn single_card_is_high_card() {
        let eval = HandEvaluator::evaluate_cards(&[card(Rank::Ace, Suit::Spades, Element::Neutral)])
            .unwrap();
        assert_eq!(eval.category, HandCategory::HighCard);
        assert_eq!(eval.total_value, 5);
        assert_eq!(eval.description, "High Card (neutral)");
    }

    #[test]
    fn empty_hand_is_zero_value() {
        let eval = HandEvaluator::evaluate_cards(&[]).unwrap();
        assert_eq!(eval.total_value, 0);
        assert_eq!(eval.description, "No cards played");
    }

    #[test]
    fn six_cards_rejected() {
        let cards = [card(Rank::Two, Suit::Clubs, Element::Neutral); 6];
        assert_eq!(
            HandEvaluator::evaluate_cards(&cards),
            Err(HandError::TooManyCards { count: 6 })
        );
        assert_eq!(
            HandEvaluator::evaluate_five(&cards[..4]),
            Err(HandError::NotFiveCards { count: 4 })
        );
    }

    #[test]
    fn four_cards_never_straight() {
        let cards = [
            card(Rank::Two, Suit::Hearts, Element::Neutral),
            card(Rank::Three, Suit::Hearts, Element::Neutral),
            card(Rank::Four, Suit::Hearts, Element::Neutral),
            card(Rank::Five, Suit::Hearts, Element::Neutral),
        ];
        assert_eq!(HandEvaluator::categorize(&cards), HandCategory::HighCard);
    }

    #[test]
    fn water_adds_block_not_damage() {
        let cards = [
            card(Rank::Nine, Suit::Hearts, Element::Water),
            card(Rank::Nine, Suit::Clubs, Element::Water),
        ];
        let eval = HandEvaluator::evaluate_cards(&cards).unwrap();
        assert_eq!(eval.category, HandCategory::Pair);
        assert_eq!(eval.elemental_bonus, 0);
        assert_eq!(eval.total_value, 10);
        assert_eq!(eval.block_value, 4);
        assert_eq!(eval.description, "Pair (water)");
    }

    #[test]
    fn fire_ignite_and_purity() {
        let cards = [
            card(Rank::Seven, Suit::Hearts, Element::Fire),
            card(Rank::Seven, Suit::Clubs, Element::Fire),
            card(Rank::Seven, Suit::Spades, Element::Fire),
        ];
        let eval = HandEvaluator::evaluate_cards(&cards).unwrap();
        assert_eq!(eval.category, HandCategory::ThreeOfAKind);
        // 6 synergy + 5 ignite + 3 purity
        assert_eq!(eval.elemental_bonus, 14);
        assert_eq!(eval.total_value, 44);
        assert!(eval.special_effects.contains(&SpecialEffect::Ignite));
        assert_eq!(eval.description, "Three of a Kind (fire enhanced)");
    }

    #[test]
    fn all_air_doubles_base() {
        let cards = [
            card(Rank::King, Suit::Hearts, Element::Air),
            card(Rank::King, Suit::Clubs, Element::Air),
        ];
        let eval = HandEvaluator::evaluate_cards(&cards).unwrap();
        assert_eq!(eval.elemental_bonus, 10);
        assert_eq!(eval.total_value, 20);
    }

    #[test]
    fn chaos_penalty_floors_at_zero() {
        let cards = [
            card(Rank::Two, Suit::Hearts, Element::Water),
            card(Rank::Five, Suit::Clubs, Element::Air),
            card(Rank::Nine, Suit::Spades, Element::Neutral),
            card(Rank::Jack, Suit::Diamonds, Element::Earth),
        ];
        let eval = HandEvaluator::evaluate_cards(&cards).unwrap();
        assert_eq!(eval.elemental_bonus, 0);
        assert_eq!(eval.total_value, eval.base_value);
    }

    #[test]
    fn scaled_keeps_total_invariant() {
        let cards = [
            card(Rank::Queen, Suit::Hearts, Element::Fire),
            card(Rank::Queen, Suit::Spades, Element::Earth),
        ];
        let eval = HandEvaluator::evaluate_cards(&cards).unwrap().scaled(1.5);
        assert_eq!(eval.total_value, eval.base_value + eval.elemental_bonus);
        assert!(eval.description.ends_with("(Enhanced x1.5)"));
    }
}
