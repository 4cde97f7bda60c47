//! Playing cards with an elemental affinity.
//!
//! A [`Card`] is an immutable value: identity is structural (rank, suit and
//! element), and nothing in the engine ever mutates one after a deck supplier
//! creates it.

use core::fmt;

/// Card rank, ordered from deuce to ace.
///
/// Aces are high for ordering; straight detection special-cases the ace-low
/// run separately.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Numeric value used for straights and comparisons (2..=14, ace high).
    pub const fn value(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten => 10,
            Self::Jack => 11,
            Self::Queen => 12,
            Self::King => 13,
            Self::Ace => 14,
        }
    }

    /// Short label ("2".."10", "J", "Q", "K", "A").
    pub const fn label(self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::EnumCount,
    strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const fn symbol(self) -> char {
        match self {
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
            Self::Clubs => '♣',
            Self::Spades => '♠',
        }
    }
}

/// Elemental affinity of a card.
///
/// Elements drive the elemental bonus of a hand and the counter-play heuristics
/// of adaptive opponents.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::EnumCount,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    /// Offensive: flat damage per card, ignites at three.
    Fire,
    /// Defensive: block only, never raw damage.
    Water,
    /// Steady damage plus armor at three.
    Earth,
    /// Doubles the hand when every card is air.
    Air,
    /// No affinity.
    Neutral,
}

impl Element {
    /// The element adaptive opponents favour against this one.
    ///
    /// Counters form a cycle over the four true elements; neutral has none.
    pub const fn counter(self) -> Option<Element> {
        match self {
            Self::Fire => Some(Self::Water),
            Self::Water => Some(Self::Earth),
            Self::Earth => Some(Self::Air),
            Self::Air => Some(Self::Fire),
            Self::Neutral => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Fire => "🔥",
            Self::Water => "💧",
            Self::Earth => "🌍",
            Self::Air => "💨",
            Self::Neutral => "⚪",
        }
    }

    /// Index into per-element count arrays.
    pub const fn index(self) -> usize {
        self as usize
    }
}

bitflags::bitflags! {
    /// A set of elements, used for personality preferences.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ElementSet: u8 {
        const FIRE    = 1 << 0;
        const WATER   = 1 << 1;
        const EARTH   = 1 << 2;
        const AIR     = 1 << 3;
        const NEUTRAL = 1 << 4;
    }
}

impl ElementSet {
    /// Returns the single-element set for `element`.
    pub const fn of(element: Element) -> Self {
        match element {
            Element::Fire => Self::FIRE,
            Element::Water => Self::WATER,
            Element::Earth => Self::EARTH,
            Element::Air => Self::AIR,
            Element::Neutral => Self::NEUTRAL,
        }
    }

    pub const fn has(self, element: Element) -> bool {
        self.contains(Self::of(element))
    }
}

/// A single playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub element: Element,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit, element: Element) -> Self {
        Self {
            rank,
            suit,
            element,
        }
    }

    /// Stable identifier such as `"A_spades_fire"`.
    pub fn id(&self) -> String {
        format!("{}_{}_{}", self.rank.label(), self.suit, self.element)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.rank.label(),
            self.suit.symbol(),
            self.element.symbol()
        )
    }
}

/// Per-element card counts for a set of cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElementCounts([u8; 5]);

impl ElementCounts {
    pub fn of(cards: &[Card]) -> Self {
        let mut counts = [0u8; 5];
        for card in cards {
            counts[card.element.index()] = counts[card.element.index()].saturating_add(1);
        }
        Self(counts)
    }

    pub const fn get(&self, element: Element) -> u8 {
        self.0[element.index()]
    }

    /// Number of distinct elements present (neutral included).
    pub fn distinct(&self) -> usize {
        self.0.iter().filter(|&&count| count > 0).count()
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|&count| count as usize).sum()
    }
}
