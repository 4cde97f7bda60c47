//! Elemental decks and themed card supply.
//!
//! A standard deck assigns elements by suit (hearts fire, diamonds earth, clubs
//! water, spades air) with wild aces and occasionally neutral face cards. A
//! themed deck re-rolls every element from the theme's weight table to flavor a
//! creature's starting pool.

use std::collections::HashMap;

use bathala_core::{Card, CardSupplier, DeckTheme, Element, Rank, Suit};
use rand::Rng;
use rand::RngCore;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use strum::IntoEnumIterator;

/// Element weights of a theme.
pub fn theme_weights(theme: DeckTheme) -> &'static [(Element, f32)] {
    match theme {
        DeckTheme::Fire => &[
            (Element::Fire, 0.6),
            (Element::Air, 0.2),
            (Element::Neutral, 0.2),
        ],
        DeckTheme::Water => &[
            (Element::Water, 0.6),
            (Element::Earth, 0.2),
            (Element::Neutral, 0.2),
        ],
        DeckTheme::Earth => &[
            (Element::Earth, 0.6),
            (Element::Water, 0.2),
            (Element::Neutral, 0.2),
        ],
        DeckTheme::Air => &[
            (Element::Air, 0.6),
            (Element::Fire, 0.2),
            (Element::Neutral, 0.2),
        ],
        DeckTheme::Chaos | DeckTheme::Balanced => &[
            (Element::Fire, 0.2),
            (Element::Water, 0.2),
            (Element::Earth, 0.2),
            (Element::Air, 0.2),
            (Element::Neutral, 0.2),
        ],
    }
}

/// An ordered pile of cards drawn from the top.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// 52 cards with suit-based elements.
    pub fn standard(rng: &mut dyn RngCore) -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::iter() {
            let base = match suit {
                Suit::Hearts => Element::Fire,
                Suit::Diamonds => Element::Earth,
                Suit::Clubs => Element::Water,
                Suit::Spades => Element::Air,
            };
            for rank in Rank::iter() {
                let element = match rank {
                    Rank::Ace => {
                        let all: Vec<Element> = Element::iter().collect();
                        *all.choose(rng).unwrap_or(&base)
                    }
                    Rank::Jack | Rank::Queen | Rank::King if rng.gen_bool(0.3) => Element::Neutral,
                    _ => base,
                };
                cards.push(Card::new(rank, suit, element));
            }
        }
        Self { cards }
    }

    /// 52 cards with elements drawn from the theme's weights.
    pub fn themed(theme: DeckTheme, rng: &mut dyn RngCore) -> Self {
        let weights = theme_weights(theme);
        let mut cards = Vec::with_capacity(52);
        match WeightedIndex::new(weights.iter().map(|(_, weight)| *weight)) {
            Ok(distribution) => {
                for suit in Suit::iter() {
                    for rank in Rank::iter() {
                        let element = weights[distribution.sample(rng)].0;
                        cards.push(Card::new(rank, suit, element));
                    }
                }
            }
            Err(_) => {
                for suit in Suit::iter() {
                    for rank in Rank::iter() {
                        cards.push(Card::new(rank, suit, Element::Neutral));
                    }
                }
            }
        }
        Self { cards }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.cards.shuffle(rng);
    }

    /// Draws up to `count` cards from the top.
    pub fn draw(&mut self, count: usize) -> Vec<Card> {
        let split = self.cards.len().saturating_sub(count);
        let mut drawn = self.cards.split_off(split);
        drawn.reverse();
        drawn
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Supplies themed cards, one shuffled deck per theme, rebuilt when exhausted.
#[derive(Clone, Debug, Default)]
pub struct ThemedSupplier {
    decks: HashMap<DeckTheme, Deck>,
}

impl ThemedSupplier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CardSupplier for ThemedSupplier {
    fn draw(&mut self, theme: DeckTheme, count: usize, rng: &mut dyn RngCore) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(count);
        while drawn.len() < count {
            let deck = self.decks.entry(theme).or_default();
            if deck.is_empty() {
                *deck = Deck::themed(theme, rng);
                deck.shuffle(rng);
            }
            drawn.extend(deck.draw(count - drawn.len()));
        }
        drawn
    }
}
