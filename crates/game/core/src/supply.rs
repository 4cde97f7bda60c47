//! Boundary to whatever supplies cards.
//!
//! The engine only needs a finite list it can enumerate and remove from. Deck
//! construction, shuffling and element weighting live behind [`CardSupplier`].

use rand::RngCore;

use crate::card::Card;

/// Elemental flavour of a creature's starting pool.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DeckTheme {
    Fire,
    Water,
    Earth,
    Air,
    Chaos,
    #[default]
    Balanced,
}

/// Draws cards without replacement.
pub trait CardSupplier {
    /// Draws up to `count` cards weighted by `theme`.
    ///
    /// Returns fewer cards when the supply runs out.
    fn draw(&mut self, theme: DeckTheme, count: usize, rng: &mut dyn RngCore) -> Vec<Card>;
}
