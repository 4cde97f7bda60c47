//! Rolling memory of the opponent's observed plays.
//!
//! Bounded by the personality's `memory_depth`; the oldest play drops out once
//! the window is full. Never persisted beyond the session.

use std::collections::{BTreeMap, VecDeque};

use bathala_core::{Card, Element, ElementCounts, GameContext, HandEvaluation};
use strum::IntoEnumIterator;

/// One play the opponent made, as reported by the game loop.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ObservedPlay {
    pub cards: Vec<Card>,
    pub evaluation: HandEvaluation,
    pub turn_number: u32,
    pub context: GameContext,
}

#[derive(Clone, Debug, Default)]
pub struct OpponentMemory {
    plays: VecDeque<ObservedPlay>,
    depth: usize,
    rate: f32,
    /// Exponential moving average of observed totals.
    ema: Option<f32>,
    /// Every element the opponent has played this combat, beyond the window.
    element_tally: BTreeMap<Element, u32>,
}

impl OpponentMemory {
    /// # Arguments
    ///
    /// * `depth` - Plays kept in the rolling window
    /// * `rate` - EMA smoothing factor in `(0, 1]`
    pub fn new(depth: usize, rate: f32) -> Self {
        Self {
            plays: VecDeque::with_capacity(depth),
            depth,
            rate: rate.clamp(0.0, 1.0),
            ema: None,
            element_tally: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, play: ObservedPlay) {
        let total = play.evaluation.total_value as f32;
        self.ema = Some(match self.ema {
            Some(ema) => ema + (total - ema) * self.rate,
            None => total,
        });
        for card in &play.cards {
            *self.element_tally.entry(card.element).or_default() += 1;
        }

        if self.depth == 0 {
            return;
        }
        if self.plays.len() == self.depth {
            self.plays.pop_front();
        }
        self.plays.push_back(play);
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn plays(&self) -> impl Iterator<Item = &ObservedPlay> {
        self.plays.iter()
    }

    /// The most recent `window` plays, oldest first.
    pub fn recent(&self, window: usize) -> impl Iterator<Item = &ObservedPlay> {
        self.plays.iter().skip(self.plays.len().saturating_sub(window))
    }

    /// Mean total value over the most recent `window` plays.
    pub fn average_recent(&self, window: usize) -> Option<f32> {
        let (sum, count) = self
            .recent(window)
            .fold((0.0f32, 0usize), |(sum, count), play| {
                (sum + play.evaluation.total_value as f32, count + 1)
            });
        (count > 0).then(|| sum / count as f32)
    }

    /// Element the opponent used most over the last `window` plays.
    ///
    /// Ties go to the element declared first.
    pub fn most_common_element(&self, window: usize) -> Option<Element> {
        let mut counts = [0usize; 5];
        for play in self.recent(window) {
            let tally = ElementCounts::of(&play.cards);
            for element in Element::iter() {
                counts[element.index()] += tally.get(element) as usize;
            }
        }
        let mut best: Option<(Element, usize)> = None;
        for element in Element::iter() {
            let count = counts[element.index()];
            if count > 0 && best.is_none_or(|(_, top)| count > top) {
                best = Some((element, count));
            }
        }
        best.map(|(element, _)| element)
    }

    pub fn ema(&self) -> Option<f32> {
        self.ema
    }

    pub fn element_tally(&self) -> &BTreeMap<Element, u32> {
        &self.element_tally
    }

    pub fn clear(&mut self) {
        self.plays.clear();
        self.ema = None;
        self.element_tally.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bathala_core::{HandEvaluator, Rank, Suit};

    fn play(cards: &[Card]) -> ObservedPlay {
        ObservedPlay {
            cards: cards.to_vec(),
            evaluation: HandEvaluator::evaluate_cards(cards).unwrap(),
            turn_number: 1,
            context: GameContext::default(),
        }
    }

    #[test]
    fn window_drops_oldest() {
        let mut memory = OpponentMemory::new(2, 0.5);
        let fire = Card::new(Rank::Two, Suit::Hearts, Element::Fire);
        let water = Card::new(Rank::Three, Suit::Clubs, Element::Water);
        memory.record(play(&[fire]));
        memory.record(play(&[water]));
        memory.record(play(&[water]));
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.most_common_element(5), Some(Element::Water));
        assert_eq!(memory.element_tally().get(&Element::Fire), Some(&1));
    }

    #[test]
    fn ema_tracks_totals() {
        let mut memory = OpponentMemory::new(5, 0.5);
        assert_eq!(memory.average_recent(5), None);
        let neutral = Card::new(Rank::Four, Suit::Spades, Element::Neutral);
        memory.record(play(&[neutral]));
        assert_eq!(memory.ema(), Some(5.0));
        let pair = [
            Card::new(Rank::Ace, Suit::Spades, Element::Neutral),
            Card::new(Rank::Ace, Suit::Hearts, Element::Neutral),
        ];
        memory.record(play(&pair));
        assert_eq!(memory.ema(), Some(7.5));
        assert_eq!(memory.average_recent(1), Some(10.0));
    }
}
