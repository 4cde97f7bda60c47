//! Candidate plays: every card subset the strategy engine considers.

use bathala_core::{Card, Hand, HandEvaluation, MAX_HAND_SIZE};

use crate::error::Result;

/// One scored, not-yet-chosen subset of the available pool.
///
/// Exists only during a single decision; the chosen one becomes a
/// [`bathala_core::Decision`].
#[derive(Clone, Debug, PartialEq)]
pub struct CandidatePlay {
    pub cards: Vec<Card>,
    pub evaluation: HandEvaluation,
    pub strategic_value: f32,
    /// In `[0.1, 1.0]`.
    pub confidence: f32,
    /// In `[0.0, 1.0]`; 0 is safe.
    pub risk_level: f32,
    pub elemental_synergy: f32,
    /// Damage per card.
    pub efficiency: f32,
    pub reasoning: String,
}

impl CandidatePlay {
    pub fn summary(&self) -> String {
        let cards: Vec<String> = self.cards.iter().map(Card::to_string).collect();
        format!(
            "{} ({} dmg, {:.0}% conf)",
            cards.join(" "),
            self.evaluation.total_value,
            self.confidence * 100.0
        )
    }
}

/// Enumerates every non-empty subset of `cards` with at most five cards.
///
/// Subsets come out by size, then in index order, so ties keep a stable
/// ordering.
///
/// # Returns
///
/// `sum(C(n, k))` for `k = 1..=min(5, n)` hands; 1585 for a pool of 12.
pub fn card_subsets(cards: &[Card]) -> Result<Vec<Hand>> {
    let max_size = cards.len().min(MAX_HAND_SIZE);
    let mut subsets = Vec::new();
    let mut buffer = Vec::with_capacity(MAX_HAND_SIZE);
    for size in 1..=max_size {
        collect_subsets(cards, size, 0, &mut buffer, &mut subsets)?;
    }
    Ok(subsets)
}

fn collect_subsets(
    cards: &[Card],
    size: usize,
    start: usize,
    buffer: &mut Vec<Card>,
    out: &mut Vec<Hand>,
) -> Result<()> {
    if buffer.len() == size {
        out.push(Hand::try_from(buffer.as_slice())?);
        return Ok(());
    }
    let needed = size - buffer.len();
    for index in start..=cards.len() - needed {
        buffer.push(cards[index]);
        collect_subsets(cards, size, index + 1, buffer, out)?;
        buffer.pop();
    }
    Ok(())
}
