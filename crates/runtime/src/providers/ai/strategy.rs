//! Card-play strategy engine.
//!
//! Enumerates every subset of the available pool, scores each with the
//! [`heuristics`](super::scoring::heuristics), filters by the personality's
//! playable threshold and picks one according to the personality.
//!
//! # Selection
//!
//! 1. Discard candidates below `min_playable_value`. If none survive, fall back
//!    to the single best candidate when it clears `min_viable_play`.
//! 2. Stable-sort by strategic value, best first.
//! 3. Random personalities (`randomness_weight > 0.4`) sometimes take the
//!    second or third option.
//! 4. Cautious opponents take the best low-risk option of the top three;
//!    calculating opponents the best efficient one.

use bathala_core::{AiTuning, Card, GameContext, Hand, PersonalityArchetype, PersonalityProfile};
use rand::{Rng, RngCore};

use super::candidate::{CandidatePlay, card_subsets};
use super::memory::OpponentMemory;
use super::scoring::heuristics;
use crate::error::{Result, RuntimeError};

/// Candidates a cautious or calculating opponent reconsiders before settling.
const SHORTLIST: usize = 3;

#[derive(Clone, Debug, Default)]
pub struct StrategyEngine {
    tuning: AiTuning,
}

impl StrategyEngine {
    pub fn new(tuning: AiTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &AiTuning {
        &self.tuning
    }

    /// Chooses a play from `pool`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` for an empty pool or when nothing is worth playing.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::PoolTooLarge`] when the pool exceeds `max_pool_size`.
    pub fn select_play(
        &self,
        pool: &[Card],
        ctx: &GameContext,
        profile: &PersonalityProfile,
        memory: &OpponentMemory,
        rng: &mut dyn RngCore,
    ) -> Result<Option<CandidatePlay>> {
        if pool.len() > self.tuning.max_pool_size {
            return Err(RuntimeError::PoolTooLarge {
                size: pool.len(),
                max: self.tuning.max_pool_size,
            });
        }
        if pool.is_empty() {
            return Ok(None);
        }

        let candidates = self.score_all(pool, ctx, profile, memory, rng)?;
        let total = candidates.len();

        let (mut viable, rejected): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|candidate| candidate.evaluation.total_value >= profile.min_playable_value);

        tracing::debug!(
            "StrategyEngine: {} of {} candidates clear threshold {}",
            viable.len(),
            total,
            profile.min_playable_value
        );

        if viable.is_empty() {
            return Ok(self.fallback(rejected));
        }

        viable.sort_by(|a, b| b.strategic_value.total_cmp(&a.strategic_value));
        let chosen = self.choose(viable, profile, rng);

        if let Some(play) = &chosen {
            tracing::debug!(
                "StrategyEngine: {} chose {} (value={:.1})",
                profile.name(),
                play.summary(),
                play.strategic_value
            );
        }
        Ok(chosen)
    }

    /// Scores every subset of `pool`, in enumeration order.
    pub fn score_all(
        &self,
        pool: &[Card],
        ctx: &GameContext,
        profile: &PersonalityProfile,
        memory: &OpponentMemory,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<CandidatePlay>> {
        let hands = card_subsets(pool)?;
        let mut candidates = Vec::with_capacity(hands.len());
        for hand in &hands {
            candidates.push(self.score(hand, ctx, profile, memory, rng));
        }
        Ok(candidates)
    }

    /// Scores one card subset.
    pub fn score(
        &self,
        hand: &Hand,
        ctx: &GameContext,
        profile: &PersonalityProfile,
        memory: &OpponentMemory,
        rng: &mut dyn RngCore,
    ) -> CandidatePlay {
        let cards = hand.cards();
        let evaluation = hand.evaluate();
        let total = evaluation.total_value;

        let synergy = heuristics::elemental_synergy(cards, profile);
        let type_bonus = heuristics::hand_type_bonus(evaluation.category);

        let mut value = total as f32 * profile.damage_weight
            + synergy * profile.elemental_weight
            + type_bonus * profile.hand_type_weight;
        value *= heuristics::context_multiplier(ctx, total);
        value = heuristics::personality_adjustment(
            value,
            &evaluation,
            cards,
            ctx,
            profile,
            memory,
            rng,
        );
        value = heuristics::adaptive_adjustment(
            value,
            &evaluation,
            cards,
            profile,
            memory,
            self.tuning.opponent_window,
        );
        let strategic_value = value.max(0.0);

        let confidence = heuristics::confidence(&evaluation, synergy, ctx, profile, memory);
        let risk_level = heuristics::risk_level(&evaluation, cards, ctx);
        let reasoning = heuristics::reasoning(&evaluation, cards, ctx, strategic_value, profile);

        CandidatePlay {
            cards: cards.to_vec(),
            efficiency: heuristics::efficiency(total, cards.len()),
            evaluation,
            strategic_value,
            confidence,
            risk_level,
            elemental_synergy: synergy,
            reasoning,
        }
    }

    /// Best candidate overall, provided it is worth anything at all.
    fn fallback(&self, candidates: Vec<CandidatePlay>) -> Option<CandidatePlay> {
        let mut best: Option<CandidatePlay> = None;
        for candidate in candidates {
            if best
                .as_ref()
                .is_none_or(|top| candidate.strategic_value > top.strategic_value)
            {
                best = Some(candidate);
            }
        }

        match best {
            Some(play) if play.evaluation.total_value >= self.tuning.min_viable_play => {
                tracing::debug!("StrategyEngine: falling back to {}", play.summary());
                Some(play)
            }
            _ => {
                tracing::debug!("StrategyEngine: no viable play");
                None
            }
        }
    }

    /// Picks from candidates already sorted best first.
    fn choose(
        &self,
        mut sorted: Vec<CandidatePlay>,
        profile: &PersonalityProfile,
        rng: &mut dyn RngCore,
    ) -> Option<CandidatePlay> {
        if sorted.is_empty() {
            return None;
        }

        if profile.randomness_weight > 0.4 {
            if rng.gen_bool(0.3) && sorted.len() > 1 {
                return Some(sorted.swap_remove(1));
            }
            if rng.gen_bool(0.1) && sorted.len() > 2 {
                return Some(sorted.swap_remove(2));
            }
        }

        let shortlist = sorted.len().min(SHORTLIST);
        let preferred = match profile.archetype {
            PersonalityArchetype::Cautious => sorted[..shortlist]
                .iter()
                .position(|candidate| candidate.risk_level < 0.6),
            PersonalityArchetype::Calculating => sorted[..shortlist]
                .iter()
                .position(|candidate| candidate.efficiency > 8.0),
            _ => None,
        };

        Some(sorted.swap_remove(preferred.unwrap_or(0)))
    }
}
