//! Card-combination scorer.

use bathala_core::AiTuning;
use rand::RngCore;

use super::{ActionScorer, ScoredAction, ScorerKind, ScoringInput};
use crate::error::Result;
use crate::providers::ai::strategy::StrategyEngine;

/// Ranks every subset of the pool through the [`StrategyEngine`].
#[derive(Clone, Debug, Default)]
pub struct CardPlayScorer {
    engine: StrategyEngine,
}

impl CardPlayScorer {
    pub fn new(tuning: AiTuning) -> Self {
        Self {
            engine: StrategyEngine::new(tuning),
        }
    }

    pub fn engine(&self) -> &StrategyEngine {
        &self.engine
    }
}

impl ActionScorer for CardPlayScorer {
    fn kind(&self) -> ScorerKind {
        ScorerKind::Cards
    }

    fn score(&self, input: &ScoringInput<'_>, rng: &mut dyn RngCore) -> Result<ScoredAction> {
        let play =
            self.engine
                .select_play(input.pool, input.ctx, input.profile, input.memory, rng)?;
        Ok(match play {
            Some(play) => ScoredAction::Play(play),
            None if input.pool.is_empty() => ScoredAction::Pass("No cards available".to_string()),
            None => ScoredAction::Pass("No viable card combination available".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bathala_content::ActionBias;
    use bathala_core::{
        Card, Element, Enemy, GameContext, PersonalityProfile, Rank, Suit, seeded_rng,
    };

    use crate::providers::ai::memory::OpponentMemory;

    #[test]
    fn passes_on_empty_pool() {
        let scorer = CardPlayScorer::default();
        let enemy = Enemy::new("Dwende", 25, 6);
        let input = ScoringInput {
            ctx: &GameContext::default(),
            enemy: &enemy,
            profile: &PersonalityProfile::default(),
            memory: &OpponentMemory::default(),
            pool: &[],
            bias: ActionBias::default(),
        };
        let mut rng = seeded_rng(5);
        assert_eq!(
            scorer.score(&input, &mut rng).unwrap(),
            ScoredAction::Pass("No cards available".to_string())
        );
    }

    #[test]
    fn plays_strong_pair() {
        let scorer = CardPlayScorer::default();
        let enemy = Enemy::new("Kapre", 30, 7);
        let pool = [
            Card::new(Rank::King, Suit::Hearts, Element::Fire),
            Card::new(Rank::King, Suit::Diamonds, Element::Fire),
            Card::new(Rank::Three, Suit::Clubs, Element::Water),
        ];
        let input = ScoringInput {
            ctx: &GameContext::default(),
            enemy: &enemy,
            profile: &PersonalityProfile::default(),
            memory: &OpponentMemory::default(),
            pool: &pool,
            bias: ActionBias::default(),
        };
        let mut rng = seeded_rng(5);
        let ScoredAction::Play(play) = scorer.score(&input, &mut rng).unwrap() else {
            panic!("expected a card play");
        };
        assert!(play.evaluation.total_value >= 12);
        assert!(play.cards.iter().filter(|card| card.rank == Rank::King).count() == 2);
    }
}
