//! Greedy stand-in for a human player.
//!
//! Holds a hand drawn from a standard elemental deck and always plays the
//! subset with the highest total value.

use anyhow::Result;
use bathala_content::Deck;
use bathala_core::{AiRng, Card, HandEvaluation};
use bathala_runtime::providers::ai::card_subsets;

pub const HAND_SIZE: usize = 8;

/// Share of max health below which the player drinks a potion.
const POTION_THRESHOLD: f32 = 0.3;

pub struct GreedyPlayer {
    pub max_health: u32,
    pub health: u32,
    pub block: u32,
    potions: u32,
    hand: Vec<Card>,
    deck: Deck,
    rng: AiRng,
}

impl GreedyPlayer {
    pub fn new(max_health: u32, potions: u32, mut rng: AiRng) -> Self {
        let mut deck = Deck::standard(&mut rng);
        deck.shuffle(&mut rng);
        let mut player = Self {
            max_health,
            health: max_health,
            block: 0,
            potions,
            hand: Vec::with_capacity(HAND_SIZE),
            deck,
            rng,
        };
        player.draw_up();
        player
    }

    /// Fresh health and a fresh hand for the next combat.
    pub fn rest(&mut self) {
        self.health = self.max_health;
        self.block = 0;
        self.hand.clear();
        self.draw_up();
    }

    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    /// Picks the strongest play and removes it from the hand.
    pub fn choose_play(&mut self) -> Result<Vec<Card>> {
        let best = card_subsets(&self.hand)?
            .into_iter()
            .map(|hand| {
                let evaluation = hand.evaluate();
                (hand, evaluation)
            })
            .max_by(|(_, a), (_, b)| a.compare_strength(b));

        let Some((hand, _)) = best else {
            return Ok(Vec::new());
        };
        let cards = hand.cards().to_vec();
        for card in &cards {
            if let Some(index) = self.hand.iter().position(|held| held == card) {
                self.hand.swap_remove(index);
            }
        }
        Ok(cards)
    }

    /// Applies a played hand's block and refills the hand.
    pub fn finish_turn(&mut self, evaluation: &HandEvaluation) {
        self.block = evaluation.block_value.max(0) as u32;
        self.draw_up();
    }

    /// Damage after block.
    pub fn take_hit(&mut self, damage: u32) -> u32 {
        let absorbed = damage.min(self.block);
        self.block -= absorbed;
        let taken = (damage - absorbed).min(self.health);
        self.health -= taken;
        taken
    }

    /// Drinks a potion when low. Returns the amount healed.
    pub fn maybe_heal(&mut self) -> Option<u32> {
        let low = (self.health as f32) < self.max_health as f32 * POTION_THRESHOLD;
        if !low || self.potions == 0 || self.health == 0 {
            return None;
        }
        self.potions -= 1;
        let healed = (self.max_health / 4).min(self.max_health - self.health);
        self.health += healed;
        Some(healed)
    }

    fn draw_up(&mut self) {
        while self.hand.len() < HAND_SIZE {
            if self.deck.is_empty() {
                self.deck = Deck::standard(&mut self.rng);
                self.deck.shuffle(&mut self.rng);
            }
            let needed = HAND_SIZE - self.hand.len();
            self.hand.extend(self.deck.draw(needed));
        }
    }
}
