//! Decision controller: one opponent's turn-by-turn brain.
//!
//! The controller owns everything that changes during a combat (card pool,
//! opponent memory, statistics and logs) and delegates the choice itself to an
//! [`ActionScorer`]. It turns the scorer's proposal into a [`Decision`]:
//!
//! 1. Special-ability interception, when the creature's pattern slot names an
//!    ability worth more than the best play.
//! 2. Difficulty scaling of the chosen evaluation.
//! 3. Bluff rolls, tracked for statistics only.
//! 4. Creature damage flavor and effect tags.
//!
//! The controller never touches external combat state; callers apply the
//! returned estimates.

use std::collections::VecDeque;

use bathala_content::AbilityTable;
use bathala_core::{
    ATTACK_TOKEN, ActionKind, AiRng, AiTuning, Card, CardSupplier, Decision, DifficultyLevel,
    Element, ElementCounts, Enemy, GameContext, HandEvaluation, PersonalityArchetype,
    PersonalityProfile,
};
use rand::{Rng, RngCore};

use super::candidate::CandidatePlay;
use super::flavor::{CreatureFlavor, apply_block_profile, apply_damage_profile};
use super::memory::{ObservedPlay, OpponentMemory};
use super::scoring::{ActionScorer, FixedChoice, ScoredAction, ScorerKind, ScoringInput};
use crate::error::Result;

/// Confidence attached to special-ability substitutions.
const ABILITY_CONFIDENCE: f32 = 0.8;

// ============================================================================
// Statistics
// ============================================================================

/// Running per-combat statistics of one opponent.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AiStatistics {
    pub turns_played: u32,
    pub total_damage_dealt: u64,
    pub hands_played: u32,
    /// Mean scaled total value of the hands played.
    pub average_hand_value: f32,
    pub bluffs_attempted: u32,
    pub successful_bluffs: u32,
    pub special_abilities_used: u32,
    /// Single-element plays of three or more cards.
    pub elemental_combos: u32,
    /// How much the opponent has learned, `0..=100`.
    pub adaptation_level: f32,
}

impl AiStatistics {
    pub fn bluff_success_rate(&self) -> f32 {
        if self.bluffs_attempted == 0 {
            return 0.0;
        }
        self.successful_bluffs as f32 / self.bluffs_attempted as f32
    }
}

/// One entry of the trailing combat log.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CombatRecord {
    pub turn: u32,
    pub kind: ActionKind,
    pub cards: Vec<Card>,
    pub estimated_damage: u32,
    pub estimated_block: u32,
    pub context: GameContext,
}

/// What a decision changes once committed.
enum Outcome {
    Played {
        cards: Vec<Card>,
        scaled: HandEvaluation,
        bluffed: Option<bool>,
    },
    Ability,
    Fixed,
    Pass,
}

// ============================================================================
// Controller
// ============================================================================

pub struct DecisionController {
    enemy: Enemy,
    profile: PersonalityProfile,
    flavor: CreatureFlavor,
    abilities: AbilityTable,
    level: DifficultyLevel,
    tuning: AiTuning,
    scorer: Box<dyn ActionScorer>,
    pool: Vec<Card>,
    memory: OpponentMemory,
    stats: AiStatistics,
    combat_log: VecDeque<CombatRecord>,
    history: VecDeque<Decision>,
    rng: AiRng,
}

impl core::fmt::Debug for DecisionController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DecisionController")
            .field("enemy", &self.enemy.name)
            .field("personality", &self.profile.archetype)
            .field("level", &self.level)
            .field("scorer", &self.scorer.kind())
            .field("pool", &self.pool.len())
            .finish()
    }
}

impl DecisionController {
    /// Creates a card-playing controller with neutral flavor and no abilities.
    pub fn new(enemy: Enemy, profile: PersonalityProfile, tuning: AiTuning, rng: AiRng) -> Self {
        let memory = OpponentMemory::new(profile.memory_depth, profile.adaptation_rate);
        Self {
            scorer: ScorerKind::Cards.build(&tuning),
            enemy,
            profile,
            flavor: CreatureFlavor::default(),
            abilities: AbilityTable::new(),
            level: DifficultyLevel::default(),
            tuning,
            pool: Vec::new(),
            memory,
            stats: AiStatistics::default(),
            combat_log: VecDeque::new(),
            history: VecDeque::new(),
            rng,
        }
    }

    #[must_use]
    pub fn with_flavor(mut self, flavor: CreatureFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    #[must_use]
    pub fn with_abilities(mut self, abilities: AbilityTable) -> Self {
        self.abilities = abilities;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: DifficultyLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_scorer(mut self, kind: ScorerKind) -> Self {
        self.scorer = kind.build(&self.tuning);
        self
    }

    // ------------------------------------------------------------------------
    // Card pool
    // ------------------------------------------------------------------------

    /// Opening pool size: `7 + level`, more for sturdy creatures, capped.
    pub fn initial_pool_size(&self) -> usize {
        let mut size = 7 + self.level.get() as usize;
        if self.enemy.max_health > 80 {
            size += 4;
        } else if self.enemy.max_health > 40 {
            size += 2;
        }
        size.min(self.tuning.max_pool_size)
    }

    /// Draws up to `count` themed cards, never exceeding the pool cap.
    ///
    /// Returns the number of cards added. Fixed-action opponents hold no pool.
    pub fn refill(
        &mut self,
        supplier: &mut dyn CardSupplier,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> usize {
        if !self.scorer.kind().uses_cards() {
            return 0;
        }
        let room = self.tuning.max_pool_size.saturating_sub(self.pool.len());
        let wanted = count.min(room);
        if wanted == 0 {
            return 0;
        }
        let cards = supplier.draw(self.flavor.deck_theme, wanted, rng);
        let added = cards.len();
        self.pool.extend(cards);
        tracing::debug!(
            "{}: drew {} {} cards (pool {})",
            self.enemy.name,
            added,
            self.flavor.deck_theme,
            self.pool.len()
        );
        added
    }

    /// Replaces the pool outright. Cards beyond the cap are dropped.
    pub fn set_pool(&mut self, mut cards: Vec<Card>) {
        cards.truncate(self.tuning.max_pool_size);
        self.pool = cards;
    }

    // ------------------------------------------------------------------------
    // Decisions
    // ------------------------------------------------------------------------

    /// Decides and commits this turn's action.
    ///
    /// # Errors
    ///
    /// Propagates scorer precondition failures.
    pub fn decide(&mut self, ctx: &GameContext) -> Result<Decision> {
        let turn = self.stats.turns_played + 1;
        let mut rng = self.rng.clone();
        let (decision, outcome) = self.build(ctx, turn, &mut rng)?;
        self.rng = rng;

        self.stats.turns_played = turn;
        self.commit(&decision, outcome, ctx);
        self.enemy.advance_pattern();

        tracing::debug!(
            "{} turn {}: {} (confidence {:.2})",
            self.enemy.name,
            turn,
            decision,
            decision.confidence
        );
        Ok(decision)
    }

    /// What [`decide`](Self::decide) would do now, without changing any state.
    pub fn preview(&self, ctx: &GameContext) -> Result<Decision> {
        let mut rng = self.rng.clone();
        let (decision, _) = self.build(ctx, self.stats.turns_played + 1, &mut rng)?;
        Ok(decision)
    }

    fn build(
        &self,
        ctx: &GameContext,
        turn: u32,
        rng: &mut dyn RngCore,
    ) -> Result<(Decision, Outcome)> {
        let input = ScoringInput {
            ctx,
            enemy: &self.enemy,
            profile: &self.profile,
            memory: &self.memory,
            pool: &self.pool,
            bias: self.flavor.action_bias,
        };

        Ok(match self.scorer.score(&input, rng)? {
            ScoredAction::Play(play) => match self.intercept(&play, ctx) {
                Some(ability) => (ability, Outcome::Ability),
                None => self.card_play(play, ctx, turn, rng),
            },
            ScoredAction::Fixed(choice) => self.fixed_action(&choice, turn, rng),
            ScoredAction::Pass(reason) => (Decision::end_turn(reason), Outcome::Pass),
        })
    }

    /// Substitutes the scripted ability when it outvalues the best play.
    fn intercept(&self, play: &CandidatePlay, ctx: &GameContext) -> Option<Decision> {
        let token = self.enemy.current_action();
        if token == ATTACK_TOKEN {
            return None;
        }
        let value = self.abilities.value(token, ctx);
        if value <= play.strategic_value * self.tuning.special_ability_threshold {
            return None;
        }
        tracing::debug!(
            "{}: {} ({:.1}) outvalues best play ({:.1})",
            self.enemy.name,
            token,
            value,
            play.strategic_value
        );
        Some(self.ability_decision(token, ABILITY_CONFIDENCE))
    }

    fn ability_decision(&self, token: &str, confidence: f32) -> Decision {
        Decision {
            kind: ActionKind::Status,
            cards_used: Vec::new(),
            evaluation: None,
            ability: Some(token.to_string()),
            estimated_damage: 0,
            estimated_block: self.abilities.block(token),
            confidence,
            risk_level: 0.3,
            bluff_factor: 0.0,
            reasoning: format!("Using {token} special ability instead of attack"),
            special_effects: vec![self.abilities.description(token)],
        }
    }

    fn card_play(
        &self,
        play: CandidatePlay,
        ctx: &GameContext,
        turn: u32,
        rng: &mut dyn RngCore,
    ) -> (Decision, Outcome) {
        let scaled = play.evaluation.scaled(self.level.modifier());
        let total = scaled.total_value;

        let bluff_factor = self.bluff_factor(&play, total, ctx, rng);

        let damage = apply_damage_profile(
            self.flavor.damage_profile,
            total as f32,
            &play.cards,
            turn,
            rng,
        );
        let mut block = scaled.block_value.max(0) as f32;
        if self.profile.is(PersonalityArchetype::Cautious) {
            block *= 1.5;
        }

        let bluffed =
            (bluff_factor > 0.3).then_some(damage > self.tuning.bluff_success_threshold);

        let decision = Decision {
            kind: ActionKind::Attack,
            cards_used: play.cards.clone(),
            ability: None,
            estimated_damage: damage,
            estimated_block: block as u32,
            confidence: play.confidence,
            risk_level: play.risk_level,
            bluff_factor,
            reasoning: self.enhanced_reasoning(&play.reasoning, ctx),
            special_effects: self.effects(&play.cards, &scaled),
            evaluation: Some(scaled.clone()),
        };
        let outcome = Outcome::Played {
            cards: play.cards,
            scaled,
            bluffed,
        };
        (decision, outcome)
    }

    /// Degree to which a weak play is being pushed as a strong one.
    fn bluff_factor(
        &self,
        play: &CandidatePlay,
        total: i32,
        ctx: &GameContext,
        rng: &mut dyn RngCore,
    ) -> f32 {
        let mut factor: f32 = 0.0;
        if rng.gen_bool(f64::from(self.profile.bluff_chance.clamp(0.0, 1.0))) {
            if total < 20 && play.strategic_value > 30.0 {
                factor = 0.7;
            } else if play.confidence > 0.8 && total < 25 {
                factor = 0.5;
            }
        }
        if ctx.is_desperate() && total < 15 {
            factor = factor.max(0.6);
        }
        factor
    }

    fn enhanced_reasoning(&self, base: &str, ctx: &GameContext) -> String {
        let mut parts = vec![base.to_string()];
        if let Some(text) = &self.flavor.flavor_text {
            parts.push(text.clone());
        }

        if ctx.is_desperate() {
            parts.push("Desperation drives bold tactics".to_string());
        } else if ctx.is_winning_position() {
            parts.push("Maintaining dominance with calculated aggression".to_string());
        } else if ctx.player_health_ratio() < 0.4 {
            parts.push("Victory is within reach".to_string());
        }

        if self.level.get() >= 7 {
            parts.push("Master-level strategic thinking".to_string());
        } else if self.level.get() >= 5 {
            parts.push("Advanced tactical analysis".to_string());
        }
        parts.join("; ")
    }

    fn effects(&self, cards: &[Card], scaled: &HandEvaluation) -> Vec<String> {
        let mut effects: Vec<String> = scaled
            .special_effects
            .iter()
            .map(ToString::to_string)
            .collect();

        let counts = ElementCounts::of(cards);
        let fire = counts.get(Element::Fire);
        if fire >= 2 {
            effects.push(format!("🔥 Fire synergy: +{fire} burn damage next turn"));
        }
        if fire >= 3 {
            effects.push("🔥 Ignite: Burns through block".to_string());
        }
        if cards.len() > 1 && counts.get(Element::Air) as usize == cards.len() {
            effects.push("💨 Air mastery: Cannot be blocked".to_string());
        }
        if counts.get(Element::Earth) >= 3 {
            effects.push("🌍 Earth mastery: +3 armor".to_string());
        }
        if scaled.total_value > 25
            && let Some(signature) = &self.flavor.signature_effect
        {
            effects.push(signature.clone());
        }
        effects
    }

    fn fixed_action(
        &self,
        choice: &FixedChoice,
        turn: u32,
        rng: &mut dyn RngCore,
    ) -> (Decision, Outcome) {
        let modifier = self.level.modifier();
        let weight = choice.weights.get(choice.kind);
        let confidence = weight.clamp(0.1, 1.0);

        let kind = match choice.kind {
            ActionKind::Status => match self.status_token() {
                Some(token) => {
                    let mut decision = self.ability_decision(token, confidence);
                    decision.reasoning = self.fixed_reasoning(ActionKind::Status, weight);
                    return (decision, Outcome::Ability);
                }
                None => ActionKind::Attack,
            },
            other => other,
        };

        let mut decision = Decision::end_turn(self.fixed_reasoning(kind, weight));
        decision.kind = kind;
        decision.confidence = confidence;
        match kind {
            ActionKind::Defend => {
                decision.estimated_block = apply_block_profile(
                    self.flavor.damage_profile,
                    self.enemy.armor as f32 * modifier,
                    rng,
                );
                decision.risk_level = 0.1;
            }
            _ => {
                decision.kind = ActionKind::Attack;
                decision.estimated_damage = apply_damage_profile(
                    self.flavor.damage_profile,
                    self.enemy.damage as f32 * modifier,
                    &[],
                    turn,
                    rng,
                );
                decision.risk_level = self.profile.risk_tolerance;
            }
        }
        (decision, Outcome::Fixed)
    }

    fn fixed_reasoning(&self, kind: ActionKind, weight: f32) -> String {
        let mut parts = vec![format!(
            "{} AI favours {} ({:.0}% preference)",
            self.profile.name(),
            kind,
            weight * 100.0
        )];
        if let Some(text) = &self.flavor.flavor_text {
            parts.push(text.clone());
        }
        parts.join("; ")
    }

    /// Current pattern slot when it names an ability, else the first ability.
    fn status_token(&self) -> Option<&str> {
        let current = self.enemy.current_action();
        if current != ATTACK_TOKEN {
            return Some(current);
        }
        self.enemy
            .attack_pattern
            .iter()
            .map(String::as_str)
            .find(|token| *token != ATTACK_TOKEN)
    }

    fn commit(&mut self, decision: &Decision, outcome: Outcome, ctx: &GameContext) {
        match outcome {
            Outcome::Played {
                cards,
                scaled,
                bluffed,
            } => {
                for card in &cards {
                    if let Some(index) = self.pool.iter().position(|held| held == card) {
                        self.pool.swap_remove(index);
                    }
                }

                let stats = &mut self.stats;
                stats.hands_played += 1;
                stats.total_damage_dealt += u64::from(decision.estimated_damage);
                let played = stats.hands_played as f32;
                stats.average_hand_value +=
                    (scaled.total_value as f32 - stats.average_hand_value) / played;
                if cards.len() > 2 && ElementCounts::of(&cards).distinct() == 1 {
                    stats.elemental_combos += 1;
                }
                if let Some(success) = bluffed {
                    stats.bluffs_attempted += 1;
                    if success {
                        stats.successful_bluffs += 1;
                    }
                }
            }
            Outcome::Ability => self.stats.special_abilities_used += 1,
            Outcome::Fixed => {
                self.stats.total_damage_dealt += u64::from(decision.estimated_damage);
            }
            Outcome::Pass => {}
        }

        self.stats.adaptation_level =
            (self.memory.len() as f32 * self.profile.adaptation_rate * 5.0).min(100.0);

        push_bounded(
            &mut self.combat_log,
            CombatRecord {
                turn: self.stats.turns_played,
                kind: decision.kind,
                cards: decision.cards_used.clone(),
                estimated_damage: decision.estimated_damage,
                estimated_block: decision.estimated_block,
                context: *ctx,
            },
            self.tuning.combat_memory_capacity,
        );
        push_bounded(
            &mut self.history,
            decision.clone(),
            self.tuning.decision_history_capacity,
        );
    }

    // ------------------------------------------------------------------------
    // Learning & configuration
    // ------------------------------------------------------------------------

    /// Remembers one of the opponent's plays.
    pub fn observe(&mut self, play: ObservedPlay) {
        self.memory.record(play);
        self.stats.adaptation_level =
            (self.memory.len() as f32 * self.profile.adaptation_rate * 5.0).min(100.0);
    }

    pub fn set_difficulty_level(&mut self, level: DifficultyLevel) {
        if level != self.level {
            tracing::info!(
                "{}: difficulty {} -> {}",
                self.enemy.name,
                self.level,
                level
            );
        }
        self.level = level;
    }

    /// Forces an archetype, keeping what has been learned so far.
    pub fn override_personality(&mut self, archetype: PersonalityArchetype) {
        self.profile = PersonalityProfile::for_archetype(archetype);
        let mut memory =
            OpponentMemory::new(self.profile.memory_depth, self.profile.adaptation_rate);
        for play in self.memory.plays() {
            memory.record(play.clone());
        }
        self.memory = memory;
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn profile(&self) -> &PersonalityProfile {
        &self.profile
    }

    pub fn flavor(&self) -> &CreatureFlavor {
        &self.flavor
    }

    pub fn level(&self) -> DifficultyLevel {
        self.level
    }

    pub fn scorer_kind(&self) -> ScorerKind {
        self.scorer.kind()
    }

    pub fn pool(&self) -> &[Card] {
        &self.pool
    }

    pub fn memory(&self) -> &OpponentMemory {
        &self.memory
    }

    pub fn stats(&self) -> &AiStatistics {
        &self.stats
    }

    pub fn combat_log(&self) -> impl Iterator<Item = &CombatRecord> {
        self.combat_log.iter()
    }

    pub fn history(&self) -> impl Iterator<Item = &Decision> {
        self.history.iter()
    }
}

fn push_bounded<T>(buffer: &mut VecDeque<T>, item: T, capacity: usize) {
    if capacity == 0 {
        return;
    }
    while buffer.len() >= capacity {
        buffer.pop_front();
    }
    buffer.push_back(item);
}
