//! Integration facade over the opponent AI.
//!
//! [`AiManager`] is what a game loop talks to: it builds a
//! [`DecisionController`] per combat from the content tables, keeps its card
//! pool topped up, feeds it the player's plays and reports analytics.
//!
//! # Determinism
//!
//! Each combat derives its decision and deck streams from the manager seed and
//! the combat index, so a replay with the same seed and inputs yields the same
//! turns.

use std::collections::VecDeque;

use bathala_content::ContentTables;
use bathala_core::{
    ActionKind, AiRng, AiTuning, Card, CardSupplier, CombatState, Decision, DifficultyLevel,
    Element, Enemy, GameContext, HandEvaluation, HandEvaluator, PersonalityArchetype,
    PersonalityProfile, RngStream, compute_seed, seeded_rng,
};

use crate::error::{Result, RuntimeError};
use crate::providers::ai::{
    AiStatistics, CreatureFlavor, DecisionController, ObservedPlay, ScorerKind,
};

/// Player plays remembered for analytics and auto difficulty.
const PLAYER_HISTORY_CAPACITY: usize = 50;

/// Plays considered by automatic difficulty adjustment.
const AUTO_DIFFICULTY_WINDOW: usize = 5;

// ============================================================================
// Configuration
// ============================================================================

/// Opponent AI behaviour switches.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub difficulty: DifficultyLevel,
    pub scorer: ScorerKind,
    /// Whether the opponent learns from the player's plays.
    pub enable_adaptation: bool,
    /// Nudge the difficulty level from the player's recent plays.
    pub auto_adjust_difficulty: bool,
    /// Forces every creature to one archetype.
    pub personality_override: Option<PersonalityArchetype>,
    /// Logs every decision at `info` instead of `debug`.
    pub debug: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            difficulty: DifficultyLevel::default(),
            scorer: ScorerKind::default(),
            enable_adaptation: true,
            auto_adjust_difficulty: false,
            personality_override: None,
            debug: false,
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// One executed opponent turn.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AiTurnResult {
    pub decision: Decision,
    pub turn: u32,
    /// Decision quality in `0..=100`.
    pub quality: f32,
    pub status: String,
}

impl AiTurnResult {
    pub fn summary(&self) -> String {
        let decision = &self.decision;
        match decision.kind {
            ActionKind::Attack if !decision.cards_used.is_empty() => {
                let cards: Vec<String> = decision.cards_used.iter().map(Card::to_string).collect();
                format!(
                    "Played {} for {} damage",
                    cards.join(" "),
                    decision.estimated_damage
                )
            }
            ActionKind::Attack => format!("Attacked for {} damage", decision.estimated_damage),
            ActionKind::Defend => format!("Defended for {} block", decision.estimated_block),
            ActionKind::Status => format!(
                "Used special ability: {}",
                decision
                    .special_effects
                    .first()
                    .map(String::as_str)
                    .or(decision.ability.as_deref())
                    .unwrap_or("unknown")
            ),
            ActionKind::EndTurn => "Passed turn".to_string(),
        }
    }
}

/// Snapshot of how the opponent and the player have been doing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AiAnalytics {
    pub enemy: String,
    pub personality: PersonalityArchetype,
    pub difficulty: DifficultyLevel,
    pub stats: AiStatistics,
    pub bluff_success_rate: f32,
    /// Mean decision quality in `0..=100`; zero before the first turn.
    pub decision_quality: f32,
    pub player_plays: usize,
    pub player_average_value: f32,
    pub player_favourite_element: Option<Element>,
}

/// Scores one decision in `0..=100` against the context it was made in.
///
/// # Factors
///
/// - base 50, plus up to 20 from confidence
/// - up to 20 for damage per card
/// - finishing blows and desperate strikes
/// - low risk rewarded; high risk only when cornered
pub fn decision_quality(decision: &Decision, ctx: &GameContext) -> f32 {
    let mut score = 50.0 + decision.confidence * 20.0;
    let damage = decision.estimated_damage as f32;

    if decision.estimated_damage > 0 {
        let per_card = damage / decision.cards_used.len().max(1) as f32;
        score += (per_card * 2.0).min(20.0);
    }

    let ai_ratio = ctx.ai_health_ratio();
    if ai_ratio < 0.3 && damage > 25.0 {
        score += 15.0;
    }
    if ctx.player_health_ratio() < 0.3 && damage > 20.0 {
        score += 20.0;
    }

    if decision.risk_level < 0.3 {
        score += 5.0;
    } else if decision.risk_level > 0.7 {
        score += if ai_ratio < 0.4 { 10.0 } else { -5.0 };
    }

    score.clamp(0.0, 100.0)
}

/// Mean of per-turn decision quality without keeping every sample.
#[derive(Clone, Copy, Debug, Default)]
struct RunningMean {
    total: f64,
    count: u32,
}

impl RunningMean {
    fn push(&mut self, value: f32) {
        self.total += f64::from(value);
        self.count += 1;
    }

    fn mean(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            (self.total / f64::from(self.count)) as f32
        }
    }
}

// ============================================================================
// Manager
// ============================================================================

pub struct AiManager {
    config: AiConfig,
    tuning: AiTuning,
    tables: ContentTables,
    supplier: Box<dyn CardSupplier + Send>,
    controller: Option<DecisionController>,
    deck_rng: AiRng,
    player_history: VecDeque<ObservedPlay>,
    quality: RunningMean,
    seed: u64,
    combats: u64,
}

impl core::fmt::Debug for AiManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AiManager")
            .field("config", &self.config)
            .field("controller", &self.controller)
            .field("combats", &self.combats)
            .finish()
    }
}

impl AiManager {
    pub fn new(
        config: AiConfig,
        tuning: AiTuning,
        tables: ContentTables,
        supplier: Box<dyn CardSupplier + Send>,
        seed: u64,
    ) -> Self {
        Self {
            config,
            tuning,
            tables,
            supplier,
            controller: None,
            deck_rng: seeded_rng(compute_seed(seed, 0, RngStream::Deck)),
            player_history: VecDeque::new(),
            quality: RunningMean::default(),
            seed,
            combats: 0,
        }
    }

    /// Builds the opponent for `enemy` and deals its opening pool.
    ///
    /// A combat already in progress is abandoned.
    pub fn initialize_combat(&mut self, enemy: Enemy) -> &DecisionController {
        if let Some(previous) = &self.controller {
            tracing::warn!(
                "Starting combat against {} while {} is still active; replacing it",
                enemy.name,
                previous.enemy().name
            );
        }

        let roster = &self.tables.roster;
        let archetype = self
            .config
            .personality_override
            .unwrap_or_else(|| roster.archetype_for(&enemy.name));
        let profile = PersonalityProfile::for_archetype(archetype);
        let flavor = CreatureFlavor::from_roster(roster, &enemy.name);
        let name = enemy.name.clone();

        let index = self.combats;
        self.combats += 1;
        self.deck_rng = seeded_rng(compute_seed(self.seed, index, RngStream::Deck));
        let rng = seeded_rng(compute_seed(self.seed, index, RngStream::Decisions));

        let mut controller = DecisionController::new(enemy, profile, self.tuning.clone(), rng)
            .with_flavor(flavor)
            .with_abilities(self.tables.abilities.clone())
            .with_level(self.config.difficulty)
            .with_scorer(self.config.scorer);
        let opening = controller.initial_pool_size();
        controller.refill(self.supplier.as_mut(), opening, &mut self.deck_rng);

        tracing::info!(
            "Combat {} vs {}: {} AI, level {}, {} scorer, {} cards",
            index + 1,
            name,
            archetype,
            self.config.difficulty,
            self.config.scorer,
            controller.pool().len()
        );

        self.quality = RunningMean::default();
        self.controller.insert(controller)
    }

    /// Decides the opponent's turn and refills its pool.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::CombatNotInitialized`] before
    /// [`initialize_combat`](Self::initialize_combat).
    pub fn execute_turn(&mut self, state: &CombatState) -> Result<AiTurnResult> {
        let controller = self
            .controller
            .as_mut()
            .ok_or(RuntimeError::CombatNotInitialized)?;

        let ctx = state.to_context();
        let decision = controller.decide(&ctx)?;
        let used = decision.cards_used.len();
        if used > 0 {
            controller.refill(self.supplier.as_mut(), used, &mut self.deck_rng);
        }

        let quality = decision_quality(&decision, &ctx);
        self.quality.push(quality);
        let turn = controller.stats().turns_played;

        if self.config.debug {
            tracing::info!(
                "[AI] {} turn {}: {} | {}",
                controller.enemy().name,
                turn,
                decision,
                decision.reasoning
            );
        }

        Ok(AiTurnResult {
            status: self.status(),
            decision,
            turn,
            quality,
        })
    }

    /// Records a play made by the player.
    ///
    /// The play always feeds analytics and auto difficulty; the opponent only
    /// learns from it when adaptation is enabled.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::CombatNotInitialized`] without an active combat and
    /// [`RuntimeError::InvalidHand`] for more than five cards.
    pub fn record_player_action(
        &mut self,
        cards: &[Card],
        turn: u32,
        state: &CombatState,
    ) -> Result<HandEvaluation> {
        let controller = self
            .controller
            .as_mut()
            .ok_or(RuntimeError::CombatNotInitialized)?;
        let evaluation = HandEvaluator::evaluate_cards(cards)?;

        let play = ObservedPlay {
            cards: cards.to_vec(),
            evaluation: evaluation.clone(),
            turn_number: turn,
            context: state.to_context(),
        };
        if self.config.enable_adaptation {
            controller.observe(play.clone());
        }
        if self.player_history.len() == PLAYER_HISTORY_CAPACITY {
            self.player_history.pop_front();
        }
        self.player_history.push_back(play);

        if self.config.auto_adjust_difficulty {
            self.auto_adjust_difficulty();
        }
        Ok(evaluation)
    }

    fn auto_adjust_difficulty(&mut self) {
        if self.player_history.len() < AUTO_DIFFICULTY_WINDOW {
            return;
        }
        let recent = self
            .player_history
            .iter()
            .skip(self.player_history.len() - AUTO_DIFFICULTY_WINDOW);
        let average = recent
            .map(|play| play.evaluation.total_value as f32)
            .sum::<f32>()
            / AUTO_DIFFICULTY_WINDOW as f32;

        let level = self.config.difficulty;
        let adjusted = if average > 30.0 && level.get() < 8 {
            level.raised()
        } else if average < 12.0 && level.get() > 2 {
            level.lowered()
        } else {
            return;
        };
        tracing::info!(
            "Auto difficulty: player averaging {:.1}, level {} -> {}",
            average,
            level,
            adjusted
        );
        self.set_difficulty_level(adjusted);
    }

    /// What the opponent would do now, without committing anything.
    pub fn preview_action(&self, state: &CombatState) -> Result<Decision> {
        let controller = self
            .controller
            .as_ref()
            .ok_or(RuntimeError::CombatNotInitialized)?;
        let mut decision = controller.preview(&state.to_context())?;
        decision.reasoning = format!("[SIMULATION] {}", decision.reasoning);
        Ok(decision)
    }

    /// Applies immediately, to the active combat and every later one.
    pub fn set_difficulty_level(&mut self, level: DifficultyLevel) {
        self.config.difficulty = level;
        if let Some(controller) = self.controller.as_mut() {
            controller.set_difficulty_level(level);
        }
    }

    pub fn status(&self) -> String {
        match &self.controller {
            Some(controller) => format!(
                "{} AI | Level {} | {} cards | Adaptation: {:.0}%",
                controller.profile().name(),
                controller.level(),
                controller.pool().len(),
                controller.stats().adaptation_level
            ),
            None => "No active combat".to_string(),
        }
    }

    pub fn analytics(&self) -> Option<AiAnalytics> {
        let controller = self.controller.as_ref()?;
        let stats = controller.stats().clone();

        let player_plays = self.player_history.len();
        let player_average_value = if player_plays == 0 {
            0.0
        } else {
            self.player_history
                .iter()
                .map(|play| play.evaluation.total_value as f32)
                .sum::<f32>()
                / player_plays as f32
        };
        let decision_quality = self.quality.mean();

        Some(AiAnalytics {
            enemy: controller.enemy().name.clone(),
            personality: controller.profile().archetype,
            difficulty: controller.level(),
            bluff_success_rate: stats.bluff_success_rate(),
            stats,
            decision_quality,
            player_plays,
            player_average_value,
            player_favourite_element: favourite_element(&self.player_history),
        })
    }

    /// Closes the active combat, returning its final analytics.
    pub fn end_combat(&mut self) -> Option<AiAnalytics> {
        let analytics = self.analytics();
        if let Some(controller) = self.controller.take() {
            tracing::info!(
                "Combat vs {} closed after {} turns ({} damage dealt)",
                controller.enemy().name,
                controller.stats().turns_played,
                controller.stats().total_damage_dealt
            );
        }
        analytics
    }

    /// Forgets every combat and player play; configuration is kept.
    pub fn reset(&mut self) {
        self.controller = None;
        self.player_history.clear();
        self.quality = RunningMean::default();
        self.combats = 0;
        self.deck_rng = seeded_rng(compute_seed(self.seed, 0, RngStream::Deck));
    }

    pub fn controller(&self) -> Option<&DecisionController> {
        self.controller.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.controller.is_some()
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn tables(&self) -> &ContentTables {
        &self.tables
    }

    pub fn combats_started(&self) -> u64 {
        self.combats
    }
}

fn favourite_element(plays: &VecDeque<ObservedPlay>) -> Option<Element> {
    let mut counts = [0usize; 5];
    for play in plays {
        for card in &play.cards {
            counts[card.element.index()] += 1;
        }
    }
    let mut best: Option<(Element, usize)> = None;
    for play in plays {
        for card in &play.cards {
            let count = counts[card.element.index()];
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((card.element, count));
            }
        }
    }
    best.map(|(element, _)| element)
}
