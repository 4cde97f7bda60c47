//! Session orchestrator.
//!
//! A [`Session`] pairs the opponent AI with the difficulty engine for one run:
//! enemies are scaled by the live modifiers before the AI sees them, the
//! player's plays feed both the AI's memory and the performance tracker, and
//! closing a combat lets the adjuster react.

use bathala_content::{ContentTables, ThemedSupplier};
use bathala_core::{
    AiRng, Card, CardSupplier, CombatState, Decision, DifficultyLevel, DifficultyTier, Enemy,
    GameConfig, HandEvaluation, RngStream, compute_seed, seeded_rng,
};

use crate::difficulty::{
    AdaptiveModifiers, CombatId, DifficultyAdjuster, NarrativeEvent, ResourceKind, SessionSnapshot,
};
use crate::error::{Result, RuntimeError};
use crate::manager::{AiAnalytics, AiConfig, AiManager, AiTurnResult};

/// Everything needed to reproduce a session.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub seed: u64,
    pub ai: AiConfig,
    pub game: GameConfig,
}

/// What closing a combat changed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CombatOutcome {
    pub combat: CombatId,
    pub victory: bool,
    pub pps_delta: f32,
    pub pps: f32,
    pub tier: DifficultyTier,
    /// Whether the modifiers moved this time.
    pub adjusted: bool,
    pub modifiers: AdaptiveModifiers,
    pub narrative: Option<NarrativeEvent>,
    pub ai: Option<AiAnalytics>,
}

pub struct Session {
    config: SessionConfig,
    ai: AiManager,
    difficulty: DifficultyAdjuster,
    narrative_rng: AiRng,
    combat: Option<CombatId>,
    ai_combats: Vec<AiAnalytics>,
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("ai", &self.ai)
            .field("difficulty", &self.difficulty)
            .field("combat", &self.combat)
            .finish()
    }
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Scales `enemy` by the live modifiers and opens a combat against it.
    ///
    /// # Returns
    ///
    /// The combat's id and the scaled enemy the game loop should use.
    pub fn start_combat(&mut self, enemy: &Enemy, player_health: u32) -> (CombatId, Enemy) {
        let scaled = self.difficulty.apply_enemy_modifiers(enemy);
        tracing::debug!(
            "Session: {} scaled to {} health, {} damage",
            enemy.name,
            scaled.max_health,
            scaled.damage
        );
        self.ai.initialize_combat(scaled.clone());
        let id = self.difficulty.tracker_mut().start_combat(player_health);
        self.combat = Some(id);
        (id, scaled)
    }

    pub fn ai_turn(&mut self, state: &CombatState) -> Result<AiTurnResult> {
        self.ai.execute_turn(state)
    }

    pub fn preview(&self, state: &CombatState) -> Result<Decision> {
        self.ai.preview_action(state)
    }

    /// Records a player play with the AI and the tracker.
    pub fn player_played(
        &mut self,
        cards: &[Card],
        turn: u32,
        state: &CombatState,
    ) -> Result<HandEvaluation> {
        if self.combat.is_none() {
            return Err(RuntimeError::NoActiveCombat);
        }
        let evaluation = self.ai.record_player_action(cards, turn, state)?;
        self.difficulty
            .tracker_mut()
            .record_cards_played(&evaluation, turn)?;
        Ok(evaluation)
    }

    pub fn player_damaged(
        &mut self,
        damage: u32,
        current_health: u32,
        max_health: u32,
    ) -> Result<f32> {
        self.difficulty
            .tracker_mut()
            .record_damage_taken(damage, current_health, max_health)
    }

    pub fn resource_used(&mut self, kind: ResourceKind, amount: u32) -> Result<f32> {
        self.difficulty
            .tracker_mut()
            .record_resource_usage(kind, amount)
    }

    /// Closes the combat, scores it and lets the adjuster react.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::NoActiveCombat`] when no combat is open.
    pub fn end_combat(
        &mut self,
        victory: bool,
        ending_health: u32,
        turns: u32,
    ) -> Result<CombatOutcome> {
        let combat = self.combat.take().ok_or(RuntimeError::NoActiveCombat)?;
        let pps_delta = self
            .difficulty
            .tracker_mut()
            .end_combat(victory, ending_health, turns)?;

        let ai = self.ai.end_combat();
        if let Some(analytics) = &ai {
            self.ai_combats.push(analytics.clone());
        }

        let announced = self.difficulty.announcements();
        let adjusted = self.difficulty.update(&mut self.narrative_rng);
        let narrative = if self.difficulty.announcements() > announced {
            self.difficulty.recent_narrative(1).next().cloned()
        } else {
            None
        };

        Ok(CombatOutcome {
            combat,
            victory,
            pps_delta,
            pps: self.difficulty.tracker().pps(),
            tier: self.difficulty.current_tier(),
            adjusted,
            modifiers: *self.difficulty.modifiers(),
            narrative,
            ai,
        })
    }

    pub fn set_difficulty_level(&mut self, level: DifficultyLevel) {
        self.ai.set_difficulty_level(level);
        self.config.ai.difficulty = level;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut snapshot = self.difficulty.snapshot();
        snapshot.ai_combats = self.ai_combats.clone();
        snapshot
    }

    pub fn status(&self) -> String {
        format!("{} | {}", self.ai.status(), self.difficulty.status())
    }

    /// Back to the state right after [`SessionBuilder::build`].
    pub fn reset(&mut self) {
        self.ai.reset();
        self.difficulty.reset();
        self.narrative_rng = narrative_rng(self.config.seed);
        self.combat = None;
        self.ai_combats.clear();
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn ai(&self) -> &AiManager {
        &self.ai
    }

    pub fn difficulty(&self) -> &DifficultyAdjuster {
        &self.difficulty
    }

    pub fn current_combat(&self) -> Option<CombatId> {
        self.combat
    }
}

fn narrative_rng(seed: u64) -> AiRng {
    seeded_rng(compute_seed(seed, 0, RngStream::Narrative))
}

// ============================================================================
// Builder
// ============================================================================

pub struct SessionBuilder {
    config: SessionConfig,
    tables: Option<ContentTables>,
    supplier: Option<Box<dyn CardSupplier + Send>>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            tables: None,
            supplier: None,
        }
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Content tables; the built-in ones by default.
    pub fn tables(mut self, tables: ContentTables) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Card supply; a [`ThemedSupplier`] by default.
    pub fn supplier(mut self, supplier: impl CardSupplier + Send + 'static) -> Self {
        self.supplier = Some(Box::new(supplier));
        self
    }

    /// # Errors
    ///
    /// [`RuntimeError::InvalidConfig`] when a tunable is out of range.
    pub fn build(self) -> Result<Session> {
        self.config.game.validate()?;

        let tables = self.tables.unwrap_or_else(ContentTables::builtin);
        let supplier = self
            .supplier
            .unwrap_or_else(|| Box::new(ThemedSupplier::new()));
        let difficulty =
            DifficultyAdjuster::new(self.config.game.dda.clone(), tables.narrative.clone());
        let ai = AiManager::new(
            self.config.ai.clone(),
            self.config.game.ai.clone(),
            tables,
            supplier,
            self.config.seed,
        );

        tracing::info!(
            "Session ready: seed {}, level {}, {} scorer",
            self.config.seed,
            self.config.ai.difficulty,
            self.config.ai.scorer
        );

        Ok(Session {
            narrative_rng: narrative_rng(self.config.seed),
            config: self.config,
            ai,
            difficulty,
            combat: None,
            ai_combats: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bathala_core::{CombatPhase, DdaTuning};

    fn state() -> CombatState {
        CombatState {
            phase: CombatPhase::EnemyTurn,
            ..CombatState::default()
        }
    }

    #[test]
    fn invalid_tuning_is_rejected() {
        let mut config = SessionConfig::default();
        config.game.dda = DdaTuning {
            adaptation_rate: 0.0,
            ..DdaTuning::default()
        };
        let err = Session::builder().config(config).build().unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidConfig(_)));
    }

    #[test]
    fn events_need_a_combat() {
        let mut session = Session::builder().seed(1).build().unwrap();
        assert_eq!(
            session.player_damaged(5, 90, 100),
            Err(RuntimeError::NoActiveCombat)
        );
        assert_eq!(
            session.end_combat(true, 100, 3).unwrap_err(),
            RuntimeError::NoActiveCombat
        );
        assert_eq!(
            session.ai_turn(&state()).unwrap_err(),
            RuntimeError::CombatNotInitialized
        );
    }

    #[test]
    fn neutral_session_keeps_enemy_stats() {
        let mut session = Session::builder().seed(2).build().unwrap();
        let enemy = Enemy::new("Kapre", 40, 9);
        let (id, scaled) = session.start_combat(&enemy, 100);
        assert_eq!(id, CombatId(1));
        assert_eq!(scaled.max_health, 40);
        assert_eq!(scaled.damage, 9);
        assert!(session.ai().is_active());
    }

    #[test]
    fn closing_combats_reports_outcome() {
        let mut session = Session::builder().seed(3).build().unwrap();
        let enemy = Enemy::new("Tikbalang", 35, 8);
        for expected in [DifficultyTier::Learning2, DifficultyTier::Thriving1] {
            session.start_combat(&enemy, 100);
            session.ai_turn(&state()).unwrap();
            let outcome = session.end_combat(true, 100, 3).unwrap();
            assert_eq!(outcome.tier, expected);
            assert!(outcome.ai.is_some());
        }
        let snapshot = session.snapshot();
        assert_eq!(snapshot.ai_combats.len(), 2);
        assert_eq!(snapshot.combats.len(), 2);
        assert!(session.difficulty().modifiers().enemy_health > 1.0);
    }

    #[test]
    fn same_seed_same_turns() {
        let run = |seed: u64| {
            let mut session = Session::builder().seed(seed).build().unwrap();
            let enemy = Enemy::new("Sigbin", 30, 7);
            session.start_combat(&enemy, 100);
            let decision = session.ai_turn(&state()).unwrap().decision;
            session.end_combat(false, 10, 11).unwrap();
            decision
        };
        assert_eq!(run(4), run(4));
    }

    #[test]
    fn reset_forgets_the_run() {
        let mut session = Session::builder().seed(5).build().unwrap();
        session.start_combat(&Enemy::new("Sigbin", 30, 7), 100);
        session.end_combat(false, 10, 11).unwrap();
        session.reset();
        assert_eq!(session.difficulty().tracker().pps(), 0.0);
        assert!(session.snapshot().combats.is_empty());
        let (id, _) = session.start_combat(&Enemy::new("Sigbin", 30, 7), 100);
        assert_eq!(id, CombatId(1));
    }
}
