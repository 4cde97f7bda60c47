use bathala_content::Roster;
use bathala_core::{
    ActionKind, Card, CombatPhase, CombatState, DifficultyLevel, Element, Rank, Suit,
};
use bathala_runtime::{
    AiConfig, ResourceKind, ScorerKind, Session, SessionConfig, SessionSnapshot,
};

fn enemy_turn(state: &CombatState) -> CombatState {
    CombatState {
        phase: CombatPhase::EnemyTurn,
        ..*state
    }
}

fn pair_of_queens() -> [Card; 2] {
    [
        Card::new(Rank::Queen, Suit::Hearts, Element::Fire),
        Card::new(Rank::Queen, Suit::Clubs, Element::Fire),
    ]
}

#[test]
fn one_full_combat() {
    let mut session = Session::builder().seed(21).build().unwrap();
    let base = Roster::builtin().spawn("Kapre").expect("kapre has stats");
    let (combat, enemy) = session.start_combat(&base, 80);

    let mut state = CombatState {
        player_health: 80,
        player_max_health: 80,
        ai_health: enemy.max_health,
        ai_max_health: enemy.max_health,
        ..CombatState::default()
    };

    for turn in 1..=3 {
        state.turn_number = turn;
        let evaluation = session
            .player_played(&pair_of_queens(), turn, &state)
            .unwrap();
        state.ai_health = state
            .ai_health
            .saturating_sub(evaluation.total_value as u32);

        let preview = session.preview(&enemy_turn(&state)).unwrap();
        assert!(preview.reasoning.starts_with("[SIMULATION] "));

        let result = session.ai_turn(&enemy_turn(&state)).unwrap();
        assert!((0.0..=100.0).contains(&result.quality));
        if result.decision.kind == ActionKind::Attack {
            let before = state.player_health;
            state.player_health = before.saturating_sub(result.decision.estimated_damage);
            session
                .player_damaged(before - state.player_health, state.player_health, 80)
                .unwrap();
        }
    }
    session.resource_used(ResourceKind::Potion, 1).unwrap();

    let outcome = session.end_combat(true, state.player_health, 3).unwrap();
    assert_eq!(outcome.combat, combat);
    let ai = outcome.ai.expect("analytics for the closed combat");
    assert_eq!(ai.enemy, "Kapre");
    assert_eq!(ai.player_plays, 3);
    assert_eq!(ai.stats.turns_played, 3);
    assert_eq!(session.current_combat(), None);
}

#[test]
fn fixed_action_sessions_never_play_cards() {
    let config = SessionConfig {
        seed: 5,
        ai: AiConfig {
            scorer: ScorerKind::Actions,
            difficulty: DifficultyLevel::new(8),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut session = Session::builder().config(config).build().unwrap();
    let enemy = Roster::builtin().spawn("Tikbalang").expect("tikbalang has stats");
    session.start_combat(&enemy, 100);

    let mut state = enemy_turn(&CombatState::default());
    for turn in 1..=6 {
        state.turn_number = turn;
        let decision = session.ai_turn(&state).unwrap().decision;
        assert!(decision.cards_used.is_empty());
        assert_ne!(decision.kind, ActionKind::EndTurn);
    }
    assert_eq!(session.ai().controller().map(|c| c.pool().len()), Some(0));
}

#[test]
fn snapshot_survives_json() {
    let mut session = Session::builder().seed(9).build().unwrap();
    let enemy = Roster::builtin().spawn("Dwende").expect("dwende has stats");
    for victory in [true, true, false] {
        session.start_combat(&enemy, 100);
        let state = enemy_turn(&CombatState::default());
        session.ai_turn(&state).unwrap();
        session.end_combat(victory, 90, 4).unwrap();
    }

    let snapshot = session.snapshot();
    assert_eq!(snapshot.combats.len(), 3);
    assert_eq!(snapshot.ai_combats.len(), 3);
    assert_eq!(snapshot.summary.wins, 2);
    assert_eq!(snapshot.tier_progression.len(), snapshot.pps_history.len());

    let restored = SessionSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(restored, snapshot);
}

#[test]
fn exported_snapshot_reloads_from_disk() {
    let mut session = Session::builder().seed(14).build().unwrap();
    let enemy = Roster::builtin().spawn("Kapre").expect("kapre has stats");
    for victory in [true, false] {
        session.start_combat(&enemy, 100);
        session.player_damaged(60, 40, 100).unwrap();
        session.end_combat(victory, 40, 6).unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, session.snapshot().to_json().unwrap()).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let restored = SessionSnapshot::from_json(&written).unwrap();
    assert_eq!(restored, session.snapshot());
    assert_eq!(restored.summary.losses, 1);
    assert!(restored.events.len() > restored.combats.len());
}

#[test]
fn difficulty_level_changes_apply_mid_combat() {
    let mut session = Session::builder().seed(3).build().unwrap();
    let enemy = Roster::builtin().spawn("Manananggal").expect("manananggal has stats");
    session.start_combat(&enemy, 100);
    session.set_difficulty_level(DifficultyLevel::new(10));
    assert_eq!(
        session.ai().controller().map(|c| c.level()),
        Some(DifficultyLevel::new(10))
    );
    assert_eq!(session.config().ai.difficulty, DifficultyLevel::new(10));
}
