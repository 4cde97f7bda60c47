//! Run seeded encounters between a greedy player and the opponent AI.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bathala_content::{ConfigLoader, ContentFactory, ContentTables};
use bathala_core::{
    CombatPhase, CombatState, DifficultyLevel, Enemy, GameConfig, PersonalityArchetype, RngStream,
    compute_seed, seeded_rng,
};
use bathala_runtime::{
    AiConfig, CombatOutcome, ResourceKind, ScorerKind, Session, SessionConfig, SessionSnapshot,
};
use clap::Parser;

use crate::player::GreedyPlayer;

/// Turns after which a combat counts as a defeat.
const MAX_TURNS: u32 = 30;

const PLAYER_HEALTH: u32 = 80;
const PLAYER_POTIONS: u32 = 1;

/// Stats for creatures the roster cannot spawn.
const FALLBACK_HEALTH: u32 = 40;
const FALLBACK_DAMAGE: u32 = 8;

/// Simulate encounters against one creature
#[derive(Parser, Debug)]
pub struct Simulate {
    /// Creature to fight (see `bathala roster`)
    #[arg(short, long, default_value = "Tikbalang")]
    enemy: String,

    /// Number of consecutive combats
    #[arg(short, long, default_value_t = 5)]
    combats: u32,

    /// Session seed; identical seeds replay identical sessions
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Opponent difficulty level
    #[arg(
        short,
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(u8).range(1..=10)
    )]
    difficulty: u8,

    /// How the opponent chooses its actions (cards or actions)
    #[arg(long, default_value = "cards")]
    scorer: ScorerKind,

    /// Force every creature to one personality
    #[arg(long, value_name = "ARCHETYPE")]
    personality: Option<PersonalityArchetype>,

    /// Raise or lower the level from the player's recent plays
    #[arg(long)]
    auto_difficulty: bool,

    /// Stop the opponent from learning the player's habits
    #[arg(long)]
    no_adaptation: bool,

    /// Log every opponent decision
    #[arg(long)]
    debug: bool,

    /// Directory with roster.ron, abilities.ron, narrative.ron and config.toml
    #[arg(long, value_name = "DIR")]
    content: Option<PathBuf>,

    /// Tuning file (TOML); overrides config.toml from --content
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the session snapshot as JSON
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let (tables, game) = self.load_content()?;
        let base = spawn(&tables, &self.enemy);

        let config = SessionConfig {
            seed: self.seed,
            ai: AiConfig {
                difficulty: DifficultyLevel::new(self.difficulty),
                scorer: self.scorer,
                enable_adaptation: !self.no_adaptation,
                auto_adjust_difficulty: self.auto_difficulty,
                personality_override: self.personality,
                debug: self.debug,
            },
            game,
        };
        let mut session = Session::builder()
            .config(config)
            .tables(tables)
            .build()
            .context("Failed to build session")?;

        let player_rng = seeded_rng(compute_seed(self.seed, u64::MAX, RngStream::Deck));
        let mut player = GreedyPlayer::new(PLAYER_HEALTH, PLAYER_POTIONS, player_rng);

        println!(
            "Simulating {} combat(s) against {} (seed {}, level {}, {} scorer)",
            self.combats, base.name, self.seed, self.difficulty, self.scorer
        );
        for _ in 0..self.combats {
            let outcome = run_combat(&mut session, &mut player, &base)?;
            print_outcome(&outcome);
            player.rest();
        }

        let snapshot = session.snapshot();
        print_summary(&snapshot);
        if let Some(path) = &self.export {
            export(&snapshot, path)?;
            println!("Snapshot written to {}", path.display());
        }
        Ok(())
    }

    fn load_content(&self) -> Result<(ContentTables, GameConfig)> {
        let (tables, mut game) = match &self.content {
            Some(dir) => {
                let factory = ContentFactory::new(dir);
                let tables = factory
                    .load_tables()
                    .with_context(|| format!("Failed to load content from {}", dir.display()))?;
                (tables, factory.load_config()?)
            }
            None => (ContentTables::builtin(), GameConfig::default()),
        };
        if let Some(path) = &self.config {
            game = ConfigLoader::load(path)?;
        }
        Ok((tables, game))
    }
}

fn spawn(tables: &ContentTables, name: &str) -> Enemy {
    tables.roster.spawn(name).unwrap_or_else(|| {
        tracing::warn!(
            "{} has no stat block; using {} health and {} damage",
            name,
            FALLBACK_HEALTH,
            FALLBACK_DAMAGE
        );
        Enemy::new(name, FALLBACK_HEALTH, FALLBACK_DAMAGE)
    })
}

/// Plays one combat to the end: player first, then the opponent, each turn.
fn run_combat(
    session: &mut Session,
    player: &mut GreedyPlayer,
    base: &Enemy,
) -> Result<CombatOutcome> {
    let (_, enemy) = session.start_combat(base, player.health);
    let mut state = CombatState {
        phase: CombatPhase::PlayerTurn,
        turn_number: 1,
        player_health: player.health,
        player_max_health: player.max_health,
        player_block: 0,
        ai_health: enemy.current_health,
        ai_max_health: enemy.max_health,
        ai_block: enemy.block,
        player_hand_size: player.hand_size() as u32,
        ai_hand_size: 0,
    };

    let mut turn = 1;
    let victory = loop {
        state.turn_number = turn;
        state.phase = CombatPhase::PlayerTurn;

        if let Some(healed) = player.maybe_heal() {
            session.resource_used(ResourceKind::Potion, 1)?;
            tracing::debug!("Player drinks a potion (+{} health)", healed);
        }

        let cards = player.choose_play()?;
        if !cards.is_empty() {
            let evaluation = session.player_played(&cards, turn, &state)?;
            let attack = evaluation.total_value.max(0) as u32;
            let damage = attack.saturating_sub(state.ai_block);
            state.ai_block = state.ai_block.saturating_sub(attack);
            state.ai_health = state.ai_health.saturating_sub(damage);
            player.finish_turn(&evaluation);
        }
        state.player_block = player.block;
        state.player_health = player.health;
        state.player_hand_size = player.hand_size() as u32;

        if state.ai_health == 0 {
            break true;
        }

        state.phase = CombatPhase::EnemyTurn;
        let result = session.ai_turn(&state)?;
        tracing::debug!("{}", result.summary());
        let decision = &result.decision;
        state.ai_block += decision.estimated_block;
        if decision.estimated_damage > 0 {
            let taken = player.take_hit(decision.estimated_damage);
            session.player_damaged(taken, player.health, player.max_health)?;
        }
        state.player_block = player.block;
        state.player_health = player.health;
        state.ai_hand_size = session
            .ai()
            .controller()
            .map_or(0, |controller| controller.pool().len() as u32);

        if player.health == 0 {
            break false;
        }
        if turn >= MAX_TURNS {
            tracing::warn!("Combat against {} ran past {} turns", enemy.name, MAX_TURNS);
            break false;
        }
        turn += 1;
    };

    session
        .end_combat(victory, player.health, turn)
        .context("Failed to close combat")
}

fn print_outcome(outcome: &CombatOutcome) {
    let quality = outcome
        .ai
        .as_ref()
        .map_or(0.0, |analytics| analytics.decision_quality);
    println!(
        "{}: {} | PPS {:+.2} -> {:.2} ({}) | enemy health x{:.2} | AI quality {:.0}",
        outcome.combat,
        if outcome.victory { "victory" } else { "defeat" },
        outcome.pps_delta,
        outcome.pps,
        outcome.tier.label(),
        outcome.modifiers.enemy_health,
        quality
    );
    if let Some(narrative) = &outcome.narrative {
        println!("  \"{}\"", narrative.line);
    }
}

fn print_summary(snapshot: &SessionSnapshot) {
    let summary = &snapshot.summary;
    println!(
        "Final: {} won, {} lost ({:.0}%) | PPS {:.2} ({}) | trend {:+.3} | volatility {:.3}",
        summary.wins,
        summary.losses,
        summary.win_rate * 100.0,
        summary.pps,
        summary.tier.label(),
        summary.trend,
        summary.volatility
    );
}

fn export(snapshot: &SessionSnapshot, path: &Path) -> Result<()> {
    let json = snapshot
        .to_json()
        .context("Failed to serialize session snapshot")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulate(args: &[&str]) -> Simulate {
        Simulate::parse_from(std::iter::once("simulate").chain(args.iter().copied()))
    }

    #[test]
    fn arguments_parse() {
        let cmd = simulate(&["--enemy", "Kapre", "-c", "2", "--scorer", "actions"]);
        assert_eq!(cmd.enemy, "Kapre");
        assert_eq!(cmd.combats, 2);
        assert_eq!(cmd.scorer, ScorerKind::Actions);
        assert!(Simulate::try_parse_from(["simulate", "--difficulty", "11"]).is_err());
    }

    #[test]
    fn unknown_creatures_get_fallback_stats() {
        let enemy = spawn(&ContentTables::builtin(), "Wandering Lantern");
        assert_eq!(enemy.max_health, FALLBACK_HEALTH);
        assert_eq!(enemy.damage, FALLBACK_DAMAGE);
    }

    #[test]
    fn combats_always_finish() {
        let mut session = Session::builder().seed(12).build().unwrap();
        let mut player = GreedyPlayer::new(PLAYER_HEALTH, PLAYER_POTIONS, seeded_rng(12));
        let base = spawn(session.ai().tables(), "Bakunawa");
        let outcome = run_combat(&mut session, &mut player, &base).unwrap();
        assert!(outcome.ai.is_some());
        assert_eq!(session.current_combat(), None);
    }

    #[test]
    fn export_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let cmd = simulate(&[
            "--enemy",
            "Dwende",
            "--combats",
            "2",
            "--seed",
            "4",
            "--export",
            path.to_str().unwrap(),
        ]);
        cmd.execute().unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let snapshot = SessionSnapshot::from_json(&written).unwrap();
        assert_eq!(snapshot.combats.len(), 2);
    }
}
