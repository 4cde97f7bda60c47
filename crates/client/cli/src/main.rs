//! Command-line driver for the Bathala opponent AI and difficulty engine.
//!
//! Run with: `bathala <command>`

mod commands;
mod player;

use anyhow::Result;
use clap::Parser;
use commands::{ShowRoster, Simulate};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Bathala combat simulator
#[derive(Parser)]
#[command(name = "bathala")]
#[command(about = "Opponent AI and dynamic difficulty simulator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play seeded combats between a greedy player and the opponent AI
    Simulate(Simulate),

    /// List known creatures
    Roster(ShowRoster),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RUST_LOG)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Roster(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so stdout stays a clean report.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
