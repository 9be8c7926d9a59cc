//! HEXLINK CLI - Command-line interface
//!
//! Commands:
//! - play: Self-play matches between two move selectors
//! - analyze: Report winner, distances and a suggested move for a board file

mod analyze;
mod match_cmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hexlink_core::{EngineConfig, Player, Strategy};

#[derive(Parser)]
#[command(name = "hexlink")]
#[command(about = "HEXLINK connection-game engine")]
struct Cli {
    /// Engine configuration JSON file (flags override its values)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play self-play games between two selectors
    Play(match_cmd::MatchArgs),
    /// Analyze a board snapshot
    Analyze(analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Play(args) => match_cmd::run(args, &config, cli.seed),
        Commands::Analyze(args) => analyze::run(args, &config),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?;
            tracing::info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// clap value parser for strategy names
pub(crate) fn parse_strategy(s: &str) -> std::result::Result<Strategy, String> {
    s.parse().map_err(|e: hexlink_core::EngineError| e.to_string())
}

/// clap value parser for player names
pub(crate) fn parse_player(s: &str) -> std::result::Result<Player, String> {
    s.parse().map_err(|e: hexlink_core::EngineError| e.to_string())
}
