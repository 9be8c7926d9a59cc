//! Analyze command - inspect a board snapshot
//!
//! Reads a board in text notation, then reports the winner (if any), both
//! conversion distances and the move the configured selector would pick.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexlink_core::{
    estimate, winner, Distances, EngineConfig, Grid, MoveChoice, Player, Strategy,
};

use crate::{parse_player, parse_strategy};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Board file in text notation (`.` empty, `A`, `B`; one row per line)
    #[arg(long, value_name = "FILE")]
    pub board: PathBuf,

    /// Side to suggest a move for (defaults to the side to move)
    #[arg(long, value_parser = parse_player)]
    pub player: Option<Player>,

    /// Selector strategy (defaults to the config value)
    #[arg(long, value_parser = parse_strategy)]
    pub strategy: Option<Strategy>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything reported about one board
#[derive(Debug, serde::Serialize)]
struct Analysis {
    size: usize,
    winner: Option<Player>,
    distances: Distances,
    player: Player,
    strategy: Strategy,
    suggestion: MoveChoice,
}

/// Run analyze command
pub fn run(args: AnalyzeArgs, config: &EngineConfig) -> Result<()> {
    let content = std::fs::read_to_string(&args.board)
        .with_context(|| format!("Failed to read board: {}", args.board.display()))?;
    let mut grid: Grid = content
        .parse()
        .with_context(|| format!("Failed to parse board: {}", args.board.display()))?;

    let strategy = args.strategy.unwrap_or(config.strategy);
    let analysis = analyze(&mut grid, args.player, strategy, config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_text(&grid, &analysis);
    }
    Ok(())
}

fn analyze(
    grid: &mut Grid,
    player: Option<Player>,
    strategy: Strategy,
    config: &EngineConfig,
) -> Analysis {
    let player = player.unwrap_or_else(|| side_to_move(grid));
    let selector = config.clone().with_strategy(strategy).selector();

    Analysis {
        size: grid.size(),
        winner: winner(grid),
        distances: estimate(grid),
        player,
        strategy,
        suggestion: selector.choose_move(grid, player),
    }
}

/// A moves first, so equal stone counts mean A is to move
fn side_to_move(grid: &Grid) -> Player {
    if grid.stone_count(Player::A) > grid.stone_count(Player::B) {
        Player::B
    } else {
        Player::A
    }
}

fn print_text(grid: &Grid, analysis: &Analysis) {
    println!("{}", grid);
    match analysis.winner {
        Some(p) => println!("Winner:      {}", p),
        None => println!("Winner:      none"),
    }
    println!("Distance A:  {}", format_distance(&analysis.distances, Player::A));
    println!("Distance B:  {}", format_distance(&analysis.distances, Player::B));
    match analysis.suggestion {
        MoveChoice::Place(c) => println!(
            "Suggestion:  {} plays {} ({})",
            analysis.player, c, analysis.strategy
        ),
        MoveChoice::NoLegalMove => println!("Suggestion:  none, board is full"),
        MoveChoice::Unimplemented => {
            println!("Suggestion:  none, {} does not choose moves", analysis.strategy)
        }
    }
}

fn format_distance(distances: &Distances, player: Player) -> String {
    if distances.is_blocked(player) {
        "blocked".to_string()
    } else {
        distances.get(player).to_string()
    }
}
