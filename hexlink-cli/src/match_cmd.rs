//! Play command - self-play games between two selectors
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: resolve_settings(), play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: opening placement, formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use hexlink_core::{
    EngineConfig, Game, GameResult, MoveChoice, MoveSelector, Placement, Player, Strategy,
};

use crate::parse_strategy;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Board size (defaults to the config value)
    #[arg(long)]
    pub size: Option<usize>,

    /// Strategy for player A (top to bottom)
    #[arg(long, value_parser = parse_strategy)]
    pub strategy_a: Option<Strategy>,

    /// Strategy for player B (left to right)
    #[arg(long, value_parser = parse_strategy)]
    pub strategy_b: Option<Strategy>,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Random stones placed before the selectors take over
    #[arg(long, default_value = "2")]
    pub opening: usize,

    /// Play games on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Print the final board of every game
    #[arg(long)]
    pub show_boards: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Settings resolved from flags and config
#[derive(Clone, Debug)]
struct MatchSettings {
    size: usize,
    selector_a: MoveSelector,
    selector_b: MoveSelector,
    opening: usize,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    /// Set when a selector declined to move before the game ended
    stalled_by: Option<Player>,
    moves: Vec<Placement>,
    final_board: String,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    a_wins: usize,
    b_wins: usize,
    unfinished: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Resolve board size and strategies
/// 2. Play the match
/// 3. Report results
pub fn run(args: MatchArgs, config: &EngineConfig, seed: Option<u64>) -> Result<()> {
    let settings = resolve_settings(&args, config)?;

    tracing::info!(
        "Starting match: {} (A) vs {} (B) on {}x{} ({} games, {} opening stones)",
        settings.selector_a.strategy,
        settings.selector_b.strategy,
        settings.size,
        settings.size,
        args.games,
        settings.opening
    );

    let base_seed = seed.unwrap_or_else(|| rand::random());
    let results = play_match(&settings, args.games, base_seed, args.parallel)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Merge command-line flags over the loaded config
fn resolve_settings(args: &MatchArgs, config: &EngineConfig) -> Result<MatchSettings> {
    let size = args.size.unwrap_or(config.board_size);
    let checked = config.clone().with_board_size(size);
    checked
        .validate()
        .with_context(|| format!("Invalid board size: {}", size))?;

    let selector_for = |strategy: Option<Strategy>| {
        MoveSelector::new(strategy.unwrap_or(config.strategy)).with_weights(config.weights.clone())
    };

    Ok(MatchSettings {
        size,
        selector_a: selector_for(args.strategy_a),
        selector_b: selector_for(args.strategy_b),
        opening: args.opening,
    })
}

/// Play all games in the match
fn play_match(
    settings: &MatchSettings,
    games: usize,
    base_seed: u64,
    parallel: bool,
) -> Result<MatchResults> {
    let play = |game_num: usize| -> Result<GameRecord> {
        let seed = base_seed.wrapping_add(game_num as u64);
        let record = play_single_game(settings, game_num + 1, seed)?;
        tracing::info!(
            "Game {}: {:?} ({} moves)",
            record.game_number,
            record.result,
            record.moves.len()
        );
        Ok(record)
    };

    let records: Result<Vec<GameRecord>> = if parallel {
        (0..games).into_par_iter().map(play).collect()
    } else {
        (0..games).map(play).collect()
    };

    Ok(compute_match_statistics(records?))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results, args.show_boards);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game to completion or until a selector declines to move
fn play_single_game(settings: &MatchSettings, game_number: usize, seed: u64) -> Result<GameRecord> {
    let mut game = Game::new(settings.size)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    place_opening(&mut game, settings.opening, &mut rng)?;

    let mut stalled_by = None;
    while !game.result().is_over() {
        let player = game.to_move();
        let selector = match player {
            Player::A => &settings.selector_a,
            Player::B => &settings.selector_b,
        };
        match game.play_selector(selector)? {
            MoveChoice::Place(_) => {}
            MoveChoice::NoLegalMove | MoveChoice::Unimplemented => {
                tracing::warn!(
                    "Game {}: {} selector ({}) made no move",
                    game_number,
                    player,
                    selector.strategy
                );
                stalled_by = Some(player);
                break;
            }
        }
    }

    Ok(GameRecord {
        game_number,
        result: game.result(),
        stalled_by,
        moves: game.history().to_vec(),
        final_board: game.grid().to_string(),
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let a_wins = games
        .iter()
        .filter(|g| g.result == GameResult::Won(Player::A))
        .count();
    let b_wins = games
        .iter()
        .filter(|g| g.result == GameResult::Won(Player::B))
        .count();
    let unfinished = games.len() - a_wins - b_wins;

    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        a_wins,
        b_wins,
        unfinished,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Place `count` random stones, alternating from A, stopping early on a win
fn place_opening(game: &mut Game, count: usize, rng: &mut ChaCha8Rng) -> Result<()> {
    for _ in 0..count {
        if game.result().is_over() {
            break;
        }
        let Some(coord) = game.grid().empty_cells().choose(rng) else {
            break;
        };
        game.place(coord)?;
    }
    Ok(())
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame<'a> {
        game_number: usize,
        result: GameResult,
        stalled_by: Option<Player>,
        moves: &'a [Placement],
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        total_games: usize,
        a_wins: usize,
        b_wins: usize,
        unfinished: usize,
        avg_moves: f32,
        a_win_rate: f32,
        games: Vec<JsonGame<'a>>,
    }

    let total = results.games.len();
    let output = JsonOutput {
        total_games: total,
        a_wins: results.a_wins,
        b_wins: results.b_wins,
        unfinished: results.unfinished,
        avg_moves: results.avg_moves,
        a_win_rate: percent(results.a_wins, total) / 100.0,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: g.result,
                stalled_by: g.stalled_by,
                moves: &g.moves,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults, show_boards: bool) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!(
        "A wins:      {} ({:.1}%)",
        results.a_wins,
        percent(results.a_wins, total)
    );
    println!(
        "B wins:      {} ({:.1}%)",
        results.b_wins,
        percent(results.b_wins, total)
    );
    println!(
        "Unfinished:  {} ({:.1}%)",
        results.unfinished,
        percent(results.unfinished, total)
    );
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        match game.stalled_by {
            Some(p) => println!(
                "  Game {}: stalled on {}'s turn after {} moves",
                game.game_number,
                p,
                game.moves.len()
            ),
            None => println!(
                "  Game {}: {:?} in {} moves",
                game.game_number,
                game.result,
                game.moves.len()
            ),
        }
        if show_boards {
            println!("{}", game.final_board);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
