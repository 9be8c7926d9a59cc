//! HEXLINK Core - Connection-game engine
//!
//! This crate provides the analytical core of a two-player hex connection
//! game on an N x N rhombus:
//! - Grid model with fixed six-neighbor adjacency
//! - Win detection (player A links top to bottom, B links left to right)
//! - Conversion distance estimation for both players
//! - Automated move selection (greedy one-ply and structural heuristics)
//! - A game session that enforces turn order

pub mod board;
pub mod path;
pub mod connectivity;
pub mod estimate;
pub mod eval;
pub mod ai;
pub mod game;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Cell, Coord, Grid, Player, TrialPlacement, MAX_BOARD_SIZE, MIN_BOARD_SIZE, NEIGHBOR_OFFSETS};
pub use connectivity::{has_won, winner};
pub use estimate::{distance, estimate, Distances, BLOCKED};
pub use eval::ThreatWeights;
pub use ai::{MoveChoice, MoveSelector, Strategy};
pub use game::{Game, GameResult, Placement};
pub use config::{EngineConfig, DEFAULT_BOARD_SIZE};
pub use error::EngineError;
