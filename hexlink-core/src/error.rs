//! Error types for the engine

/// Errors raised by grid construction, placement and configuration
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Cell ({row}, {col}) is outside a {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("Cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("Game is already over")]
    GameOver,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown strategy: {0} (expected greedy, structural or reserved-unimplemented)")]
    UnknownStrategy(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
