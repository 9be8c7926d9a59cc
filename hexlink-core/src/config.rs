//! Engine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ai::{MoveSelector, Strategy};
use crate::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::{EngineError, Result};
use crate::eval::ThreatWeights;

/// Default board edge length
pub const DEFAULT_BOARD_SIZE: usize = 11;

/// Board size and automated-player settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub board_size: usize,
    pub strategy: Strategy,
    pub weights: ThreatWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            strategy: Strategy::Greedy,
            weights: ThreatWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(EngineError::InvalidConfig(format!(
                "board_size must be between {} and {}, got {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
            )));
        }
        self.weights.validate()
    }

    /// Selector configured from these settings
    pub fn selector(&self) -> MoveSelector {
        MoveSelector::new(self.strategy).with_weights(self.weights.clone())
    }

    /// Load from a JSON file and validate
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
