//! Placement scoring used by the move selector

use serde::{Deserialize, Serialize};

use crate::board::{Coord, Grid, Player, NEIGHBOR_OFFSETS};
use crate::error::{EngineError, Result};
use crate::estimate::Distances;

/// Reward per same-player neighbor along the player's axis
const ALIGNED_WEIGHT: i64 = 3;
/// Penalty per same-player neighbor across the player's axis
const PERPENDICULAR_WEIGHT: i64 = 2;

/// How strongly to value slowing the opponent, by how close they are
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatWeights {
    /// Opponent distance at or below which the threat is critical
    pub critical_distance: u32,
    pub critical: i64,
    /// Opponent distance at or below which the threat is moderate
    pub moderate_distance: u32,
    pub moderate: i64,
    pub low: i64,
}

impl Default for ThreatWeights {
    fn default() -> Self {
        Self {
            critical_distance: 2,
            critical: 10,
            moderate_distance: 4,
            moderate: 4,
            low: 1,
        }
    }
}

impl ThreatWeights {
    /// Multiplier for the opponent's setback given their distance before the move
    pub fn factor(&self, opponent_distance: u32) -> i64 {
        if opponent_distance <= self.critical_distance {
            self.critical
        } else if opponent_distance <= self.moderate_distance {
            self.moderate
        } else {
            self.low
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.low < 0 || self.moderate < self.low || self.critical < self.moderate {
            return Err(EngineError::InvalidConfig(format!(
                "threat weights must satisfy critical >= moderate >= low >= 0 (got {}, {}, {})",
                self.critical, self.moderate, self.low
            )));
        }
        if self.critical_distance > self.moderate_distance {
            return Err(EngineError::InvalidConfig(format!(
                "critical distance {} exceeds moderate distance {}",
                self.critical_distance, self.moderate_distance
            )));
        }
        Ok(())
    }
}

/// Greedy score of a placement from the distances before and after it
///
/// Own progress counts once; the opponent's setback is scaled by how
/// threatening they were before the move.
pub fn placement_score(
    before: &Distances,
    after: &Distances,
    player: Player,
    weights: &ThreatWeights,
) -> i64 {
    let opponent = player.opponent();
    let improvement = before.get(player) as i64 - after.get(player) as i64;
    let setback = after.get(opponent) as i64 - before.get(opponent) as i64;
    improvement + weights.factor(before.get(opponent)) * setback
}

/// Shape score of an empty cell for `player`
///
/// Cells touching own stones are rated by how those stones line up with
/// the player's axis. Isolated cells prefer the middle of the axis.
pub fn structural_score(grid: &Grid, coord: Coord, player: Player) -> i64 {
    let mut aligned = 0;
    let mut perpendicular = 0;
    for &offset in &NEIGHBOR_OFFSETS {
        let Some(n) = grid.offset(coord, offset) else {
            continue;
        };
        if grid.cell(n).is_owned_by(player) {
            if player.is_aligned_offset(offset) {
                aligned += 1;
            } else {
                perpendicular += 1;
            }
        }
    }

    if aligned + perpendicular > 0 {
        ALIGNED_WEIGHT * aligned - PERPENDICULAR_WEIGHT * perpendicular
    } else {
        let k = player.progress(coord) as i64;
        let last = grid.size() as i64 - 1;
        -(2 * k - last).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(a: u32, b: u32) -> Distances {
        Distances { a, b }
    }

    #[test]
    fn test_threat_tiers() {
        let w = ThreatWeights::default();
        assert_eq!(w.factor(0), 10);
        assert_eq!(w.factor(2), 10);
        assert_eq!(w.factor(3), 4);
        assert_eq!(w.factor(4), 4);
        assert_eq!(w.factor(5), 1);
    }

    #[test]
    fn test_placement_score_weights_setback() {
        let w = ThreatWeights::default();
        // B improves by one, A is set back by one while at distance 2
        let score = placement_score(&dist(2, 5), &dist(3, 4), Player::B, &w);
        assert_eq!(score, 1 + 10);
        // Same move against a distant opponent
        let score = placement_score(&dist(7, 5), &dist(8, 4), Player::B, &w);
        assert_eq!(score, 2);
    }

    #[test]
    fn test_validate_rejects_inverted_weights() {
        let w = ThreatWeights {
            critical: 1,
            moderate: 5,
            ..Default::default()
        };
        assert!(w.validate().is_err());
        assert!(ThreatWeights::default().validate().is_ok());
    }

    #[test]
    fn test_structural_prefers_axis_extension() {
        let grid: Grid = "\
            . . . . .
            . . . . .
            . . B . .
            . . . . .
            . . . . .
        "
        .parse()
        .unwrap();
        // (2,3) extends along B's axis; (3,2) sits across it
        assert_eq!(structural_score(&grid, Coord::new(2, 3), Player::B), 3);
        assert_eq!(structural_score(&grid, Coord::new(3, 2), Player::B), -2);
        assert!(
            structural_score(&grid, Coord::new(2, 3), Player::B)
                > structural_score(&grid, Coord::new(3, 2), Player::B)
        );
    }

    #[test]
    fn test_structural_centrality_for_isolated_cells() {
        let grid = Grid::new(5).unwrap();
        assert_eq!(structural_score(&grid, Coord::new(0, 2), Player::B), 0);
        assert_eq!(structural_score(&grid, Coord::new(0, 0), Player::B), -4);
        assert_eq!(structural_score(&grid, Coord::new(2, 0), Player::A), 0);
    }
}
