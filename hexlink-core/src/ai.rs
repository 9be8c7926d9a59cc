//! Automated move selection
//!
//! Each automated turn goes Idle -> Evaluating -> Committed. While
//! evaluating, candidate stones are placed through [`Grid::trial`] so the
//! caller's grid is restored before a choice is returned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Coord, Grid, Player};
use crate::error::{EngineError, Result};
use crate::estimate::estimate;
use crate::eval::{placement_score, structural_score, ThreatWeights};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Move selection strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// One-ply search scored by conversion distances
    #[default]
    Greedy,
    /// Local shape heuristic, no search
    Structural,
    /// Extension slot with no algorithm yet; never picks a move
    #[serde(rename = "reserved-unimplemented")]
    Reserved,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Greedy, Strategy::Structural, Strategy::Reserved];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::Structural => "structural",
            Strategy::Reserved => "reserved-unimplemented",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Strategy::ALL
            .into_iter()
            .find(|st| st.name() == s.trim())
            .ok_or_else(|| EngineError::UnknownStrategy(s.to_string()))
    }
}

/// Outcome of one automated turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveChoice {
    Place(Coord),
    /// Board is full
    NoLegalMove,
    /// The selected strategy declines to choose
    Unimplemented,
}

impl MoveChoice {
    pub fn coord(self) -> Option<Coord> {
        match self {
            MoveChoice::Place(c) => Some(c),
            _ => None,
        }
    }
}

// ============================================================================
// MOVE SELECTOR
// ============================================================================

/// Picks moves for an automated player
#[derive(Clone, Debug, Default)]
pub struct MoveSelector {
    pub strategy: Strategy,
    pub weights: ThreatWeights,
}

impl MoveSelector {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            weights: ThreatWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: ThreatWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Choose a move for `player` without committing it
    ///
    /// The grid is borrowed mutably for trial placements only; it is
    /// unchanged when this returns.
    pub fn choose_move(&self, grid: &mut Grid, player: Player) -> MoveChoice {
        let (first, second) = {
            let mut empties = grid.empty_cells();
            (empties.next(), empties.next())
        };
        match (first, second) {
            (None, _) => return MoveChoice::NoLegalMove,
            (Some(only), None) => {
                tracing::debug!(%player, coord = %only, "forced move");
                return MoveChoice::Place(only);
            }
            _ => {}
        }

        tracing::debug!(%player, strategy = %self.strategy, "evaluating");
        let choice = match self.strategy {
            Strategy::Greedy => self.choose_greedy(grid, player),
            Strategy::Structural => self.choose_structural(grid, player),
            Strategy::Reserved => return MoveChoice::Unimplemented,
        };

        match choice {
            Some(coord) => {
                tracing::debug!(%player, %coord, "committed");
                MoveChoice::Place(coord)
            }
            None => MoveChoice::NoLegalMove,
        }
    }

    /// Try every empty cell, keep the best distance trade-off
    fn choose_greedy(&self, grid: &mut Grid, player: Player) -> Option<Coord> {
        let before = estimate(grid);
        let candidates: Vec<Coord> = grid.empty_cells().collect();

        let mut best: Option<Coord> = None;
        let mut best_score = 0i64;

        for coord in candidates {
            let after = match grid.trial(coord, player) {
                Ok(trial) => estimate(&trial),
                Err(_) => continue,
            };

            if after.get(player) == 0 {
                tracing::trace!(%coord, "winning move");
                return Some(coord);
            }

            let score = placement_score(&before, &after, player, &self.weights);
            tracing::trace!(%coord, score, "candidate");
            if score > best_score {
                best_score = score;
                best = Some(coord);
            }
        }

        best.or_else(|| grid.first_empty())
    }

    /// Highest shape score, first seen on ties
    fn choose_structural(&self, grid: &Grid, player: Player) -> Option<Coord> {
        let mut best: Option<(i64, Coord)> = None;
        for coord in grid.empty_cells() {
            let score = structural_score(grid, coord, player);
            match best {
                Some((best_score, _)) if best_score >= score => {}
                _ => best = Some((score, coord)),
            }
        }
        best.map(|(_, c)| c).or_else(|| grid.first_empty())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::distance;

    #[test]
    fn test_strategy_names() {
        assert_eq!("greedy".parse::<Strategy>().unwrap(), Strategy::Greedy);
        assert_eq!("structural".parse::<Strategy>().unwrap(), Strategy::Structural);
        assert_eq!(
            "reserved-unimplemented".parse::<Strategy>().unwrap(),
            Strategy::Reserved
        );
        assert!(matches!(
            "minimax".parse::<Strategy>(),
            Err(EngineError::UnknownStrategy(_))
        ));
        for s in Strategy::ALL {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
    }

    #[test]
    fn test_strategy_serde_names() {
        let json = serde_json::to_string(&Strategy::Reserved).unwrap();
        assert_eq!(json, "\"reserved-unimplemented\"");
        let s: Strategy = serde_json::from_str("\"structural\"").unwrap();
        assert_eq!(s, Strategy::Structural);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut grid: Grid = "A B\nB A".parse().unwrap();
        for s in Strategy::ALL {
            assert_eq!(
                MoveSelector::new(s).choose_move(&mut grid, Player::B),
                MoveChoice::NoLegalMove
            );
        }
    }

    #[test]
    fn test_single_empty_cell_is_forced() {
        let mut grid: Grid = "A B .\nB A B\nA B A".parse().unwrap();
        for s in Strategy::ALL {
            assert_eq!(
                MoveSelector::new(s).choose_move(&mut grid, Player::A),
                MoveChoice::Place(Coord::new(0, 2))
            );
        }
    }

    #[test]
    fn test_reserved_strategy_declines() {
        let mut grid = Grid::new(4).unwrap();
        let choice = MoveSelector::new(Strategy::Reserved).choose_move(&mut grid, Player::B);
        assert_eq!(choice, MoveChoice::Unimplemented);
        assert_eq!(choice.coord(), None);
    }

    #[test]
    fn test_greedy_takes_immediate_win() {
        let mut grid: Grid = "\
            . . . .
            B B . B
            . . . .
            . . . .
        "
        .parse()
        .unwrap();
        let choice = MoveSelector::new(Strategy::Greedy).choose_move(&mut grid, Player::B);
        assert_eq!(choice, MoveChoice::Place(Coord::new(1, 2)));
    }

    #[test]
    fn test_greedy_blocks_critical_threat() {
        // A needs only (2,1) to connect; B is far away
        let mut grid: Grid = "\
            . A . .
            . A . .
            . . . .
            . A . .
        "
        .parse()
        .unwrap();
        assert_eq!(distance(&grid, Player::A), 1);
        let choice = MoveSelector::new(Strategy::Greedy).choose_move(&mut grid, Player::B);
        let coord = choice.coord().unwrap();
        let mut after = grid.clone();
        after.place(coord, Player::B).unwrap();
        assert!(distance(&after, Player::A) > 1);
    }

    #[test]
    fn test_greedy_falls_back_to_first_empty() {
        // A is already connected and B is sealed off, so every cell scores 0
        let mut grid: Grid = "\
            A . A
            . . A
            . . A
        "
        .parse()
        .unwrap();
        let before = estimate(&grid);
        assert_eq!(before.a, 0);
        assert_eq!(before.b, crate::estimate::BLOCKED);
        let choice = MoveSelector::new(Strategy::Greedy).choose_move(&mut grid, Player::B);
        assert_eq!(choice, MoveChoice::Place(Coord::new(0, 1)));
    }

    #[test]
    fn test_greedy_leaves_grid_untouched() {
        let mut grid: Grid = "\
            . A . . .
            . . B . .
            . A . . .
            . . . B .
            . . . . .
        "
        .parse()
        .unwrap();
        let before = grid.clone();
        let choice = MoveSelector::new(Strategy::Greedy).choose_move(&mut grid, Player::B);
        assert!(choice.coord().is_some());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_choice_is_always_empty() {
        let mut grid: Grid = "\
            A . B
            . B .
            A . .
        "
        .parse()
        .unwrap();
        for s in [Strategy::Greedy, Strategy::Structural] {
            for p in [Player::A, Player::B] {
                let coord = MoveSelector::new(s).choose_move(&mut grid, p).coord().unwrap();
                assert_eq!(grid.get(coord), Some(crate::board::Cell::Empty));
            }
        }
    }

    #[test]
    fn test_structural_extends_along_axis() {
        let mut grid: Grid = "\
            . . . . .
            . . . . .
            . . B . .
            . . . . .
            . . . . .
        "
        .parse()
        .unwrap();
        let choice = MoveSelector::new(Strategy::Structural).choose_move(&mut grid, Player::B);
        // (1,3), (2,1), (2,3) and (3,1) all score 3; (1,3) is scanned first
        assert_eq!(choice, MoveChoice::Place(Coord::new(1, 3)));
    }

    #[test]
    fn test_structural_opens_in_the_middle() {
        let mut grid = Grid::new(5).unwrap();
        let choice = MoveSelector::new(Strategy::Structural).choose_move(&mut grid, Player::B);
        assert_eq!(choice, MoveChoice::Place(Coord::new(0, 2)));
        let choice = MoveSelector::new(Strategy::Structural).choose_move(&mut grid, Player::A);
        assert_eq!(choice, MoveChoice::Place(Coord::new(2, 0)));
    }
}
