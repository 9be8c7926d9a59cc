//! Conversion distance estimation
//!
//! For each player: the fewest empty cells that must still be claimed to
//! complete a connection, treating opponent stones as walls. Zero means the
//! player is already connected. Every call recomputes from scratch.

use serde::{Deserialize, Serialize};

use crate::board::{Grid, Player, MAX_BOARD_SIZE};
use crate::path::{crossing_cost, CostRule};

/// Distance reported when the opponent has sealed every path
///
/// Finite so score arithmetic never overflows.
pub const BLOCKED: u32 = 10_000;

// A crossing never claims more cells than the board holds
const _: () = assert!(MAX_BOARD_SIZE * MAX_BOARD_SIZE < BLOCKED as usize);

/// Conversion distance of both players
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distances {
    pub a: u32,
    pub b: u32,
}

impl Distances {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::A => self.a,
            Player::B => self.b,
        }
    }

    pub fn is_blocked(&self, player: Player) -> bool {
        self.get(player) >= BLOCKED
    }
}

/// Conversion distance for one player
pub fn distance(grid: &Grid, player: Player) -> u32 {
    crossing_cost(grid, player, CostRule::Conversion).unwrap_or(BLOCKED)
}

/// Conversion distances for both players
pub fn estimate(grid: &Grid) -> Distances {
    Distances {
        a: distance(grid, Player::A),
        b: distance(grid, Player::B),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::connectivity::has_won;

    #[test]
    fn test_corner_stone_scenario() {
        let mut grid: Grid = "\
            B . .
            . . .
            . . .
        "
        .parse()
        .unwrap();
        assert_eq!(distance(&grid, Player::B), 2);

        grid.place(Coord::new(0, 1), Player::B).unwrap();
        assert_eq!(distance(&grid, Player::B), 1);

        grid.place(Coord::new(0, 2), Player::B).unwrap();
        assert_eq!(distance(&grid, Player::B), 0);
        assert!(has_won(&grid, Player::B));
    }

    #[test]
    fn test_blocked_edge_reports_sentinel() {
        let grid: Grid = "\
            . . A
            . . A
            . . A
        "
        .parse()
        .unwrap();
        let d = estimate(&grid);
        assert_eq!(d.b, BLOCKED);
        assert!(d.is_blocked(Player::B));
        assert!(!has_won(&grid, Player::B));
        assert_eq!(d.a, 0);
    }

    #[test]
    fn test_zero_iff_won() {
        let grid: Grid = "\
            . A . .
            A . . .
            A B B .
            A . B B
        "
        .parse()
        .unwrap();
        let d = estimate(&grid);
        assert_eq!(d.a, 0);
        assert!(has_won(&grid, Player::A));
        assert!(d.b > 0);
        assert!(!has_won(&grid, Player::B));
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let grid: Grid = "\
            . B . .
            . A . .
            . . B .
            A . . .
        "
        .parse()
        .unwrap();
        assert_eq!(estimate(&grid), estimate(&grid));
    }

    #[test]
    fn test_opponent_stones_lengthen_path() {
        let open = Grid::new(4).unwrap();
        let mut blocked = open.clone();
        blocked.place(Coord::new(0, 0), Player::A).unwrap();
        blocked.place(Coord::new(1, 0), Player::A).unwrap();
        blocked.place(Coord::new(2, 0), Player::A).unwrap();
        assert_eq!(distance(&open, Player::B), 4);
        assert_eq!(distance(&blocked, Player::B), 4);
        assert!(distance(&blocked, Player::A) < distance(&open, Player::A));
    }
}
