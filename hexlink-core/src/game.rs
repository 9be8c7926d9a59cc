//! Game session: turn order, placement and result tracking

use serde::{Deserialize, Serialize};

use crate::ai::{MoveChoice, MoveSelector};
use crate::board::{Coord, Grid, Player};
use crate::connectivity::has_won;
use crate::error::{EngineError, Result};
use crate::estimate::{estimate, Distances};

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Won(Player),
    /// Full board without a connection
    Draw,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::Ongoing
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::Won(p) => Some(p),
            _ => None,
        }
    }
}

/// One stone placed during a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub player: Player,
    pub coord: Coord,
}

/// A single game between A (moves first) and B
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    to_move: Player,
    result: GameResult,
    history: Vec<Placement>,
}

impl Game {
    /// Empty board, A to move
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self::from_grid(Grid::new(size)?, Player::A))
    }

    /// Resume from an existing position
    pub fn from_grid(grid: Grid, to_move: Player) -> Self {
        let result = Self::judge(&grid);
        Self {
            grid,
            to_move,
            result,
            history: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Conversion distances of the current position
    pub fn estimate(&self) -> Distances {
        estimate(&self.grid)
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Place a stone for the side to move and pass the turn
    pub fn place(&mut self, coord: Coord) -> Result<GameResult> {
        if self.result.is_over() {
            return Err(EngineError::GameOver);
        }

        let player = self.to_move;
        self.grid.place(coord, player)?;
        self.history.push(Placement { player, coord });

        self.result = if has_won(&self.grid, player) {
            GameResult::Won(player)
        } else if self.grid.is_full() {
            GameResult::Draw
        } else {
            GameResult::Ongoing
        };
        self.to_move = player.opponent();

        tracing::trace!(%player, %coord, result = ?self.result, "placed");
        Ok(self.result)
    }

    /// Let `selector` move for the side to move, committing a chosen cell
    pub fn play_selector(&mut self, selector: &MoveSelector) -> Result<MoveChoice> {
        if self.result.is_over() {
            return Err(EngineError::GameOver);
        }
        let choice = selector.choose_move(&mut self.grid, self.to_move);
        if let MoveChoice::Place(coord) = choice {
            self.place(coord)?;
        }
        Ok(choice)
    }

    /// Start over on an empty board of the same size
    pub fn reset(&mut self) {
        self.grid.clear();
        self.to_move = Player::A;
        self.result = GameResult::Ongoing;
        self.history.clear();
    }

    fn judge(grid: &Grid) -> GameResult {
        if has_won(grid, Player::A) {
            GameResult::Won(Player::A)
        } else if has_won(grid, Player::B) {
            GameResult::Won(Player::B)
        } else if grid.is_full() {
            GameResult::Draw
        } else {
            GameResult::Ongoing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Strategy;
    use crate::board::Cell;

    #[test]
    fn test_players_alternate() {
        let mut game = Game::new(3).unwrap();
        assert_eq!(game.to_move(), Player::A);
        game.place(Coord::new(0, 0)).unwrap();
        assert_eq!(game.to_move(), Player::B);
        game.place(Coord::new(1, 1)).unwrap();
        assert_eq!(game.to_move(), Player::A);
        assert_eq!(game.grid().get(Coord::new(0, 0)), Some(Cell::Stone(Player::A)));
        assert_eq!(game.grid().get(Coord::new(1, 1)), Some(Cell::Stone(Player::B)));
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_occupied_cell_rejected_without_turn_change() {
        let mut game = Game::new(3).unwrap();
        game.place(Coord::new(1, 1)).unwrap();
        assert!(matches!(
            game.place(Coord::new(1, 1)),
            Err(EngineError::Occupied { .. })
        ));
        assert_eq!(game.to_move(), Player::B);
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_win_ends_game() {
        let mut game = Game::new(2).unwrap();
        game.place(Coord::new(0, 0)).unwrap(); // A
        game.place(Coord::new(0, 1)).unwrap(); // B
        let result = game.place(Coord::new(1, 0)).unwrap(); // A: (0,0)-(1,0)
        assert_eq!(result, GameResult::Won(Player::A));
        assert!(matches!(game.place(Coord::new(1, 1)), Err(EngineError::GameOver)));
    }

    #[test]
    fn test_from_grid_detects_finished_position() {
        let grid: Grid = "B B\n. .".parse().unwrap();
        let game = Game::from_grid(grid, Player::A);
        assert_eq!(game.result(), GameResult::Won(Player::B));
        assert_eq!(game.result().winner(), Some(Player::B));
    }

    #[test]
    fn test_selector_game_runs_to_completion() {
        let mut game = Game::new(5).unwrap();
        let a = MoveSelector::new(Strategy::Structural);
        let b = MoveSelector::new(Strategy::Greedy);
        while !game.result().is_over() {
            let selector = if game.to_move() == Player::A { &a } else { &b };
            let choice = game.play_selector(selector).unwrap();
            assert!(matches!(choice, MoveChoice::Place(_)));
        }
        // Hex cannot end in a draw
        assert!(game.result().winner().is_some());
        assert!(game.move_count() <= 25);
    }

    #[test]
    fn test_reserved_selector_leaves_game_unchanged() {
        let mut game = Game::new(4).unwrap();
        let choice = game
            .play_selector(&MoveSelector::new(Strategy::Reserved))
            .unwrap();
        assert_eq!(choice, MoveChoice::Unimplemented);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.to_move(), Player::A);
    }

    #[test]
    fn test_reset() {
        let mut game = Game::new(3).unwrap();
        game.place(Coord::new(0, 0)).unwrap();
        game.reset();
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.to_move(), Player::A);
        assert_eq!(game.grid(), &Grid::new(3).unwrap());
    }
}
