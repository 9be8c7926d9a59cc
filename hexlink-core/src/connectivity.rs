//! Win detection

use crate::board::{Grid, Player};
use crate::path::{crossing_cost, CostRule};

/// Whether `player` has an unbroken chain of own stones across their axis
pub fn has_won(grid: &Grid, player: Player) -> bool {
    crossing_cost(grid, player, CostRule::OwnStonesOnly).is_some()
}

/// The connected player, if any
///
/// Only one side can ever be connected on a hex board; A is checked first.
pub fn winner(grid: &Grid) -> Option<Player> {
    [Player::A, Player::B]
        .into_iter()
        .find(|&p| has_won(grid, p))
}
