//! Edge-to-edge shortest path over the hex grid
//!
//! One routine serves both win detection and distance estimation. Entering
//! a cell costs 0 or 1 or is forbidden, depending on the [`CostRule`]; with
//! only those weights Dijkstra reduces to a 0-1 BFS over a deque.

use std::collections::VecDeque;

use crate::board::{Coord, Grid, Player};

/// How much it costs `player` to enter a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CostRule {
    /// Own stones are free, everything else is a wall
    OwnStonesOnly,
    /// Own stones are free, empty cells cost one, opponent stones are walls
    Conversion,
}

impl CostRule {
    /// Cost of entering `coord`, or `None` if it cannot be entered
    fn step_cost(self, grid: &Grid, coord: Coord, player: Player) -> Option<u32> {
        let cell = grid.cell(coord);
        match cell.owner() {
            Some(owner) if owner == player => Some(0),
            Some(_) => None,
            None => match self {
                CostRule::OwnStonesOnly => None,
                CostRule::Conversion => Some(1),
            },
        }
    }
}

/// Cheapest cost for `player` to link their start edge to their target edge
///
/// Returns `None` when no admissible path exists. The source cells on the
/// start edge pay their own entry cost, so an untouched empty board costs
/// `size` under [`CostRule::Conversion`].
pub fn crossing_cost(grid: &Grid, player: Player, rule: CostRule) -> Option<u32> {
    let size = grid.size();
    let index = |c: Coord| c.row * size + c.col;

    let mut dist = vec![u32::MAX; size * size];
    let mut queue: VecDeque<(u32, Coord)> = VecDeque::with_capacity(size * size);

    for source in grid.start_edge(player) {
        if let Some(cost) = rule.step_cost(grid, source, player) {
            let idx = index(source);
            if cost < dist[idx] {
                dist[idx] = cost;
                push(&mut queue, cost, source, cost == 0);
            }
        }
    }

    while let Some((d, coord)) = queue.pop_front() {
        if d > dist[index(coord)] {
            continue;
        }

        // Deque order pops in non-decreasing distance, so the first target
        // popped is optimal
        if player.on_target_edge(coord, size) {
            return Some(d);
        }

        for next in grid.neighbors(coord) {
            let Some(cost) = rule.step_cost(grid, next, player) else {
                continue;
            };
            let nd = d + cost;
            let idx = index(next);
            if nd < dist[idx] {
                dist[idx] = nd;
                push(&mut queue, nd, next, cost == 0);
            }
        }
    }

    None
}

fn push(queue: &mut VecDeque<(u32, Coord)>, d: u32, coord: Coord, free: bool) {
    if free {
        queue.push_front((d, coord));
    } else {
        queue.push_back((d, coord));
    }
}
