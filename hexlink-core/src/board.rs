//! Rhombic hex grid: cells, players and adjacency
//!
//! Cells are addressed by (row, col) on an N x N rhombus. Each cell touches
//! up to six neighbors given by [`NEIGHBOR_OFFSETS`]; the same table is used
//! everywhere adjacency matters.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Smallest playable board
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest supported board; every crossing costs less than `BLOCKED`
pub const MAX_BOARD_SIZE: usize = 99;

/// Neighbor offsets (drow, dcol) on the rhombus
pub const NEIGHBOR_OFFSETS: [(isize, isize); 6] = [
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
];

// ============================================================================
// PLAYERS AND CELLS
// ============================================================================

/// One of the two sides, each bound to a connection axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Connects the top row to the bottom row
    A,
    /// Connects the left column to the right column
    B,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Coordinate that advances along this player's connection axis
    pub fn progress(self, coord: Coord) -> usize {
        match self {
            Player::A => coord.row,
            Player::B => coord.col,
        }
    }

    /// Whether an offset moves along this player's connection axis
    pub fn is_aligned_offset(self, (drow, dcol): (isize, isize)) -> bool {
        match self {
            Player::A => drow != 0,
            Player::B => dcol != 0,
        }
    }

    /// True for cells on the edge this player starts from
    pub fn on_start_edge(self, coord: Coord) -> bool {
        self.progress(coord) == 0
    }

    /// True for cells on the edge this player must reach
    pub fn on_target_edge(self, coord: Coord, size: usize) -> bool {
        self.progress(coord) + 1 == size
    }

    pub fn symbol(self) -> char {
        match self {
            Player::A => 'A',
            Player::B => 'B',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Player {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "A" | "a" => Ok(Player::A),
            "B" | "b" => Ok(Player::B),
            other => Err(EngineError::InvalidConfig(format!("unknown player: {}", other))),
        }
    }
}

/// Contents of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Stone(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Stone(p) => Some(p),
        }
    }

    pub fn is_owned_by(self, player: Player) -> bool {
        self == Cell::Stone(player)
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Stone(p) => p.symbol(),
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'A' | 'a' => Some(Cell::Stone(Player::A)),
            'B' | 'b' => Some(Cell::Stone(Player::B)),
            _ => None,
        }
    }
}

/// Grid coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ============================================================================
// GRID
// ============================================================================

/// Square grid of cells, row-major
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(size: usize) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Build from rows, rejecting anything that is not square
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let size = rows.len();
        check_size(size)?;
        let mut cells = Vec::with_capacity(size * size);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(EngineError::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    size
                )));
            }
            cells.extend(row);
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Signed bounds check, so callers can test `coord + offset` directly
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Cell at `coord`, or `None` off the board
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if self.contains(coord) {
            Some(self.cells[self.index(coord)])
        } else {
            None
        }
    }

    /// Cell at an in-bounds coordinate
    pub(crate) fn cell(&self, coord: Coord) -> Cell {
        self.cells[self.index(coord)]
    }

    /// Put a stone on an empty cell
    pub fn place(&mut self, coord: Coord, player: Player) -> Result<()> {
        let idx = self.empty_index(coord)?;
        self.cells[idx] = Cell::Stone(player);
        Ok(())
    }

    /// Remove every stone
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// In-bounds neighbors of `coord`
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&offset| self.offset(coord, offset))
    }

    /// `coord + offset` if it stays on the board
    pub fn offset(&self, coord: Coord, (drow, dcol): (isize, isize)) -> Option<Coord> {
        let row = coord.row as isize + drow;
        let col = coord.col as isize + dcol;
        if self.in_bounds(row, col) {
            Some(Coord::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// All coordinates, row-major
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }

    /// Empty cells in row-major scan order
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(move |&c| self.cell(c).is_empty())
    }

    pub fn first_empty(&self) -> Option<Coord> {
        self.empty_cells().next()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    pub fn stone_count(&self, player: Player) -> usize {
        self.cells.iter().filter(|c| c.is_owned_by(player)).count()
    }

    /// Cells on `player`'s starting edge
    pub fn start_edge(&self, player: Player) -> impl Iterator<Item = Coord> {
        self.coords().filter(move |&c| player.on_start_edge(c))
    }

    /// Place a stone for the lifetime of the returned guard
    ///
    /// Accepts the same cells as [`Grid::place`]. The cell is emptied again
    /// when the guard drops, on every exit path.
    pub fn trial(&mut self, coord: Coord, player: Player) -> Result<TrialPlacement<'_>> {
        let idx = self.empty_index(coord)?;
        self.cells[idx] = Cell::Stone(player);
        Ok(TrialPlacement { grid: self, idx })
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row * self.size + coord.col
    }

    /// Flat index of an in-bounds empty cell
    fn empty_index(&self, coord: Coord) -> Result<usize> {
        match self.get(coord) {
            None => Err(EngineError::OutOfBounds {
                row: coord.row,
                col: coord.col,
                size: self.size,
            }),
            Some(Cell::Stone(_)) => Err(EngineError::Occupied {
                row: coord.row,
                col: coord.col,
            }),
            Some(Cell::Empty) => Ok(self.index(coord)),
        }
    }
}

fn check_size(size: usize) -> Result<()> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(EngineError::InvalidGrid(format!(
            "size {} outside {}..={}",
            size, MIN_BOARD_SIZE, MAX_BOARD_SIZE
        )));
    }
    Ok(())
}

/// Temporary stone on a grid, removed on drop
pub struct TrialPlacement<'a> {
    grid: &'a mut Grid,
    idx: usize,
}

impl Deref for TrialPlacement<'_> {
    type Target = Grid;

    fn deref(&self) -> &Grid {
        &*self.grid
    }
}

impl Drop for TrialPlacement<'_> {
    fn drop(&mut self) {
        self.grid.cells[self.idx] = Cell::Empty;
    }
}

// ============================================================================
// NOTATION
// ============================================================================

impl FromStr for Grid {
    type Err = EngineError;

    /// One line per row; `.`/`_` empty, `A`, `B`; whitespace ignored
    fn from_str(s: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (line_no, line) in s.lines().enumerate() {
            let mut row = Vec::new();
            for ch in line.chars().filter(|c| !c.is_whitespace()) {
                let cell = Cell::from_symbol(ch).ok_or_else(|| {
                    EngineError::InvalidGrid(format!(
                        "unexpected '{}' on line {}",
                        ch,
                        line_no + 1
                    ))
                })?;
                row.push(cell);
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }
        Grid::from_rows(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            write!(f, "{:indent$}", "", indent = row)?;
            for col in 0..self.size {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.cell(Coord::new(row, col)).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
