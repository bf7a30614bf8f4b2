//! Grid representation and move execution.
//!
//! This module is the single transition engine shared by the game driver and
//! the move evaluator. It provides:
//! - A plain `N x N` grid of tile values (0 = empty)
//! - Shift-and-merge move resolution for all four directions
//! - Terminal-state detection
//! - Random tile insertion from an injected RNG
//!
//! Every direction is reduced to a single "merge-left" row operation. The grid
//! is rotated (or mirrored, for Right) into canonical orientation, each row is
//! compacted towards index 0, and the result is rotated back.

use std::fmt;
use std::str::FromStr;

use crate::constants::{MAX_TILE, N, TWO_PROBABILITY};
use crate::error::GridError;

/// One of the four sliding directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in enumeration order. Tie-breaking in the evaluator
    /// prefers earlier entries.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Position of this direction in [`Direction::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = GridError;

    /// Accepts full names and WASD keys, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            other => Err(GridError::InvalidArgument(format!(
                "unknown direction '{other}'"
            ))),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = GridError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| GridError::InvalidArgument(format!("direction code {code} (expected 0-3)")))
    }
}

/// Outcome of applying one move.
///
/// `moved == false` always comes with `score_gained == 0` and an untouched grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveResult {
    pub moved: bool,
    pub score_gained: u64,
}

/// An `N x N` board of tile values, row-major, 0 for an empty cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Grid {
    pub cells: [[u32; N]; N],
}

impl Grid {
    /// Wrap raw cells without validation.
    pub const fn new(cells: [[u32; N]; N]) -> Self {
        Self { cells }
    }

    /// An all-empty grid.
    pub const fn empty() -> Self {
        Self { cells: [[0; N]; N] }
    }

    /// Build a grid from row slices, checking the shape and that every
    /// non-zero value is a power of two between 2 and [`MAX_TILE`].
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, GridError> {
        if rows.len() != N {
            return Err(GridError::InvalidShape(format!(
                "expected {N} rows, got {}",
                rows.len()
            )));
        }
        let mut grid = Grid::empty();
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != N {
                return Err(GridError::InvalidShape(format!(
                    "expected {N} values in row {r}, got {}",
                    row.len()
                )));
            }
            for (c, &value) in row.iter().enumerate() {
                if value != 0 && (value < 2 || value > MAX_TILE || !value.is_power_of_two()) {
                    return Err(GridError::InvalidTile { row: r, col: c, value });
                }
                grid.cells[r][c] = value;
            }
        }
        Ok(grid)
    }

    /// Build a grid from `N * N` values in row-major order.
    pub fn from_flat(values: &[u32]) -> Result<Self, GridError> {
        if values.len() != N * N {
            return Err(GridError::InvalidShape(format!(
                "expected {} values, got {}",
                N * N,
                values.len()
            )));
        }
        let rows: Vec<&[u32]> = values.chunks(N).collect();
        Self::from_rows(&rows)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row][col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u32) {
        self.cells[row][col] = value;
    }

    /// Sum of all tile values.
    pub fn sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| v as u64).sum()
    }

    /// Largest tile on the board (0 for an empty grid).
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Row-major copy of all cell values.
    pub fn to_flat(&self) -> Vec<u32> {
        self.cells.iter().flatten().copied().collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for &v in row {
                if v == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{v:>6}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Compact one row towards index 0 and merge equal neighbors.
///
/// Zeros are dropped first, then equal adjacent values are combined
/// left-to-right in a single pass: a freshly merged cell never merges again.
/// Tiles above [`MAX_TILE`] do not merge. Returns the new row and the sum of
/// the merged values.
pub fn merge_and_move(row: &[u32; N]) -> ([u32; N], u64) {
    let mut out = [0u32; N];
    let mut len = 0;
    let mut gained = 0;
    let mut pending: Option<u32> = None;

    for &v in row.iter().filter(|&&v| v != 0) {
        match pending {
            Some(p) if p == v && v <= MAX_TILE => {
                out[len] = v * 2;
                len += 1;
                gained += v as u64 * 2;
                pending = None;
            }
            Some(p) => {
                out[len] = p;
                len += 1;
                pending = Some(v);
            }
            None => pending = Some(v),
        }
    }
    if let Some(p) = pending {
        out[len] = p;
    }

    (out, gained)
}

/// Rotate the grid clockwise by `turns` quarter-turns.
pub fn rotate_clockwise(grid: &Grid, turns: usize) -> Grid {
    let mut current = *grid;
    for _ in 0..turns % 4 {
        let mut next = Grid::empty();
        for r in 0..N {
            for c in 0..N {
                next.cells[r][c] = current.cells[N - 1 - c][r];
            }
        }
        current = next;
    }
    current
}

/// Reverse every row (left-right mirror).
fn mirror(grid: &Grid) -> Grid {
    let mut out = *grid;
    for row in &mut out.cells {
        row.reverse();
    }
    out
}

/// Bring `grid` into the orientation where `dir` becomes a left move.
fn to_canonical(grid: &Grid, dir: Direction) -> Grid {
    match dir {
        Direction::Left => *grid,
        Direction::Right => mirror(grid),
        Direction::Up => rotate_clockwise(grid, 3),
        Direction::Down => rotate_clockwise(grid, 1),
    }
}

/// Inverse of [`to_canonical`].
fn from_canonical(grid: &Grid, dir: Direction) -> Grid {
    match dir {
        Direction::Left => *grid,
        Direction::Right => mirror(grid),
        Direction::Up => rotate_clockwise(grid, 1),
        Direction::Down => rotate_clockwise(grid, 3),
    }
}

/// Slide and merge every line of the grid in the given direction.
///
/// The grid is only written when something moved, so `moved == false`
/// guarantees it is unchanged.
pub fn apply_move(grid: &mut Grid, dir: Direction) -> MoveResult {
    let mut work = to_canonical(grid, dir);
    let mut result = MoveResult::default();

    for row in &mut work.cells {
        let (compacted, gained) = merge_and_move(row);
        if compacted != *row {
            result.moved = true;
            *row = compacted;
        }
        result.score_gained += gained;
    }

    if result.moved {
        *grid = from_canonical(&work, dir);
    }
    result
}

/// Check whether any cell is empty.
pub fn has_empty_cell(grid: &Grid) -> bool {
    grid.cells.iter().flatten().any(|&v| v == 0)
}

/// Number of empty cells.
pub fn count_empty_cells(grid: &Grid) -> usize {
    grid.cells.iter().flatten().filter(|&&v| v == 0).count()
}

/// A grid is terminal when no direction moves anything.
///
/// Runs the full move on a copy for each direction so the answer always
/// agrees with [`apply_move`].
pub fn is_terminal(grid: &Grid) -> bool {
    Direction::ALL.iter().all(|&dir| {
        let mut copy = *grid;
        !apply_move(&mut copy, dir).moved
    })
}

/// Put a 2 (probability [`TWO_PROBABILITY`]) or a 4 on a uniformly chosen
/// empty cell.
///
/// Returns the `(row, col)` that was filled, or `None` when the grid is full,
/// in which case nothing happens.
pub fn spawn_random_tile(grid: &mut Grid, rng: &mut fastrand::Rng) -> Option<(usize, usize)> {
    let empty: Vec<(usize, usize)> = (0..N)
        .flat_map(|r| (0..N).map(move |c| (r, c)))
        .filter(|&(r, c)| grid.cells[r][c] == 0)
        .collect();

    if empty.is_empty() {
        return None;
    }

    let (r, c) = empty[rng.usize(..empty.len())];
    grid.cells[r][c] = if rng.f64() < TWO_PROBABILITY { 2 } else { 4 };
    Some((r, c))
}
