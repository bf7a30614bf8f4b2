//! Random rollouts (playout simulation) and static grid evaluation.
//!
//! A rollout plays one candidate move, then a short sequence of uniformly
//! random moves, and scores the result as the points collected along the way
//! plus a static evaluation of the grid it ends on.

use crate::constants::{
    EMPTY_CELL_WEIGHT, MAX_ROLLOUT_DEPTH, MONOTONICITY_WEIGHT, N,
};
use crate::grid::{apply_move, count_empty_cells, spawn_random_tile, Direction, Grid};

/// Parameters of a single rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloutConfig {
    /// Random moves played after the candidate move.
    pub max_depth: usize,
    /// Spawn one random tile after every accepted move inside the rollout.
    pub spawn_tiles: bool,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_ROLLOUT_DEPTH,
            spawn_tiles: false,
        }
    }
}

/// Perform one rollout starting with `first` from a private copy of `grid`.
///
/// Returns 0 when `first` does not move anything. Otherwise the rollout keeps
/// picking random directions and stops at the first one that does not move,
/// or after `max_depth` random moves.
pub fn rollout(grid: &Grid, first: Direction, config: &RolloutConfig, rng: &mut fastrand::Rng) -> f64 {
    let mut sim = *grid;

    let opening = apply_move(&mut sim, first);
    if !opening.moved {
        return 0.0;
    }
    let mut score = opening.score_gained;
    if config.spawn_tiles {
        spawn_random_tile(&mut sim, rng);
    }

    let mut depth = 0;
    while depth < config.max_depth {
        let dir = Direction::ALL[rng.usize(..Direction::ALL.len())];
        let res = apply_move(&mut sim, dir);
        if !res.moved {
            break;
        }
        score += res.score_gained;
        if config.spawn_tiles {
            spawn_random_tile(&mut sim, rng);
        }
        depth += 1;
    }

    let total = score as f64 + static_evaluate(&sim);
    log::trace!("rollout {first}: depth={depth} score={total}");
    total
}

/// Heuristic value of a grid (higher is better).
///
/// `sum of tiles + 10 * empty cells + 20 * monotonicity`
pub fn static_evaluate(grid: &Grid) -> f64 {
    let empty = count_empty_cells(grid) as u64;
    let mono = monotonicity_score(grid) as u64;
    (grid.sum() + EMPTY_CELL_WEIGHT as u64 * empty + MONOTONICITY_WEIGHT as u64 * mono) as f64
}

/// Sum over every row and column of the larger of its strictly increasing
/// and strictly decreasing adjacent pair counts.
pub fn monotonicity_score(grid: &Grid) -> u32 {
    let mut total = 0;
    for i in 0..N {
        let row: [u32; N] = std::array::from_fn(|c| grid.cells[i][c]);
        let col: [u32; N] = std::array::from_fn(|r| grid.cells[r][i]);
        total += line_monotonicity(&row) + line_monotonicity(&col);
    }
    total
}

fn line_monotonicity(line: &[u32; N]) -> u32 {
    let (mut inc, mut dec) = (0, 0);
    for pair in line.windows(2) {
        if pair[1] > pair[0] {
            inc += 1;
        } else if pair[1] < pair[0] {
            dec += 1;
        }
    }
    inc.max(dec)
}
