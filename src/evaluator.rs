//! Monte Carlo move evaluation.
//!
//! Each of the four candidate directions is scored by averaging many
//! independent random rollouts (see [`crate::playout`]). The direction with
//! the highest average wins; ties keep the earlier direction in
//! [`Direction::ALL`].
//!
//! Every rollout works on its own copy of the grid, so directions could be
//! evaluated in parallel without any locking.

use crate::constants::{MAX_ROLLOUT_DEPTH, ROLLOUTS_PER_DIRECTION};
use crate::grid::{apply_move, Direction, Grid};
use crate::playout::{rollout, RolloutConfig};

/// Tuning parameters for [`MoveEvaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Independent rollouts run for each candidate direction.
    pub rollouts_per_direction: usize,
    /// Random moves played after the candidate move in each rollout.
    pub max_depth: usize,
    /// Spawn random tiles during rollouts.
    pub spawn_tiles: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            rollouts_per_direction: ROLLOUTS_PER_DIRECTION,
            max_depth: MAX_ROLLOUT_DEPTH,
            spawn_tiles: false,
        }
    }
}

/// Rollout statistics for one candidate direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionStats {
    pub direction: Direction,
    /// Whether the direction moves anything from the evaluated grid.
    pub valid: bool,
    /// Mean rollout score (0 for an invalid direction).
    pub average: f64,
}

/// Ranks the four moves of a grid by random rollouts.
#[derive(Debug, Clone, Default)]
pub struct MoveEvaluator {
    config: EvaluatorConfig,
}

impl MoveEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn set_rollouts_per_direction(&mut self, rollouts: usize) {
        self.config.rollouts_per_direction = rollouts;
    }

    pub fn set_max_depth(&mut self, depth: usize) {
        self.config.max_depth = depth;
    }

    fn rollout_config(&self) -> RolloutConfig {
        RolloutConfig {
            max_depth: self.config.max_depth,
            spawn_tiles: self.config.spawn_tiles,
        }
    }

    /// Score every direction, in [`Direction::ALL`] order.
    pub fn evaluate(&self, grid: &Grid, rng: &mut fastrand::Rng) -> [DirectionStats; 4] {
        let rollout_config = self.rollout_config();
        let n = self.config.rollouts_per_direction;

        Direction::ALL.map(|direction| {
            let mut trial = *grid;
            let valid = apply_move(&mut trial, direction).moved;
            let average = if n == 0 {
                0.0
            } else {
                let total: f64 = (0..n)
                    .map(|_| rollout(grid, direction, &rollout_config, rng))
                    .sum();
                total / n as f64
            };
            DirectionStats { direction, valid, average }
        })
    }

    /// Pick the direction with the highest average rollout score.
    ///
    /// On a terminal grid every average is 0 and `Up` is returned; callers
    /// should check [`crate::grid::is_terminal`] first.
    pub fn select_best_move(&self, grid: &Grid, rng: &mut fastrand::Rng) -> Direction {
        let stats = self.evaluate(grid, rng);
        for s in &stats {
            log::debug!(
                "{:>5}: valid={} avg={:.1}",
                s.direction.name(),
                s.valid,
                s.average
            );
        }
        best_direction(&stats)
    }
}

/// First direction with the strictly highest average.
fn best_direction(stats: &[DirectionStats; 4]) -> Direction {
    let mut best = &stats[0];
    for s in &stats[1..] {
        if s.average > best.average {
            best = s;
        }
    }
    best.direction
}

/// Select the best move with the default rollout depth.
pub fn select_best_move(grid: &Grid, rollouts_per_direction: usize, rng: &mut fastrand::Rng) -> Direction {
    MoveEvaluator::new(EvaluatorConfig {
        rollouts_per_direction,
        ..EvaluatorConfig::default()
    })
    .select_best_move(grid, rng)
}

/// Print the per-direction statistics to stderr.
pub fn dump_stats(stats: &[DirectionStats; 4]) {
    for s in stats {
        eprintln!(
            "move {:>5} valid={} avg={:.1}",
            s.direction.name(),
            s.valid,
            s.average
        );
    }
}
