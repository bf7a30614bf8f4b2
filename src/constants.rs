//! Constants for board geometry, tile spawning and search parameters.
//!
//! Everything tunable at runtime (rollout count, rollout depth, AI pacing)
//! only provides its default here; see [`crate::evaluator::EvaluatorConfig`]
//! and the command line flags in `main.rs`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 4;

// =============================================================================
// Tile Spawning
// =============================================================================

/// Probability that a spawned tile is a 2 (otherwise it is a 4).
pub const TWO_PROBABILITY: f64 = 0.9;

/// Number of tiles added at game start and after every accepted move.
pub const TILES_PER_SPAWN: usize = 2;

/// Largest tile value a grid may hold. Two of these merge into 2^31, which
/// still fits a `u32` cell.
pub const MAX_TILE: u32 = 1 << 30;

/// Tile value that counts as a win. Play continues after reaching it.
pub const WIN_TILE: u32 = 2048;

// =============================================================================
// Move Evaluator Parameters
// =============================================================================

/// Default number of rollouts run for each candidate direction.
pub const ROLLOUTS_PER_DIRECTION: usize = 100;

/// Number of random moves played after the candidate move in one rollout.
pub const MAX_ROLLOUT_DEPTH: usize = 10;

/// Static evaluation bonus per empty cell.
pub const EMPTY_CELL_WEIGHT: u32 = 10;

/// Static evaluation bonus per unit of monotonicity.
pub const MONOTONICITY_WEIGHT: u32 = 20;

// =============================================================================
// Driver Pacing
// =============================================================================

/// Default delay between two automatic AI moves, in milliseconds.
pub const AI_INTERVAL_MS: u64 = 500;
