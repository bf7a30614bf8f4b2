//! Rollout-2048: the 2048 sliding-tile game with a Monte Carlo move assistant.
//!
//! The crate provides one grid transition engine shared by real and simulated
//! moves, a rollout-based move evaluator, and the driver pieces needed to play
//! (game state, a paced auto-play scheduler and a text protocol).
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and evaluator defaults
//! - [`grid`] - Core game logic (moves, merges, terminal check, spawning)
//! - [`playout`] - Random rollouts and static grid evaluation
//! - [`evaluator`] - Ranks the four moves by averaged rollouts
//! - [`game`] - Driver-owned game state and score
//! - [`autoplay`] - Interval-paced AI stepping with start/stop
//! - [`protocol`] - Line protocol for frontends
//! - [`error`] - Errors for malformed input
//!
//! ## Example
//!
//! ```
//! use rollout_2048::evaluator::{EvaluatorConfig, MoveEvaluator};
//! use rollout_2048::game::Game;
//!
//! let mut game = Game::new(42);
//! let evaluator = MoveEvaluator::new(EvaluatorConfig {
//!     rollouts_per_direction: 20,
//!     ..EvaluatorConfig::default()
//! });
//! let mut rng = fastrand::Rng::with_seed(7);
//!
//! let best = evaluator.select_best_move(&game.grid, &mut rng);
//! let result = game.play(best);
//! assert!(result.moved);
//! ```

pub mod autoplay;
pub mod constants;
pub mod error;
pub mod evaluator;
pub mod game;
pub mod grid;
pub mod playout;
pub mod protocol;
