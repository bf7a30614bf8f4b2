//! Game state owned by the driver.
//!
//! `Game` holds the authoritative grid and score and routes every player or
//! AI move through the shared grid engine.

use crate::constants::{TILES_PER_SPAWN, WIN_TILE};
use crate::grid::{apply_move, is_terminal, spawn_random_tile, Direction, Grid, MoveResult};

pub struct Game {
    /// Current board
    pub grid: Grid,
    /// Points collected since the last reset
    pub score: u64,
    /// Highest score seen across resets
    pub best_score: u64,
    /// Accepted moves since the last reset
    pub moves: usize,
    rng: fastrand::Rng,
}

impl Game {
    /// Start a new game with `TILES_PER_SPAWN` random tiles.
    pub fn new(seed: u64) -> Self {
        let mut game = Self::from_grid(Grid::empty(), seed);
        game.reset();
        game
    }

    /// Continue from an existing grid with a zero score.
    pub fn from_grid(grid: Grid, seed: u64) -> Self {
        Self {
            grid,
            score: 0,
            best_score: 0,
            moves: 0,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Clear the board and score, then seed the starting tiles.
    /// The best score survives.
    pub fn reset(&mut self) {
        self.grid = Grid::empty();
        self.score = 0;
        self.moves = 0;
        self.spawn_tiles();
        log::info!("new game\n{}", self.grid);
    }

    /// Reseed the random source and reset.
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.rng = fastrand::Rng::with_seed(seed);
        self.reset();
    }

    /// Replace the board, e.g. with one read back from a frontend.
    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    fn spawn_tiles(&mut self) {
        for _ in 0..TILES_PER_SPAWN {
            spawn_random_tile(&mut self.grid, &mut self.rng);
        }
    }

    /// Apply a move. Accepted moves add to the score and spawn new tiles;
    /// a move that changes nothing leaves the game untouched.
    pub fn play(&mut self, dir: Direction) -> MoveResult {
        let result = apply_move(&mut self.grid, dir);
        if result.moved {
            self.score += result.score_gained;
            self.best_score = self.best_score.max(self.score);
            self.moves += 1;
            self.spawn_tiles();
            if self.is_over() {
                log::info!("game over after {} moves, score {}", self.moves, self.score);
            }
        }
        result
    }

    pub fn is_over(&self) -> bool {
        is_terminal(&self.grid)
    }

    pub fn has_won(&self) -> bool {
        self.grid.max_tile() >= WIN_TILE
    }
}
