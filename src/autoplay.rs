//! Paced automatic play.
//!
//! `AutoPlayer` is the driver's scheduler for AI turns: once started it plays
//! at most one evaluator move per interval and stops itself when the game is
//! over. Steps run to completion inside `poll`, and since `poll` needs
//! `&mut self` a new step can never start while another is being applied.

use std::thread;
use std::time::{Duration, Instant};

use crate::evaluator::MoveEvaluator;
use crate::game::Game;
use crate::grid::{Direction, MoveResult};

/// One move played by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiStep {
    pub direction: Direction,
    pub result: MoveResult,
}

pub struct AutoPlayer {
    evaluator: MoveEvaluator,
    interval: Duration,
    rng: fastrand::Rng,
    /// When the next step may run; `None` while stopped
    next_due: Option<Instant>,
}

impl AutoPlayer {
    pub fn new(evaluator: MoveEvaluator, interval: Duration, seed: u64) -> Self {
        Self {
            evaluator,
            interval,
            rng: fastrand::Rng::with_seed(seed),
            next_due: None,
        }
    }

    /// Begin stepping; the first move is due one interval after `now`.
    /// Starting an already running scheduler keeps its current schedule.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Select and play one move right away, ignoring the schedule.
    /// Returns `None` on a terminal grid; the evaluator is never asked.
    pub fn step(&mut self, game: &mut Game) -> Option<AiStep> {
        if game.is_over() {
            return None;
        }
        let direction = self.evaluator.select_best_move(&game.grid, &mut self.rng);
        let result = game.play(direction);
        log::debug!("ai {direction}: moved={} +{}", result.moved, result.score_gained);
        Some(AiStep { direction, result })
    }

    /// Play a move if running and due at `now`.
    ///
    /// Stops the scheduler when the game is over. The next step becomes due
    /// one interval after this one.
    pub fn poll(&mut self, game: &mut Game, now: Instant) -> Option<AiStep> {
        let due = self.next_due?;
        if now < due {
            return None;
        }
        match self.step(game) {
            Some(step) => {
                self.next_due = Some(now + self.interval);
                Some(step)
            }
            None => {
                log::info!("auto play stopped: game over");
                self.stop();
                None
            }
        }
    }

    /// Run paced steps until the game ends, `max_moves` steps were played, or
    /// a step fails to move. Calls `on_step` after every step and returns the
    /// number of steps played.
    pub fn run<F>(&mut self, game: &mut Game, max_moves: Option<usize>, mut on_step: F) -> usize
    where
        F: FnMut(&Game, &AiStep),
    {
        let mut played = 0;
        self.start(Instant::now());

        while self.is_running() {
            if max_moves.is_some_and(|max| played >= max) {
                self.stop();
                break;
            }
            let now = Instant::now();
            if let Some(due) = self.next_due {
                if now < due {
                    thread::sleep(due - now);
                    continue;
                }
            }
            if let Some(step) = self.poll(game, now) {
                played += 1;
                on_step(game, &step);
                if !step.result.moved {
                    log::warn!("ai move {} did not change the grid, stopping", step.direction);
                    self.stop();
                }
            }
        }
        played
    }
}
