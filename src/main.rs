//! Rollout-2048: 2048 with a Monte Carlo move assistant.
//!
//! ## Usage
//!
//! - `rollout-2048` - Show a demo
//! - `rollout-2048 play` - Start the text protocol on stdin/stdout
//! - `rollout-2048 auto` - Let the AI play a full game
//! - `rollout-2048 demo` - Run the evaluator demo

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;

use rollout_2048::autoplay::AutoPlayer;
use rollout_2048::constants::{AI_INTERVAL_MS, MAX_ROLLOUT_DEPTH, ROLLOUTS_PER_DIRECTION};
use rollout_2048::evaluator::{dump_stats, EvaluatorConfig, MoveEvaluator};
use rollout_2048::game::Game;
use rollout_2048::protocol::ProtocolEngine;

/// Rollout-2048: 2048 with a Monte Carlo move assistant
#[derive(Parser)]
#[command(name = "rollout-2048")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the line protocol server for use with a frontend
    Play(SearchArgs),
    /// Let the AI play one full game
    Auto {
        #[command(flatten)]
        search: SearchArgs,
        /// Delay between AI moves in milliseconds
        #[arg(long, default_value_t = AI_INTERVAL_MS)]
        interval_ms: u64,
        /// Stop after this many moves
        #[arg(long)]
        max_moves: Option<usize>,
        /// Only print the final board
        #[arg(long, short)]
        quiet: bool,
    },
    /// Run a simple demo of the evaluator
    Demo,
}

#[derive(Args)]
struct SearchArgs {
    /// Seed for tile spawning and rollouts
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Rollouts per candidate direction
    #[arg(long, default_value_t = ROLLOUTS_PER_DIRECTION)]
    rollouts: usize,
    /// Random moves per rollout after the candidate move
    #[arg(long, default_value_t = MAX_ROLLOUT_DEPTH)]
    depth: usize,
    /// Spawn random tiles inside rollouts
    #[arg(long)]
    spawn_in_rollouts: bool,
}

impl SearchArgs {
    fn config(&self) -> EvaluatorConfig {
        EvaluatorConfig {
            rollouts_per_direction: self.rollouts,
            max_depth: self.depth,
            spawn_tiles: self.spawn_in_rollouts,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(search)) => {
            let mut engine = ProtocolEngine::with_config(search.seed, search.config());
            engine.run().context("protocol session failed")?;
        }
        Some(Commands::Auto {
            search,
            interval_ms,
            max_moves,
            quiet,
        }) => run_auto(&search, interval_ms, max_moves, quiet),
        Some(Commands::Demo) | None => run_demo(),
    }
    Ok(())
}

fn run_auto(search: &SearchArgs, interval_ms: u64, max_moves: Option<usize>, quiet: bool) {
    let mut game = Game::new(search.seed);
    let mut ai = AutoPlayer::new(
        MoveEvaluator::new(search.config()),
        Duration::from_millis(interval_ms),
        search.seed.wrapping_add(1),
    );

    if !quiet {
        println!("{}", game.grid);
    }
    let played = ai.run(&mut game, max_moves, |game, step| {
        if !quiet {
            println!(
                "move {:>4}: {:<5} +{:<5} score {}",
                game.moves, step.direction, step.result.score_gained, game.score
            );
            println!("{}", game.grid);
        }
    });

    println!("{}", game.grid);
    println!(
        "moves: {played}  score: {}  max tile: {}  {}",
        game.score,
        game.grid.max_tile(),
        if game.is_over() { "game over" } else { "stopped" }
    );
}

fn run_demo() {
    println!("Rollout-2048: 2048 with a Monte Carlo move assistant\n");

    let mut game = Game::new(2048);
    let evaluator = MoveEvaluator::new(EvaluatorConfig {
        rollouts_per_direction: 50,
        ..EvaluatorConfig::default()
    });
    let mut rng = fastrand::Rng::with_seed(7);

    println!("=== Starting Grid ===");
    println!("{}", game.grid);

    println!("=== Rollout Statistics ===");
    let stats = evaluator.evaluate(&game.grid, &mut rng);
    dump_stats(&stats);

    println!("\n=== Ten AI Moves ===");
    for _ in 0..10 {
        if game.is_over() {
            break;
        }
        let dir = evaluator.select_best_move(&game.grid, &mut rng);
        let res = game.play(dir);
        println!("{dir:<5} +{}", res.score_gained);
    }
    println!("\n{}", game.grid);
    println!("Score: {}", game.score);
}
