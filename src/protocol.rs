//! Line-oriented text protocol for frontends.
//!
//! The protocol follows the shape of GTP: each request is one line, optionally
//! prefixed by a numeric id, and each response is `=id text` on success or
//! `?id text` on failure, followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`, `list_commands`,
//!   `known_command <cmd>`, `quit`
//! - `new [seed]` - Start a new game (optionally reseeding)
//! - `move <dir>` - Play `up`/`down`/`left`/`right`
//! - `genmove` - Let the evaluator choose and play a move
//! - `hint` - Let the evaluator choose a move without playing it
//! - `showboard` - Print the grid
//! - `score` - Current and best score
//! - `setboard <v1> ... <v16>` - Replace the grid (row-major)
//! - `rollouts <n>` / `depth <n>` - Tune the evaluator
//! - `game_over` - `true` or `false`
//!
//! ## Example
//!
//! ```ignore
//! use rollout_2048::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new(42);
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use crate::evaluator::{EvaluatorConfig, MoveEvaluator};
use crate::game::Game;
use crate::grid::{is_terminal, Direction, Grid};

/// The list of known protocol commands.
const KNOWN_COMMANDS: &[&str] = &[
    "depth",
    "game_over",
    "genmove",
    "hint",
    "known_command",
    "list_commands",
    "move",
    "name",
    "new",
    "protocol_version",
    "quit",
    "rollouts",
    "score",
    "setboard",
    "showboard",
    "version",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    game: Game,
    evaluator: MoveEvaluator,
    /// Random source for evaluator rollouts, separate from tile spawning
    rng: fastrand::Rng,
}

impl ProtocolEngine {
    /// Create an engine with default evaluator settings.
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, EvaluatorConfig::default())
    }

    pub fn with_config(seed: u64, config: EvaluatorConfig) -> Self {
        Self {
            game: Game::new(seed),
            evaluator: MoveEvaluator::new(config),
            rng: fastrand::Rng::with_seed(seed.wrapping_add(1)),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams until `quit` or EOF.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let (success, message) = self.execute(&command, &parts[1..]);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());

        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn parse_count(args: &[&str]) -> Result<usize, String> {
        let arg = args.first().ok_or_else(|| "missing argument".to_string())?;
        arg.parse::<usize>()
            .map_err(|_| format!("invalid number '{arg}'"))
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "new" => {
                match args.first() {
                    None => self.game.reset(),
                    Some(arg) => match arg.parse::<u64>() {
                        Ok(seed) => {
                            self.game.reset_with_seed(seed);
                            self.rng = fastrand::Rng::with_seed(seed.wrapping_add(1));
                        }
                        Err(_) => return (false, format!("invalid seed '{arg}'")),
                    },
                }
                (true, String::new())
            }

            "move" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let dir = match arg.parse::<Direction>() {
                    Ok(dir) => dir,
                    Err(e) => return (false, e.to_string()),
                };
                self.play(dir)
            }

            "genmove" => {
                if is_terminal(&self.game.grid) {
                    return (false, "game over".to_string());
                }
                let dir = self.evaluator.select_best_move(&self.game.grid, &mut self.rng);
                let (ok, msg) = self.play(dir);
                if ok { (true, format!("{dir} {msg}")) } else { (false, msg) }
            }

            "hint" => {
                if is_terminal(&self.game.grid) {
                    return (false, "game over".to_string());
                }
                let dir = self.evaluator.select_best_move(&self.game.grid, &mut self.rng);
                (true, dir.to_string())
            }

            "showboard" => (true, format!("\n{}", self.game.grid)),

            "score" => (true, format!("{} {}", self.game.score, self.game.best_score)),

            "setboard" => {
                let values: Result<Vec<u32>, _> = args.iter().map(|a| a.parse::<u32>()).collect();
                let Ok(values) = values else {
                    return (false, "invalid tile value".to_string());
                };
                match Grid::from_flat(&values) {
                    Ok(grid) => {
                        self.game.set_grid(grid);
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "rollouts" => match Self::parse_count(args) {
                Ok(n) => {
                    self.evaluator.set_rollouts_per_direction(n);
                    (true, String::new())
                }
                Err(e) => (false, e),
            },

            "depth" => match Self::parse_count(args) {
                Ok(n) => {
                    self.evaluator.set_max_depth(n);
                    (true, String::new())
                }
                Err(e) => (false, e),
            },

            "game_over" => (true, self.game.is_over().to_string()),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Play a direction on the game and describe the outcome.
    fn play(&mut self, dir: Direction) -> (bool, String) {
        if self.game.is_over() {
            return (false, "game over".to_string());
        }
        let result = self.game.play(dir);
        if !result.moved {
            return (false, format!("{dir} does not move"));
        }
        (true, format!("+{} score {}", result.score_gained, self.game.score))
    }
}
