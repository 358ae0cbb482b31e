//! Line-oriented text protocol for driving a game.
//!
//! The framing follows the Go Text Protocol: every command line may start
//! with a numeric id, and every response is `=<id> <body>` on success or
//! `?<id> <message>` on failure, terminated by a blank line. Blank lines and
//! lines starting with `#` are ignored.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `new` - Reset to the standard starting position
//! - `move <from> <to>` - Play a move given in algebraic coordinates
//! - `state` - `UNFINISHED`, `WHITE_WON` or `BLACK_WON`
//! - `turn` - Side to move
//! - `board` - Render the board
//! - `counts` - Remaining and captured pieces per side
//! - `legal [square]` - Legal moves, optionally only from one square
//! - `random` - Play a random legal move
//! - `attacked <color>` - Whether that side's king is attacked
//!
//! ## Example
//!
//! ```
//! use atomic_chess::protocol::ProtocolEngine;
//!
//! let mut engine = ProtocolEngine::with_seed(1);
//! let mut out = Vec::new();
//! engine.run_io("move e2 e4\nturn\n".as_bytes(), &mut out).unwrap();
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("= black"));
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Context;

use crate::board::{Color, PieceKind};
use crate::playout::choose_random_move;
use crate::position::{parse_coord, str_coord, Position};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "attacked",
    "board",
    "counts",
    "known_command",
    "legal",
    "list_commands",
    "move",
    "name",
    "new",
    "quit",
    "random",
    "state",
    "turn",
    "version",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    /// Current game
    pos: Position,
    /// Source of randomness for the `random` command
    rng: fastrand::Rng,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Create a new engine with a fresh game and a randomly seeded generator.
    pub fn new() -> Self {
        Self {
            pos: Position::new(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Create a new engine whose `random` command is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            pos: Position::new(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Run the command loop on stdin and stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_io(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run_io<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

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
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n").context("failed to write response")?;
            output.flush().context("failed to flush response")?;

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
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "new" => {
                self.pos = Position::new();
                (true, String::new())
            }

            "move" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                match self.pos.try_move(args[0], args[1]) {
                    Ok(out) => (true, out.state.to_string()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "state" => (true, self.pos.current_state().to_string()),

            "turn" => (true, self.pos.turn().to_string()),

            "board" => {
                let rendered = self.pos.board().to_string();
                (true, format!("\n{}", rendered.trim_end()))
            }

            "counts" => (true, self.counts()),

            "legal" => {
                let moves = match args.first() {
                    Some(s) => match parse_coord(s) {
                        Some(sq) => self.pos.legal_moves_from(sq),
                        None => return (false, format!("invalid square '{s}'")),
                    },
                    None => self.pos.legal_moves(),
                };
                let list: Vec<String> = moves
                    .iter()
                    .map(|&(f, t)| format!("{}{}", str_coord(f), str_coord(t)))
                    .collect();
                (true, list.join(" "))
            }

            "random" => match choose_random_move(&self.pos, &mut self.rng) {
                Some((from, to)) => match self.pos.play(from, to) {
                    Ok(out) => (true, format!("{from} {to} {}", out.state)),
                    Err(e) => (false, e.to_string()),
                },
                None => (false, "no legal move".to_string()),
            },

            "attacked" => {
                let Some(color) = args.first().and_then(|s| Color::parse(s)) else {
                    return (false, "expected 'white' or 'black'".to_string());
                };
                let attacked = self.pos.is_king_attacked(color);
                (true, attacked.to_string())
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// One line per color: `<color> remaining p r n b q k captured p r n b q k`.
    fn counts(&self) -> String {
        let line = |color: Color| {
            let remaining: Vec<String> = PieceKind::ALL
                .iter()
                .map(|&k| self.pos.remaining(color, k).to_string())
                .collect();
            let captured: Vec<String> = PieceKind::ALL
                .iter()
                .map(|&k| self.pos.captured(color, k).to_string())
                .collect();
            format!(
                "{color} remaining {} captured {}",
                remaining.join(" "),
                captured.join(" ")
            )
        };
        format!("{}\n{}", line(Color::White), line(Color::Black))
    }
}
