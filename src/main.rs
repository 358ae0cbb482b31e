//! Atomic-Chess: a rules engine for atomic chess.
//!
//! ## Usage
//!
//! - `atomic-chess` - Play a random demo game
//! - `atomic-chess play` - Start the text protocol on stdin/stdout
//! - `atomic-chess demo --seed 7` - Play a reproducible random game
//!
//! Log output goes to stderr and is controlled by `ATOMIC_CHESS_LOG`
//! (for example `ATOMIC_CHESS_LOG=debug`).

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use atomic_chess::board::{Color, PieceKind};
use atomic_chess::constants::{LOG_ENV, MAX_PLAYOUT_PLIES};
use atomic_chess::playout::random_game;
use atomic_chess::position::Position;
use atomic_chess::protocol::ProtocolEngine;

/// Atomic-Chess: a rules engine for atomic chess
#[derive(Parser)]
#[command(name = "atomic-chess")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text protocol, reading commands from stdin
    Play,
    /// Play a random game and print the result
    Demo {
        /// Seed for the move generator; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many plies
        #[arg(long, default_value_t = MAX_PLAYOUT_PLIES)]
        max_plies: usize,
        /// Only print the final summary line
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play) => {
            let mut engine = ProtocolEngine::new();
            engine.run()?;
        }
        Some(Commands::Demo {
            seed,
            max_plies,
            quiet,
        }) => run_demo(seed, max_plies, quiet),
        None => run_demo(None, MAX_PLAYOUT_PLIES, false),
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_demo(seed: Option<u64>, max_plies: usize, quiet: bool) {
    let seed = seed.unwrap_or_else(|| fastrand::u64(..));
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut pos = Position::new();

    if !quiet {
        println!("Atomic-Chess: random game (seed {seed})\n");
        println!("{}", pos.board());
    }

    let result = random_game(&mut pos, &mut rng, max_plies);

    if !quiet {
        println!("{}", pos.board());
        for color in [Color::White, Color::Black] {
            let lost: Vec<String> = PieceKind::ALL
                .iter()
                .filter(|&&k| pos.captured(color, k) > 0)
                .map(|&k| format!("{}x {k}", pos.captured(color, k)))
                .collect();
            println!("{color} lost: {}", lost.join(", "));
        }
    }
    println!(
        "state={} plies={} end={:?} seed={seed}",
        result.state, result.plies, result.end
    );
}
