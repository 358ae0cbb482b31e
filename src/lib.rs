//! Atomic-Chess: a rules engine for atomic chess.
//!
//! In atomic chess every capture sets off an explosion that removes all
//! non-pawn pieces in the 3x3 area around the capture square, the capturing
//! piece included. Check is ignored; the game ends the instant a king is
//! removed from the board.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, starting layout and limits
//! - [`board`] - Pieces, squares and the 8x8 grid, with text rendering
//! - [`position`] - The game engine: coordinates, move pipeline, explosions
//! - [`rules`] - Per-piece movement rules and attack queries
//! - [`playout`] - Random game simulation
//! - [`protocol`] - Line-oriented text protocol
//!
//! ## Example
//!
//! ```
//! use atomic_chess::board::Color;
//! use atomic_chess::position::{GameState, Position};
//!
//! let mut pos = Position::new();
//! assert!(pos.attempt_move("e2", "e4"));
//! assert_eq!(pos.turn(), Color::Black);
//! assert!(!pos.attempt_move("e2", "e4"));
//! assert_eq!(pos.current_state(), GameState::InProgress);
//! println!("{}", pos.board());
//! ```

pub mod board;
pub mod constants;
pub mod playout;
pub mod position;
pub mod protocol;
pub mod rules;
