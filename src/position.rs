//! Atomic chess position and move execution.
//!
//! This module provides the game engine itself:
//! - Translation between algebraic coordinates and grid indices
//! - The move pipeline, which validates a move and then either relocates the
//!   piece or resolves a capture
//! - Explosions: a capture clears every non-pawn piece in the 3x3 area around
//!   the capture square, and the capturing piece never survives
//! - Capture accounting and win detection by king count
//!
//! Check is never consulted. A game ends the moment a king leaves the board.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::board::{Board, Color, Piece, PieceKind, Square};
use crate::constants::{N, STARTING_COUNTS};
use crate::rules;

/// Outcome of the game so far. Leaves `InProgress` at most once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    InProgress,
    WhiteWon,
    BlackWon,
}

impl GameState {
    pub fn is_over(self) -> bool {
        self != GameState::InProgress
    }

    /// Win for the given side.
    pub fn won_by(color: Color) -> Self {
        match color {
            Color::White => GameState::WhiteWon,
            Color::Black => GameState::BlackWon,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameState::InProgress => None,
            GameState::WhiteWon => Some(Color::White),
            GameState::BlackWon => Some(Color::Black),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::InProgress => write!(f, "UNFINISHED"),
            GameState::WhiteWon => write!(f, "WHITE_WON"),
            GameState::BlackWon => write!(f, "BLACK_WON"),
        }
    }
}

/// Reason a move was rejected. Variants are listed in the order the checks run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("game is over ({0})")]
    GameOver(GameState),
    #[error("square '{0}' is not on the board")]
    OffBoard(String),
    #[error("no piece on {0}")]
    EmptySquare(Square),
    #[error("piece on {square} belongs to {color}, not the side to move")]
    WrongTurn { square: Square, color: Color },
    #[error("{0} is occupied by a piece of the same color")]
    FriendlyFire(Square),
    #[error("{piece} cannot move from {from} to {to}")]
    IllegalMove {
        piece: Piece,
        from: Square,
        to: Square,
    },
    #[error("a king may not capture the other king")]
    KingCapturesKing,
}

/// Remaining and captured piece counts per color and kind.
///
/// The board is the source of truth for where pieces stand; these counters
/// drive win detection through the king counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceCounters {
    remaining: [[u8; 6]; 2],
    captured: [[u8; 6]; 2],
}

impl Default for PieceCounters {
    fn default() -> Self {
        Self {
            remaining: [STARTING_COUNTS; 2],
            captured: [[0; 6]; 2],
        }
    }
}

impl PieceCounters {
    /// Counters matching the pieces present on `board`, with nothing captured.
    pub fn from_board(board: &Board) -> Self {
        let mut remaining = [[0u8; 6]; 2];
        for (_, p) in board.pieces() {
            remaining[p.color.index()][p.kind.index()] += 1;
        }
        Self {
            remaining,
            captured: [[0; 6]; 2],
        }
    }

    pub fn remaining(&self, color: Color, kind: PieceKind) -> u8 {
        self.remaining[color.index()][kind.index()]
    }

    pub fn captured(&self, color: Color, kind: PieceKind) -> u8 {
        self.captured[color.index()][kind.index()]
    }

    fn record_capture(&mut self, piece: Piece) {
        let (c, k) = (piece.color.index(), piece.kind.index());
        self.captured[c][k] = self.captured[c][k].saturating_add(1);
        self.remaining[c][k] = self.remaining[c][k].saturating_sub(1);
    }
}

/// What a successful move did to the position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// The piece that stood on `to`, if the move was a capture.
    pub captured: Option<Piece>,
    /// Pieces removed by the explosion other than the captured one and the
    /// capturing piece itself.
    pub collateral: Vec<(Square, Piece)>,
    pub state: GameState,
}

/// An atomic chess game: board, side to move, outcome and piece counters.
///
/// Each value is an independent game; nothing is shared between instances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: Board,
    turn: Color,
    state: GameState,
    counters: PieceCounters,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Standard starting position with White to move.
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            turn: Color::White,
            state: GameState::InProgress,
            counters: PieceCounters::default(),
        }
    }

    /// Start from an arbitrary board. Remaining counts are taken from the
    /// pieces on it; a side without a king has already lost.
    pub fn from_board(board: Board, turn: Color) -> Self {
        let counters = PieceCounters::from_board(&board);
        let mut pos = Self {
            board,
            turn,
            state: GameState::InProgress,
            counters,
        };
        pos.check_win();
        pos
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn current_state(&self) -> GameState {
        self.state
    }

    pub fn counters(&self) -> &PieceCounters {
        &self.counters
    }

    pub fn remaining(&self, color: Color, kind: PieceKind) -> u8 {
        self.counters.remaining(color, kind)
    }

    pub fn captured(&self, color: Color, kind: PieceKind) -> u8 {
        self.counters.captured(color, kind)
    }

    /// Try to play `from` -> `to` given in algebraic notation ("e2", "e4").
    ///
    /// Returns `true` if the move was played. A rejected move leaves the
    /// position untouched.
    pub fn attempt_move(&mut self, from: &str, to: &str) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Like [`Position::attempt_move`], but reports what happened or why
    /// the move was refused.
    pub fn try_move(&mut self, from: &str, to: &str) -> Result<MoveOutcome, MoveError> {
        let result = self.validate(from, to);
        match result {
            Ok((from, to, piece)) => Ok(self.execute(piece, from, to)),
            Err(e) => {
                debug!(from, to, reason = %e, "move rejected");
                Err(e)
            }
        }
    }

    /// Same as [`Position::try_move`] for squares already on the board.
    pub fn play(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        self.try_move(&from.to_string(), &to.to_string())
    }

    /// Run every rejection check in order without mutating anything.
    fn validate(&self, from: &str, to: &str) -> Result<(Square, Square, Piece), MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver(self.state));
        }
        let from_sq = parse_coord(from).ok_or_else(|| MoveError::OffBoard(from.to_string()))?;
        let to_sq = parse_coord(to).ok_or_else(|| MoveError::OffBoard(to.to_string()))?;

        let piece = self
            .board
            .get(from_sq)
            .ok_or(MoveError::EmptySquare(from_sq))?;
        if piece.color != self.turn {
            return Err(MoveError::WrongTurn {
                square: from_sq,
                color: piece.color,
            });
        }

        let target = self.board.get(to_sq);
        if target.is_some_and(|t| t.color == piece.color) {
            return Err(MoveError::FriendlyFire(to_sq));
        }

        if !rules::is_valid_shape(&self.board, piece, from_sq, to_sq) {
            return Err(MoveError::IllegalMove {
                piece,
                from: from_sq,
                to: to_sq,
            });
        }

        if piece.kind == PieceKind::King && target.is_some_and(|t| t.kind == PieceKind::King) {
            return Err(MoveError::KingCapturesKing);
        }

        Ok((from_sq, to_sq, piece))
    }

    /// Apply a validated move.
    fn execute(&mut self, piece: Piece, from: Square, to: Square) -> MoveOutcome {
        let captured = self.board.get(to);

        let collateral = match captured {
            Some(victim) => {
                let collateral = self.explode(from, to);
                self.counters.record_capture(victim);
                for &(_, p) in &collateral {
                    // Only kings are tallied from the blast; other casualties
                    // leave the counters alone.
                    if p.kind == PieceKind::King {
                        self.counters.record_capture(p);
                    }
                }
                collateral
            }
            None => {
                self.board.set(to, Some(piece));
                self.board.set(from, None);
                Vec::new()
            }
        };

        if !self.check_win() {
            self.turn = self.turn.opponent();
        }

        MoveOutcome {
            piece,
            from,
            to,
            captured,
            collateral,
            state: self.state,
        }
    }

    /// Detonate on `to`: remove every non-pawn in the blast zone, then clear
    /// both the capture square and the square the attacker came from.
    ///
    /// Returns the pieces destroyed other than the captured piece and the
    /// attacker. A king caught in the blast (the attacker's own included) is
    /// reported here.
    fn explode(&mut self, from: Square, to: Square) -> Vec<(Square, Piece)> {
        let mut collateral = Vec::new();
        for sq in Board::blast_zone(to) {
            let Some(p) = self.board.get(sq) else {
                continue;
            };
            if p.kind == PieceKind::Pawn {
                continue;
            }
            self.board.set(sq, None);
            if sq == to {
                continue;
            }
            if sq == from && p.kind != PieceKind::King {
                continue;
            }
            if p.kind == PieceKind::King {
                let color = p.color;
                debug!(square = %sq, %color, "king caught in explosion");
            }
            collateral.push((sq, p));
        }
        self.board.set(to, None);
        self.board.set(from, None);
        debug!(center = %to, casualties = collateral.len(), "explosion");
        collateral
    }

    /// Set the game state if either king count has reached zero.
    /// Returns `true` when the game is over.
    fn check_win(&mut self) -> bool {
        if self.state.is_over() {
            return true;
        }
        for color in [Color::White, Color::Black] {
            if self.counters.remaining(color, PieceKind::King) == 0 {
                self.state = GameState::won_by(color.opponent());
                info!(state = %self.state, "game over");
                return true;
            }
        }
        false
    }

    /// Every move the side to move could play right now.
    pub fn legal_moves(&self) -> Vec<(Square, Square)> {
        if self.state.is_over() {
            return Vec::new();
        }
        let mut moves = Vec::new();
        for (from, piece) in self.board.pieces() {
            if piece.color != self.turn {
                continue;
            }
            for to in Square::all() {
                if self.is_legal(piece, from, to) {
                    moves.push((from, to));
                }
            }
        }
        moves
    }

    /// Legal moves of the side to move starting on `from`.
    pub fn legal_moves_from(&self, from: Square) -> Vec<(Square, Square)> {
        self.legal_moves()
            .into_iter()
            .filter(|&(f, _)| f == from)
            .collect()
    }

    fn is_legal(&self, piece: Piece, from: Square, to: Square) -> bool {
        let target = self.board.get(to);
        if target.is_some_and(|t| t.color == piece.color) {
            return false;
        }
        if piece.kind == PieceKind::King && target.is_some_and(|t| t.kind == PieceKind::King) {
            return false;
        }
        rules::is_valid_shape(&self.board, piece, from, to)
    }

    /// Whether the side to move has at least one legal move.
    ///
    /// Diagnostic only: a side with no moves does not end the game.
    pub fn has_legal_move(&self) -> bool {
        !self.legal_moves().is_empty()
    }

    /// Whether the king of `color` is currently attacked.
    ///
    /// Diagnostic only: moves are never refused because of check.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        rules::king_attacked(&self.board, color)
    }
}

/// Translate a two-character algebraic coordinate into raw (row, col)
/// indices with row = 8 - rank and col = file - 'a'.
///
/// No range check happens here; an index outside `0..8` is left for
/// [`Square::new`] to reject. Input that is not one file byte followed by one
/// rank digit has no translation.
pub fn to_indices(s: &str) -> Option<(isize, isize)> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 || !bytes[1].is_ascii_digit() {
        return None;
    }
    let col = bytes[0] as isize - b'a' as isize;
    let rank = (bytes[1] - b'0') as isize;
    Some((N as isize - rank, col))
}

/// Parse an algebraic coordinate (e.g. "e4") into a square on the board.
///
/// Returns `None` for malformed input or anything off the 8x8 grid.
pub fn parse_coord(s: &str) -> Option<Square> {
    let (row, col) = to_indices(s)?;
    Square::new(row, col)
}

/// Convert a square to its algebraic coordinate (e.g. "e4").
pub fn str_coord(sq: Square) -> String {
    sq.to_string()
}
