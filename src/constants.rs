//! Constants for board geometry, the starting layout, and engine limits.
//!
//! The rules of the variant are fixed: there is no runtime configuration of
//! the board size or the initial position.

use crate::board::PieceKind;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Number of squares on the board.
pub const NUM_SQUARES: usize = N * N;

/// File letters in column order (column 0 = file 'a').
pub const FILES: &str = "abcdefgh";

// =============================================================================
// Starting Position
// =============================================================================

/// Back rank from file 'a' to file 'h', identical for both colors.
pub const BACK_RANK: [PieceKind; N] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Row of Black's back rank (rank 8).
pub const BLACK_BACK_ROW: usize = 0;

/// Row of Black's pawns (rank 7). Black pawns may double-step from here.
pub const BLACK_PAWN_ROW: usize = 1;

/// Row of White's pawns (rank 2). White pawns may double-step from here.
pub const WHITE_PAWN_ROW: usize = 6;

/// Row of White's back rank (rank 1).
pub const WHITE_BACK_ROW: usize = 7;

/// Pieces per side at the start, indexed by [`PieceKind::index`].
/// Order: pawn, rook, knight, bishop, queen, king.
pub const STARTING_COUNTS: [u8; 6] = [8, 2, 2, 2, 1, 1];

// =============================================================================
// Explosions
// =============================================================================

/// Distance from the capture square swept by an explosion (1 = 3x3 area).
pub const BLAST_RADIUS: isize = 1;

// =============================================================================
// Rendering
// =============================================================================

/// Filler character for empty squares.
pub const EMPTY: char = '.';

// =============================================================================
// Playouts and Tooling
// =============================================================================

/// Default ply limit for random playouts.
pub const MAX_PLAYOUT_PLIES: usize = 300;

/// Environment variable holding the `tracing` filter for the binary.
pub const LOG_ENV: &str = "ATOMIC_CHESS_LOG";
