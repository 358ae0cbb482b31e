//! Per-piece movement rules and attack queries.
//!
//! Legality here is purely geometric: a move is judged only by the piece's
//! movement shape and, for sliders, by whether the squares in between are
//! empty. Nothing in this module looks at whether a king is attacked before
//! accepting a move; the attack queries exist for diagnostics only.

use crate::board::{Board, Color, Piece, PieceKind, Square};

/// Check whether `piece` standing on `from` may move to `to` on `board`.
///
/// Only the movement shape and path occlusion are tested. Turn order,
/// friendly fire and the game state are the caller's concern.
pub fn is_valid_shape(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let dr = to.row() as isize - from.row() as isize;
    let dc = to.col() as isize - from.col() as isize;
    let target = board.get(to);

    match piece.kind {
        PieceKind::Pawn => {
            let fwd = piece.color.forward();
            let enemy_target = target.is_some_and(|t| t.color != piece.color);
            // The square jumped over by a double step is not inspected.
            (dc == 0 && dr == fwd && target.is_none())
                || (dc == 0
                    && dr == 2 * fwd
                    && from.row() == piece.color.pawn_row()
                    && target.is_none())
                || (dr == fwd && dc.abs() == 1 && enemy_target)
        }
        PieceKind::Rook => (dr == 0 || dc == 0) && path_clear(board, from, to),
        PieceKind::Knight => matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2)),
        PieceKind::Bishop => dr.abs() == dc.abs() && path_clear(board, from, to),
        PieceKind::Queen => {
            (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && path_clear(board, from, to)
        }
        PieceKind::King => dr.abs().max(dc.abs()) == 1,
    }
}

/// Walk the squares strictly between `from` and `to` one unit step at a
/// time. Returns `false` as soon as an occupied square is found.
///
/// `from` and `to` must share a row, column or diagonal.
pub fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let dr = (to.row() as isize - from.row() as isize).signum();
    let dc = (to.col() as isize - from.col() as isize).signum();
    let mut cur = from.offset(dr, dc);
    while let Some(sq) = cur {
        if sq == to {
            return true;
        }
        if !board.is_empty(sq) {
            return false;
        }
        cur = sq.offset(dr, dc);
    }
    // Stepped off the board without meeting `to`: not on a shared line.
    false
}

/// Whether the piece on `from` could capture whatever stands on `to`.
pub fn attacks(board: &Board, from: Square, to: Square) -> bool {
    match (board.get(from), board.get(to)) {
        (Some(attacker), Some(target)) if attacker.color != target.color => {
            is_valid_shape(board, attacker, from, to)
        }
        _ => false,
    }
}

/// Whether any piece of the opposite color attacks the king of `color`.
///
/// Returns `false` when that king is no longer on the board.
pub fn king_attacked(board: &Board, color: Color) -> bool {
    let Some(king_sq) = board.king_square(color) else {
        return false;
    };
    board
        .pieces()
        .filter(|&(_, p)| p.color != color)
        .any(|(sq, _)| attacks(board, sq, king_sq))
}
