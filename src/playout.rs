//! Random playouts (random game simulation).
//!
//! A playout plays uniformly random legal moves until a king is gone, the
//! side to move is stuck, or the ply limit is reached. Used by the demo
//! command, the `random` protocol command, and the property tests.

use tracing::debug;

use crate::board::Square;
use crate::position::{GameState, Position};

/// Why a playout stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayoutEnd {
    /// A king was removed from the board.
    Decided,
    /// The side to move had no legal move.
    NoMoves,
    /// The ply limit was reached.
    PlyLimit,
}

/// Summary of a finished playout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayoutResult {
    pub plies: usize,
    pub state: GameState,
    pub end: PlayoutEnd,
}

/// Pick one legal move for the side to move, uniformly at random.
pub fn choose_random_move(pos: &Position, rng: &mut fastrand::Rng) -> Option<(Square, Square)> {
    let moves = pos.legal_moves();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// Play random legal moves on `pos` until the game ends, the side to move
/// has nothing to play, or `max_plies` moves have been made.
pub fn random_game(pos: &mut Position, rng: &mut fastrand::Rng, max_plies: usize) -> PlayoutResult {
    let mut plies = 0;
    let end = loop {
        if pos.current_state().is_over() {
            break PlayoutEnd::Decided;
        }
        if plies >= max_plies {
            break PlayoutEnd::PlyLimit;
        }
        let Some((from, to)) = choose_random_move(pos, rng) else {
            break PlayoutEnd::NoMoves;
        };
        // Moves come from `legal_moves`, so a refusal means the two disagree.
        if let Err(e) = pos.play(from, to) {
            debug!(%from, %to, error = %e, "generated move was refused");
            break PlayoutEnd::NoMoves;
        }
        plies += 1;
    };
    debug!(plies, state = %pos.current_state(), ?end, "playout finished");
    PlayoutResult {
        plies,
        state: pos.current_state(),
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Color};

    #[test]
    fn test_playout_is_deterministic_per_seed() {
        let mut a = Position::new();
        let mut b = Position::new();
        let ra = random_game(&mut a, &mut fastrand::Rng::with_seed(7), 120);
        let rb = random_game(&mut b, &mut fastrand::Rng::with_seed(7), 120);
        assert_eq!(ra, rb);
        assert_eq!(a, b);
    }

    #[test]
    fn test_playout_respects_ply_limit() {
        let mut pos = Position::new();
        let r = random_game(&mut pos, &mut fastrand::Rng::with_seed(1), 0);
        assert_eq!(r.plies, 0);
        assert_eq!(r.end, PlayoutEnd::PlyLimit);
        assert_eq!(pos, Position::new());
    }

    #[test]
    fn test_playout_on_decided_game() {
        let board = Board::from_diagram(
            "k.......
             ........
             ........
             ........
             ........
             ........
             ........
             ........",
        )
        .unwrap();
        let mut pos = Position::from_board(board, Color::White);
        let r = random_game(&mut pos, &mut fastrand::Rng::with_seed(3), 50);
        assert_eq!(r.plies, 0);
        assert_eq!(r.end, PlayoutEnd::Decided);
        assert_eq!(r.state, GameState::BlackWon);
    }

    #[test]
    fn test_playout_runs_until_a_stop_condition() {
        let mut pos = Position::new();
        let r = random_game(&mut pos, &mut fastrand::Rng::with_seed(42), 200);
        match r.end {
            PlayoutEnd::Decided => assert!(r.state.is_over()),
            PlayoutEnd::NoMoves => assert!(!pos.has_legal_move()),
            PlayoutEnd::PlyLimit => assert_eq!(r.plies, 200),
        }
    }

    #[test]
    fn test_choose_random_move_is_legal() {
        let pos = Position::new();
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..20 {
            let mv = choose_random_move(&pos, &mut rng).unwrap();
            assert!(pos.legal_moves().contains(&mv));
        }
    }
}
