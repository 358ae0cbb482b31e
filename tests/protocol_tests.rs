//! Tests for the text protocol, driven through in-memory input and output.

use atomic_chess::position::{parse_coord, GameState};
use atomic_chess::protocol::ProtocolEngine;

/// Feed `script` to a fresh engine and return the responses, one entry per
/// command, with the trailing blank line removed.
fn run_script(engine: &mut ProtocolEngine, script: &str) -> Vec<String> {
    let mut out = Vec::new();
    engine.run_io(script.as_bytes(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    text.split("\n\n")
        .map(str::to_string)
        .filter(|r| !r.is_empty())
        .collect()
}

#[test]
fn test_ids_and_prefixes() {
    let mut engine = ProtocolEngine::with_seed(1);
    let replies = run_script(&mut engine, "1 state\n2 move e2 e5\n3 turn\n");
    assert_eq!(
        replies,
        vec![
            "=1 UNFINISHED",
            "?2 white pawn cannot move from e2 to e5",
            "=3 white"
        ]
    );
}

#[test]
fn test_comments_and_blank_lines_are_skipped() {
    let mut engine = ProtocolEngine::with_seed(1);
    let replies = run_script(&mut engine, "# opening\n\n   \nmove e2 e4\n");
    assert_eq!(replies, vec!["= UNFINISHED"]);
}

#[test]
fn test_quit_stops_reading() {
    let mut engine = ProtocolEngine::with_seed(1);
    let replies = run_script(&mut engine, "quit\nmove e2 e4\n");
    assert_eq!(replies, vec!["= "]);
    assert_eq!(engine.position().current_state(), GameState::InProgress);
    let e2 = parse_coord("e2").unwrap();
    assert!(engine.position().board().get(e2).is_some());
}

#[test]
fn test_game_to_a_win() {
    let mut engine = ProtocolEngine::with_seed(1);
    let replies = run_script(
        &mut engine,
        "move e2 e3\nmove e7 e6\nmove d1 h5\nmove e8 e7\nmove h5 f7\nstate\nmove a2 a3\n",
    );
    assert_eq!(replies[4], "= WHITE_WON");
    assert_eq!(replies[5], "= WHITE_WON");
    assert_eq!(replies[6], "? game is over (WHITE_WON)");
}

#[test]
fn test_board_and_counts() {
    let mut engine = ProtocolEngine::with_seed(1);
    let replies = run_script(&mut engine, "board\ncounts\n");
    assert!(replies[0].starts_with("= \n  a b c d e f g h\n8 r n b q k b n r 8"));
    assert!(replies[1].contains("white remaining 8 2 2 2 1 1"));
    assert!(replies[1].contains("black remaining 8 2 2 2 1 1"));
}

#[test]
fn test_attacked_and_unknown() {
    let mut engine = ProtocolEngine::with_seed(1);
    let replies = run_script(&mut engine, "attacked white\nattacked purple\nfly e2\n");
    assert_eq!(replies[0], "= false");
    assert_eq!(replies[1], "? expected 'white' or 'black'");
    assert_eq!(replies[2], "? unknown command: fly");
}

#[test]
fn test_random_is_reproducible() {
    let mut a = ProtocolEngine::with_seed(99);
    let mut b = ProtocolEngine::with_seed(99);
    let ra = run_script(&mut a, "random\nrandom\nrandom\n");
    let rb = run_script(&mut b, "random\nrandom\nrandom\n");
    assert_eq!(ra, rb);
    assert_eq!(a.position(), b.position());
    assert!(ra.iter().all(|r| r.starts_with('=')));
}
