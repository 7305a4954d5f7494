//! Test suite for the rules adapter
//!
//! Exercises the operations the session controller relies on: legality,
//! push/pop symmetry, notation parsing, and each terminal condition.

use super::*;
use crate::game::error::GameError;
use crate::game::types::Move;
use shakmaty::{Color, Role, Square};

fn uci(text: &str) -> Move {
    text.parse().expect("test move must be valid UCI")
}

/// Play a list of UCI moves from the starting position
fn board_after(moves: &[&str]) -> BoardState {
    let parsed: Vec<Move> = moves.iter().map(|m| uci(m)).collect();
    BoardState::replay(&parsed).expect("test line must be legal")
}

#[test]
fn test_initial_position_has_twenty_moves() {
    let board = BoardState::new_game();
    assert_eq!(board.legal_moves().len(), 20);
    assert_eq!(board.turn(), Color::White);
    assert!(board.moves().is_empty());
    assert!(!board.is_terminal());
}

#[test]
fn test_push_rejects_illegal_move() {
    let mut board = BoardState::new_game();
    let err = board.push(uci("e2e5")).unwrap_err();
    assert_eq!(err, GameError::IllegalMove { mv: uci("e2e5") });
    assert!(board.moves().is_empty(), "rejected move must not be recorded");
}

#[test]
fn test_push_then_pop_restores_position() {
    //! pop is the exact inverse of push
    let mut board = BoardState::new_game();
    let start_fen = board.fen();

    board.push(uci("e2e4")).unwrap();
    assert_eq!(board.turn(), Color::Black);
    assert_eq!(board.last_move(), Some(uci("e2e4")));

    assert_eq!(board.pop(), Some(uci("e2e4")));
    assert_eq!(board.fen(), start_fen);
    assert_eq!(board.pop(), None, "nothing left to pop");
}

#[test]
fn test_castling_uses_king_destination() {
    let board = board_after(&["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);
    assert!(board.is_legal(uci("e1g1")), "short castling should be legal");
    assert!(!board.is_legal(uci("e1h1")), "king-takes-rook form is not used");
}

#[test]
fn test_promotion_requires_piece() {
    let board = board_after(&[
        "a2a4", "b7b5", "a4b5", "a7a6", "b5a6", "c8b7", "a6b7", "h7h6",
    ]);
    assert!(board.is_legal(Move::with_promotion(Square::B7, Square::A8, Role::Queen)));
    assert!(board.is_legal(Move::with_promotion(Square::B7, Square::A8, Role::Knight)));
    assert!(!board.is_legal(Move::new(Square::B7, Square::A8)));
}

#[test]
fn test_parse_notation_accepts_uci_and_san() {
    let board = BoardState::new_game();
    assert_eq!(board.parse_notation("g1f3").unwrap(), uci("g1f3"));
    assert_eq!(board.parse_notation("Nf3").unwrap(), uci("g1f3"));
    assert_eq!(board.parse_notation(" e4 ").unwrap(), uci("e2e4"));
}

#[test]
fn test_parse_notation_castling_variants() {
    let board = board_after(&["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);
    assert_eq!(board.parse_notation("O-O").unwrap(), uci("e1g1"));
    assert_eq!(board.parse_notation("0-0").unwrap(), uci("e1g1"));
}

#[test]
fn test_parse_notation_rejects_unplayable_san() {
    let board = BoardState::new_game();
    assert!(matches!(
        board.parse_notation("Nf6"),
        Err(GameError::Notation { .. })
    ));
    assert!(matches!(
        board.parse_notation("hello"),
        Err(GameError::Notation { .. })
    ));
}

#[test]
fn test_parse_notation_keeps_illegal_uci() {
    //! Illegal UCI still parses so the caller can reject it as illegal
    let board = BoardState::new_game();
    assert_eq!(board.parse_notation("e2e5").unwrap(), uci("e2e5"));
}

#[test]
fn test_fools_mate_is_checkmate() {
    let board = board_after(&["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert!(board.is_terminal());
    assert_eq!(board.termination(), Some(Termination::Checkmate));
    assert_eq!(board.result(), Some(BoardResult::BlackWin));
    assert!(board.legal_moves().is_empty());
}

#[test]
fn test_threefold_repetition_is_draw() {
    let board = board_after(&[
        "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
    ]);
    assert_eq!(board.termination(), Some(Termination::Repetition));
    assert_eq!(board.result(), Some(BoardResult::Draw));
}

#[test]
fn test_two_repetitions_are_not_terminal() {
    let board = board_after(&["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert!(!board.is_terminal());
    assert_eq!(board.result(), None);
}

#[test]
fn test_san_adds_check_suffix() {
    let board = board_after(&["f2f3", "e7e5", "g2g4"]);
    assert_eq!(board.san(uci("d8h4")).as_deref(), Some("Qh4#"));

    let board = board_after(&["e2e4", "f7f5"]);
    assert_eq!(board.san(uci("d1h5")).as_deref(), Some("Qh5+"));
}

#[test]
fn test_legal_targets_for_knight() {
    let board = BoardState::new_game();
    assert_eq!(board.legal_targets(Square::G1), vec![Square::F3, Square::H3]);
    assert!(board.legal_targets(Square::E4).is_empty());
}

#[test]
fn test_legal_targets_collapse_promotions() {
    let board = board_after(&[
        "a2a4", "b7b5", "a4b5", "a7a6", "b5a6", "c8b7", "a6b7", "h7h6",
    ]);
    assert_eq!(board.legal_targets(Square::B7), vec![Square::A8]);

    let queen = board_after(&["e2e4", "e7e5"]);
    let targets = queen.legal_targets(Square::D1);
    assert_eq!(targets, vec![Square::E2, Square::F3, Square::G4, Square::H5]);
}
