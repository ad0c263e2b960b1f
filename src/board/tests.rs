use super::*;
use std::str::FromStr;

#[test]
fn starting_position_key_round_trips_through_fen() {
    let board = Board::new();
    let fen = board.to_fen();
    assert_eq!(
        fen,
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
    let reparsed = Board::from_str(&fen).unwrap();
    assert_eq!(reparsed.key(), board.key());
}

#[test]
fn parse_placement_defaults_missing_counters() {
    let board = Board::from_str("8/8/8/8/8/8/8/K6k w - -").unwrap();
    assert_eq!(board.halfmove_clock, 0);
    assert_eq!(board.fullmove_number, 1);
}

#[test]
fn key_excludes_move_counters() {
    let a = Board::from_str("8/8/8/8/8/8/8/K6k w - - 0 1").unwrap();
    let b = Board::from_str("8/8/8/8/8/8/8/K6k w - - 12 34").unwrap();
    assert_eq!(a.key(), b.key());
}

#[test]
fn apply_raw_move_relocates_piece_and_toggles_side() {
    let mut board = Board::new();
    let mv = Move::new(Square::new(6, 4), Square::new(4, 4));
    board.apply_raw_move(mv);
    assert_eq!(board.piece_at(Square::new(6, 4)), None);
    assert_eq!(board.piece_at(Square::new(4, 4)), Some((Color::White, Piece::Pawn)));
    assert_eq!(board.side_to_move, Color::Black);
    assert_eq!(board.en_passant, Some(Square::new(5, 4)));
}

#[test]
fn en_passant_capture_removes_victim_behind_destination() {
    // White pawn e5, black just played d7-d5.
    let mut board = Board::from_str("8/8/8/3pP3/8/8/8/K6k w - d6 0 1").unwrap();
    let mut mv = Move::new(Square::new(3, 4), Square::new(2, 3));
    mv.is_en_passant = true;
    board.apply_raw_move(mv);
    assert_eq!(board.piece_at(Square::new(3, 3)), None, "captured pawn must be removed");
    assert_eq!(board.piece_at(Square::new(2, 3)), Some((Color::White, Piece::Pawn)));
}

#[test]
fn king_move_revokes_both_castling_rights() {
    let mut board = Board::new();
    let mv = Move::new(Square::new(7, 4), Square::new(7, 5));
    board.apply_raw_move(mv);
    assert!(!board.has_kingside_castle(Color::White));
    assert!(!board.has_queenside_castle(Color::White));
    assert!(board.has_kingside_castle(Color::Black));
}

#[test]
fn rook_captured_on_origin_corner_revokes_right() {
    // Black knight on f2 captures the rook sitting on White's original h1 corner.
    let mut board = Board::from_str("4k3/8/8/8/8/8/5n2/4K2R b K - 0 1").unwrap();
    assert!(board.has_kingside_castle(Color::White));
    let mv = Move::new(Square::new(6, 5), Square::new(7, 7));
    board.apply_raw_move(mv);
    assert!(!board.has_kingside_castle(Color::White));
}

#[test]
fn castling_right_transitions_are_one_directional() {
    let mut board = Board::new();
    assert!(board.has_kingside_castle(Color::White));
    board.castling_rights &= !CASTLE_WK;
    assert!(!board.has_kingside_castle(Color::White));
}

#[test]
fn short_castle_relocates_rook() {
    let mut board = Board::from_str("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let mut mv = Move::new(Square::new(7, 4), Square::new(7, 6));
    mv.is_short_castle = true;
    board.apply_raw_move(mv);
    assert_eq!(board.piece_at(Square::new(7, 5)), Some((Color::White, Piece::Rook)));
    assert_eq!(board.piece_at(Square::new(7, 7)), None);
    assert_eq!(board.piece_at(Square::new(7, 6)), Some((Color::White, Piece::King)));
}

#[test]
fn promotion_substitutes_piece() {
    let mut board = Board::from_str("8/P7/8/8/8/8/8/4k2K w - - 0 1").unwrap();
    let mv = Move::new(Square::new(1, 0), Square::new(0, 0)).with_promotion(Piece::Queen);
    board.apply_raw_move(mv);
    assert_eq!(board.piece_at(Square::new(0, 0)), Some((Color::White, Piece::Queen)));
}

#[test]
fn apply_full_move_resets_clock_on_pawn_push_and_increments_fullmove_after_black() {
    let mut board = Board::new();
    board.apply_full_move(Move::new(Square::new(6, 4), Square::new(4, 4)));
    assert_eq!(board.halfmove_clock, 0);
    assert_eq!(board.fullmove_number, 1);
    board.apply_full_move(Move::new(Square::new(1, 4), Square::new(3, 4)));
    assert_eq!(board.fullmove_number, 2);
}

#[test]
fn repetition_map_increments_exactly_once_per_applied_move() {
    let mut board = Board::new();
    assert_eq!(board.repetition_count(), 1);
    board.apply_full_move(Move::new(Square::new(7, 6), Square::new(5, 5)));
    assert_eq!(board.repetition_count(), 1);
}

#[test]
fn move_equality_ignores_score() {
    let mut a = Move::new(Square::new(6, 4), Square::new(4, 4));
    a.score = 10;
    let mut b = Move::new(Square::new(6, 4), Square::new(4, 4));
    b.score = -500;
    assert_eq!(a, b);
}
