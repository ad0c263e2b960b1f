use std::str::FromStr;
use std::time::Duration;

use kestrel::board::Board;
use kestrel::book::Book;
use kestrel::search::{root_search, SearchContext, TranspositionTable};

fn search_once(fen: &str, budget_ms: u64) -> kestrel::search::SearchReport {
    let mut board = Board::from_str(fen).unwrap();
    let mut tt = TranspositionTable::new(1 << 16);
    let mut ctx = SearchContext::new();
    let book = Book::empty();
    root_search(&mut board, &mut tt, &mut ctx, &book, Duration::from_millis(budget_ms))
}

#[test]
fn mate_in_one_is_found_from_the_rook_endgame() {
    let report = search_once("4k3/8/4K3/8/8/8/8/4R3 w - - 0 1", 1000);
    assert!(report.is_mate);
    assert_eq!(report.best_move.to_uci(), "e1e8");
}

#[test]
fn stalemate_position_yields_the_null_move() {
    let report = search_once("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 200);
    assert!(report.best_move.is_null());
}

#[test]
fn threefold_repetition_scores_as_a_draw() {
    let mut board = Board::new();
    let moves = ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"];
    for text in moves {
        let mut legal = kestrel::moves::buffer::MoveList::new();
        kestrel::moves::generate_legal(&board, false, &mut legal);
        let mv = legal.iter().find(|m| m.to_uci() == text).copied().expect("move should be legal");
        board.apply_full_move(mv);
    }
    assert!(board.is_threefold());

    let mut tt = TranspositionTable::new(1 << 16);
    let mut ctx = SearchContext::new();
    let book = Book::empty();
    let report = root_search(&mut board, &mut tt, &mut ctx, &book, Duration::from_millis(200));
    assert!(report.score_cp.abs() <= 1);
}

#[test]
fn promotion_to_queen_is_chosen_over_underpromotion() {
    let report = search_once("8/P7/8/8/8/8/8/4k2K w - - 0 1", 500);
    assert_eq!(report.best_move.to_uci(), "a7a8q");
}

#[test]
fn uci_handshake_emits_uciok_then_readyok() {
    let mut engine = kestrel::protocol::Engine::new(kestrel::config::EngineConfig::default(), Book::empty());
    assert!(engine.handle_line("uci"));
    assert!(engine.handle_line("isready"));
}
