//! Root driver: iterative deepening over the alpha-beta search, with
//! aspiration windows, a time budget, and tie-broken move selection among
//! root moves that finish level on score.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::board::{Board, Color, Move};
use crate::book::Book;
use crate::moves::buffer::MoveList;
use crate::moves::generate_legal;
use crate::search::context::SearchContext;
use crate::search::ordering::order;
use crate::search::search::{search, MATE_SCORE, MATE_THRESHOLD, MAX_PLY};
use crate::search::tt::TranspositionTable;

const ASPIRATION_WINDOW: i32 = 50;
const ASPIRATION_START_DEPTH: i32 = 3;

pub struct SearchReport {
    pub best_move: Move,
    /// Engine-perspective centipawn score (positive always favors the
    /// engine), meaningless when `is_mate` is set.
    pub score_cp: i32,
    pub is_mate: bool,
    /// Signed mate distance in moves; only meaningful when `is_mate`.
    pub mate_in: i32,
    pub depth: i32,
    pub nodes: u64,
    pub elapsed_ms: u128,
}

impl SearchReport {
    fn info_line(&self) -> String {
        let score_part = if self.is_mate {
            format!("mate {}", self.mate_in)
        } else {
            format!("cp {}", self.score_cp)
        };
        let nps = if self.elapsed_ms == 0 { self.nodes * 1000 } else { (self.nodes as u128 * 1000 / self.elapsed_ms) as u64 };
        format!(
            "info depth {} score {} time {} nodes {} nps {} pv {}",
            self.depth, score_part, self.elapsed_ms, self.nodes, nps, self.best_move.to_uci()
        )
    }
}

fn to_report(white_score: i32, engine_is_white: bool, best_move: Move, depth: i32, nodes: u64, elapsed_ms: u128) -> SearchReport {
    let engine_score = if engine_is_white { white_score } else { -white_score };
    if engine_score.abs() >= MATE_THRESHOLD {
        let plies_to_mate = MATE_SCORE - engine_score.abs();
        let moves_to_mate = (plies_to_mate + 1) / 2;
        SearchReport {
            best_move,
            score_cp: 0,
            is_mate: true,
            mate_in: if engine_score > 0 { moves_to_mate } else { -moves_to_mate },
            depth,
            nodes,
            elapsed_ms,
        }
    } else {
        SearchReport { best_move, score_cp: engine_score, is_mate: false, mate_in: 0, depth, nodes, elapsed_ms }
    }
}

/// Run the full iterative-deepening root search for `budget`, printing one
/// `info` line per completed depth and returning the final choice.
pub fn root_search(board: &mut Board, tt: &mut TranspositionTable, ctx: &mut SearchContext, book: &Book, budget: Duration) -> SearchReport {
    ctx.clear();
    let start_time = Instant::now();
    let engine_is_white = board.side_to_move == Color::White;

    let mut root_moves = MoveList::new();
    generate_legal(board, false, &mut root_moves);
    if root_moves.is_empty() {
        return SearchReport {
            best_move: Move::null(),
            score_cp: 0,
            is_mate: false,
            mate_in: 0,
            depth: 0,
            nodes: 0,
            elapsed_ms: start_time.elapsed().as_millis(),
        };
    }

    if let Some(book_move) = book.probe(board) {
        return SearchReport {
            best_move: book_move,
            score_cp: 0,
            is_mate: false,
            mate_in: 0,
            depth: 0,
            nodes: 0,
            elapsed_ms: start_time.elapsed().as_millis(),
        };
    }

    order(&mut root_moves, board, 0, ctx);

    let mut nodes = 0u64;
    let mut aborted = false;
    let mut best_report: Option<SearchReport> = None;
    let mut prev_white_score: Option<i32> = None;

    'iterative_deepening: for depth in 1..=MAX_PLY as i32 {
        let (alpha, beta) = match prev_white_score {
            Some(prev) if depth >= ASPIRATION_START_DEPTH => (prev - ASPIRATION_WINDOW, prev + ASPIRATION_WINDOW),
            _ => (-(MATE_SCORE + 1), MATE_SCORE + 1),
        };

        let mut iteration_best_white_score = if engine_is_white { i32::MIN } else { i32::MAX };
        let mut tie_set: Vec<Move> = Vec::new();
        let mut iteration_aborted = false;

        for &mv in root_moves.iter() {
            let undo = board.make_move_for_search(mv);
            let mut score = search(
                board, tt, ctx, depth - 1, alpha, beta, !engine_is_white,
                start_time, budget, 1, true, &mut nodes, &mut aborted,
            );
            if !aborted && (score <= alpha || score >= beta) {
                score = search(
                    board, tt, ctx, depth - 1, -(MATE_SCORE + 1), MATE_SCORE + 1, !engine_is_white,
                    start_time, budget, 1, true, &mut nodes, &mut aborted,
                );
            }
            board.undo_move_for_search(undo);

            if aborted {
                iteration_aborted = true;
                break;
            }

            let is_better = if engine_is_white { score > iteration_best_white_score } else { score < iteration_best_white_score };
            if is_better {
                iteration_best_white_score = score;
                tie_set.clear();
                tie_set.push(mv);
            } else if score == iteration_best_white_score {
                tie_set.push(mv);
            }
        }

        if iteration_aborted || tie_set.is_empty() {
            break 'iterative_deepening;
        }

        let chosen = tie_set[rand::rng().random_range(0..tie_set.len())];
        prev_white_score = Some(iteration_best_white_score);

        let report = to_report(iteration_best_white_score, engine_is_white, chosen, depth, nodes, start_time.elapsed().as_millis());
        println!("{}", report.info_line());
        let stop_on_mate = report.is_mate;
        best_report = Some(report);

        if stop_on_mate || start_time.elapsed() >= budget {
            break 'iterative_deepening;
        }
    }

    best_report.unwrap_or_else(|| SearchReport {
        best_move: root_moves[0],
        score_cp: 0,
        is_mate: false,
        mate_in: 0,
        depth: 0,
        nodes,
        elapsed_ms: start_time.elapsed().as_millis(),
    })
}
