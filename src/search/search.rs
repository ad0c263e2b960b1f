//! Quiescence search and the depth-limited alpha-beta search that sits on
//! top of it. Both take an explicit `maximizing` flag rather than folding
//! color into the recursion (no negamax): scores are always reported in
//! one fixed coordinate system (the evaluator's, i.e. White's point of
//! view), and the caller decides whether it is trying to raise or lower
//! that number.

use std::time::{Duration, Instant};

use crate::board::Board;
use crate::moves::buffer::MoveList;
use crate::moves::{generate_legal, is_in_check};
use crate::search::context::SearchContext;
use crate::search::eval::eval;
use crate::search::ordering::order;
use crate::search::tt::{NodeType, TranspositionTable, TtEntry};

/// Score magnitude used as the mate anchor; real scores never get close to
/// this, so `|score| >= MATE_THRESHOLD` unambiguously means "forced mate".
pub const MATE_SCORE: i32 = 32_000;
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;
pub const DRAW_SCORE: i32 = 0;

/// Ply/qdepth headroom the data model requires; also the iterative
/// deepening ceiling.
pub const MAX_PLY: usize = 64;
const MAX_Q_DEPTH: i32 = 32;

const IN_CHECK_PENALTY: i32 = 50;
const NULL_MOVE_R: i32 = 2;
const NODE_CHECK_INTERVAL: u64 = 1024;

fn time_is_up(nodes: u64, start_time: Instant, deadline: Duration) -> bool {
    nodes % NODE_CHECK_INTERVAL == 0 && start_time.elapsed() >= deadline
}

#[allow(clippy::too_many_arguments)]
pub fn qsearch(
    board: &mut Board,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    start_time: Instant,
    deadline: Duration,
    qdepth: i32,
    nodes: &mut u64,
    aborted: &mut bool,
) -> i32 {
    if *aborted {
        return 0;
    }
    *nodes += 1;
    if time_is_up(*nodes, start_time, deadline) {
        *aborted = true;
        return 0;
    }
    if qdepth <= 0 {
        return eval(board);
    }

    let in_check = is_in_check(board, board.side_to_move);
    let mut stand_pat = eval(board);
    if in_check {
        stand_pat += if maximizing { -IN_CHECK_PENALTY } else { IN_CHECK_PENALTY };
    }

    if !in_check {
        if maximizing {
            if stand_pat >= beta {
                return beta;
            }
            if stand_pat > alpha {
                alpha = stand_pat;
            }
        } else {
            if stand_pat <= alpha {
                return alpha;
            }
            if stand_pat < beta {
                beta = stand_pat;
            }
        }
    }

    let mut moves = MoveList::new();
    generate_legal(board, !in_check, &mut moves);

    if in_check && moves.is_empty() {
        let offset = (MAX_PLY as i32) + qdepth;
        return if maximizing { -(MATE_SCORE + offset) } else { MATE_SCORE + offset };
    }
    if !in_check && moves.is_empty() {
        return stand_pat;
    }

    let ctx = SearchContext::new();
    order(&mut moves, board, 0, &ctx);

    for mv in moves.iter() {
        let undo = board.make_move_for_search(*mv);
        let score = qsearch(board, alpha, beta, !maximizing, start_time, deadline, qdepth - 1, nodes, aborted);
        board.undo_move_for_search(undo);

        if *aborted {
            return 0;
        }

        if maximizing {
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                return beta;
            }
        } else {
            if score < beta {
                beta = score;
            }
            if beta <= alpha {
                return alpha;
            }
        }
    }

    if maximizing {
        alpha
    } else {
        beta
    }
}

/// Depth-limited alpha-beta search. `ply` counts plies from the search
/// root (used for killer-table indexing and mate-distance scoring);
/// `depth` counts remaining nominal depth and reaches 0 at the quiescence
/// handoff.
#[allow(clippy::too_many_arguments)]
pub fn search(
    board: &mut Board,
    tt: &mut TranspositionTable,
    ctx: &mut SearchContext,
    depth: i32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    start_time: Instant,
    deadline: Duration,
    ply: usize,
    allow_null: bool,
    nodes: &mut u64,
    aborted: &mut bool,
) -> i32 {
    if *aborted {
        return 0;
    }
    *nodes += 1;
    if time_is_up(*nodes, start_time, deadline) {
        *aborted = true;
        return 0;
    }

    if ply > 0 && (board.is_threefold() || board.halfmove_clock >= 100) {
        return DRAW_SCORE;
    }

    let key = board.key();
    if let Some(score) = tt.probe(&key, depth, alpha, beta) {
        return score;
    }

    let mut moves = MoveList::new();
    generate_legal(board, false, &mut moves);

    let in_check_now = is_in_check(board, board.side_to_move);
    if moves.is_empty() {
        return if in_check_now {
            if maximizing { -(MATE_SCORE + depth) } else { MATE_SCORE + depth }
        } else {
            DRAW_SCORE
        };
    }

    if depth <= 0 {
        return qsearch(board, alpha, beta, maximizing, start_time, deadline, MAX_Q_DEPTH, nodes, aborted);
    }

    if allow_null && !in_check_now && depth >= 3 {
        let (null_alpha, null_beta) = if maximizing { (beta - 1, beta) } else { (alpha, alpha + 1) };
        let prev_ep = board.make_null_move();
        let null_score = search(
            board,
            tt,
            ctx,
            depth - 1 - NULL_MOVE_R,
            null_alpha,
            null_beta,
            !maximizing,
            start_time,
            deadline,
            ply + 1,
            false,
            nodes,
            aborted,
        );
        board.undo_null_move(prev_ep);
        if *aborted {
            return 0;
        }
        if maximizing && null_score >= beta {
            return beta;
        }
        if !maximizing && null_score <= alpha {
            return alpha;
        }
    }

    order(&mut moves, board, ply, ctx);

    let original_alpha = alpha;
    let original_beta = beta;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for (move_index, mv) in moves.iter().enumerate() {
        let is_capture = mv.is_en_passant || board.piece_at(mv.to()).is_some();
        let undo = board.make_move_for_search(*mv);
        let gives_check = is_in_check(board, board.side_to_move);

        let mut new_depth = depth - 1;
        if gives_check && depth < MAX_PLY as i32 {
            new_depth += 1;
        }

        let apply_lmr = depth >= 3
            && move_index >= 3
            && !is_capture
            && mv.promotion.is_none()
            && !in_check_now
            && !gives_check;

        let mut score = if apply_lmr {
            search(board, tt, ctx, new_depth - 1, alpha, beta, !maximizing, start_time, deadline, ply + 1, true, nodes, aborted)
        } else {
            search(board, tt, ctx, new_depth, alpha, beta, !maximizing, start_time, deadline, ply + 1, true, nodes, aborted)
        };

        let reduced_missed = apply_lmr
            && if maximizing { score > alpha } else { score < beta };
        if reduced_missed {
            score = search(board, tt, ctx, new_depth, alpha, beta, !maximizing, start_time, deadline, ply + 1, true, nodes, aborted);
        }
        board.undo_move_for_search(undo);

        if *aborted {
            return 0;
        }

        let mut cutoff = false;
        if maximizing {
            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                cutoff = true;
            }
        } else {
            if score < best {
                best = score;
            }
            if score < beta {
                beta = score;
            }
            if beta <= alpha {
                cutoff = true;
            }
        }

        if cutoff {
            if !is_capture && mv.promotion.is_none() && ply < crate::search::context::MAX_KILLER_PLY {
                ctx.update_killer(ply, *mv);
                ctx.update_history(*mv, depth * depth);
            }
            break;
        }
    }

    let flag = if maximizing {
        if best <= original_alpha {
            NodeType::UpperBound
        } else if best >= original_beta {
            NodeType::LowerBound
        } else {
            NodeType::Exact
        }
    } else if best >= original_beta {
        NodeType::LowerBound
    } else if best <= original_alpha {
        NodeType::UpperBound
    } else {
        NodeType::Exact
    };

    tt.store(&key, TtEntry { score: best, depth, flag, best_move: None });

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn fresh() -> (TranspositionTable, SearchContext) {
        (TranspositionTable::new(1024), SearchContext::new())
    }

    #[test]
    fn finds_mate_in_one_for_the_side_to_move() {
        let mut board = Board::from_str("4k3/8/4K3/8/8/8/8/4R3 w - - 0 1").unwrap();
        let (mut tt, mut ctx) = fresh();
        let mut nodes = 0;
        let mut aborted = false;
        let score = search(
            &mut board,
            &mut tt,
            &mut ctx,
            3,
            -MATE_SCORE - 100,
            MATE_SCORE + 100,
            true,
            Instant::now(),
            Duration::from_secs(5),
            0,
            true,
            &mut nodes,
            &mut aborted,
        );
        assert!(score >= MATE_THRESHOLD, "expected a mate score, got {score}");
    }

    #[test]
    fn stalemate_position_scores_as_a_draw() {
        let mut board = Board::from_str("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let (mut tt, mut ctx) = fresh();
        let mut nodes = 0;
        let mut aborted = false;
        let score = search(
            &mut board,
            &mut tt,
            &mut ctx,
            2,
            -MATE_SCORE - 100,
            MATE_SCORE + 100,
            false,
            Instant::now(),
            Duration::from_secs(5),
            0,
            true,
            &mut nodes,
            &mut aborted,
        );
        assert_eq!(score, DRAW_SCORE);
    }

    #[test]
    fn abort_flag_short_circuits_to_zero() {
        let mut board = Board::new();
        let (mut tt, mut ctx) = fresh();
        let mut nodes = 0;
        let mut aborted = true;
        let score = search(
            &mut board, &mut tt, &mut ctx, 4, -100, 100, true,
            Instant::now(), Duration::from_secs(5), 0, true, &mut nodes, &mut aborted,
        );
        assert_eq!(score, 0);
    }

    #[test]
    fn qsearch_on_a_quiet_leaf_returns_static_eval() {
        let mut board = Board::new();
        let mut nodes = 0;
        let mut aborted = false;
        let score = qsearch(&mut board, -100_000, 100_000, true, Instant::now(), Duration::from_secs(5), 4, &mut nodes, &mut aborted);
        assert_eq!(score, eval(&board));
    }
}
