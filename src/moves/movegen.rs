//! Move generator: pseudo-legal enumeration for the side to move, followed
//! by a legality filter that discards moves leaving the mover's own king in
//! check.

use super::attacks::{is_attacked, is_in_check};
use super::buffer::MoveBuffer;
use crate::board::{Board, Color, Move, Piece, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1),
];
const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

#[inline]
fn in_bounds(row: i8, col: i8) -> bool {
    (0..8).contains(&row) && (0..8).contains(&col)
}

fn push_with_promotions<B: MoveBuffer>(out: &mut B, from: Square, to: Square, captures_only: bool, is_capture: bool) {
    let is_promotion_rank = to.row == 0 || to.row == 7;
    if is_promotion_rank {
        for &p in PROMOTION_PIECES.iter() {
            out.push(Move::new(from, to).with_promotion(p));
        }
    } else if is_capture || !captures_only {
        out.push(Move::new(from, to));
    }
}

/// Enumerate pseudo-legal moves for the side to move into `out`. When
/// `captures_only` is set, quiet pawn pushes, quiet knight/king jumps, and
/// castling are skipped; en-passant and promotion-captures are still
/// emitted (quiescence depends on this).
pub fn generate_pseudo_legal<B: MoveBuffer>(board: &Board, captures_only: bool, out: &mut B) {
    let side = board.side_to_move;
    for row in 0..8u8 {
        for col in 0..8u8 {
            let from = Square::new(row, col);
            let Some((color, piece)) = board.piece_at(from) else { continue };
            if color != side {
                continue;
            }
            match piece {
                Piece::Pawn => generate_pawn_moves(board, from, side, captures_only, out),
                Piece::Knight => generate_offsets(board, from, side, &KNIGHT_OFFSETS, captures_only, out),
                Piece::King => generate_offsets(board, from, side, &KING_OFFSETS, captures_only, out),
                Piece::Bishop => generate_slides(board, from, side, &BISHOP_DIRS, captures_only, out),
                Piece::Rook => generate_slides(board, from, side, &ROOK_DIRS, captures_only, out),
                Piece::Queen => {
                    generate_slides(board, from, side, &BISHOP_DIRS, captures_only, out);
                    generate_slides(board, from, side, &ROOK_DIRS, captures_only, out);
                }
            }
        }
    }
    if !captures_only {
        generate_castling(board, side, out);
    }
}

fn generate_pawn_moves<B: MoveBuffer>(board: &Board, from: Square, side: Color, captures_only: bool, out: &mut B) {
    let (forward, start_row): (i8, u8) = if side == Color::White { (-1, 6) } else { (1, 1) };

    // Single push / double push.
    if !captures_only {
        let r1 = from.row as i8 + forward;
        if in_bounds(r1, from.col as i8) {
            let one = Square::new(r1 as u8, from.col);
            if board.piece_at(one).is_none() {
                push_with_promotions(out, from, one, captures_only, false);
                if from.row == start_row {
                    let r2 = from.row as i8 + 2 * forward;
                    let two = Square::new(r2 as u8, from.col);
                    if board.piece_at(two).is_none() {
                        out.push(Move::new(from, two));
                    }
                }
            }
        }
    }

    // Diagonal captures and en passant.
    for dc in [-1i8, 1] {
        let r = from.row as i8 + forward;
        let c = from.col as i8 + dc;
        if !in_bounds(r, c) {
            continue;
        }
        let to = Square::new(r as u8, c as u8);
        match board.piece_at(to) {
            Some((color, _)) if color != side => {
                push_with_promotions(out, from, to, captures_only, true);
            }
            None => {
                if board.en_passant == Some(to) {
                    let mut mv = Move::new(from, to);
                    mv.is_en_passant = true;
                    out.push(mv);
                }
            }
            _ => {}
        }
    }
}

fn generate_offsets<B: MoveBuffer>(
    board: &Board,
    from: Square,
    side: Color,
    offsets: &[(i8, i8)],
    captures_only: bool,
    out: &mut B,
) {
    for &(dr, dc) in offsets {
        let r = from.row as i8 + dr;
        let c = from.col as i8 + dc;
        if !in_bounds(r, c) {
            continue;
        }
        let to = Square::new(r as u8, c as u8);
        match board.piece_at(to) {
            Some((color, _)) if color != side => out.push(Move::new(from, to)),
            None if !captures_only => out.push(Move::new(from, to)),
            _ => {}
        }
    }
}

fn generate_slides<B: MoveBuffer>(
    board: &Board,
    from: Square,
    side: Color,
    dirs: &[(i8, i8)],
    captures_only: bool,
    out: &mut B,
) {
    for &(dr, dc) in dirs {
        let mut r = from.row as i8 + dr;
        let mut c = from.col as i8 + dc;
        while in_bounds(r, c) {
            let to = Square::new(r as u8, c as u8);
            match board.piece_at(to) {
                None => {
                    if !captures_only {
                        out.push(Move::new(from, to));
                    }
                }
                Some((color, _)) => {
                    if color != side {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            r += dr;
            c += dc;
        }
    }
}

fn generate_castling<B: MoveBuffer>(board: &Board, side: Color, out: &mut B) {
    let opponent = side.opposite();
    let row = if side == Color::White { 7 } else { 0 };

    if board.has_kingside_castle(side) {
        let f = Square::new(row, 5);
        let g = Square::new(row, 6);
        if board.piece_at(f).is_none()
            && board.piece_at(g).is_none()
            && !is_attacked(board, Square::new(row, 4), opponent)
            && !is_attacked(board, f, opponent)
            && !is_attacked(board, g, opponent)
        {
            let mut mv = Move::new(Square::new(row, 4), g);
            mv.is_short_castle = true;
            out.push(mv);
        }
    }
    if board.has_queenside_castle(side) {
        let d = Square::new(row, 3);
        let c = Square::new(row, 2);
        let b = Square::new(row, 1);
        if board.piece_at(d).is_none()
            && board.piece_at(c).is_none()
            && board.piece_at(b).is_none()
            && !is_attacked(board, Square::new(row, 4), opponent)
            && !is_attacked(board, d, opponent)
            && !is_attacked(board, c, opponent)
        {
            let mut mv = Move::new(Square::new(row, 4), c);
            mv.is_long_castle = true;
            out.push(mv);
        }
    }
}

/// Generate legal moves: pseudo-legal enumeration followed by a
/// play-it-and-check filter.
pub fn generate_legal<B: MoveBuffer>(board: &Board, captures_only: bool, out: &mut B) {
    out.clear();
    let mut pseudo: crate::moves::buffer::MoveList = Default::default();
    generate_pseudo_legal(board, captures_only, &mut pseudo);

    let mover = board.side_to_move;
    for &mv in pseudo.iter() {
        let mut copy = board.clone();
        copy.apply_raw_move(mv);
        if !is_in_check(&copy, mover) {
            out.push(mv);
        }
    }
}
