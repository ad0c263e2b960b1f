//! Attack oracle: "is square S attacked by side C?" and "is side-to-move in
//! check?", implemented by radiating outward from the queried square rather
//! than iterating over the attacker's pieces.

use crate::board::{Board, Color, Piece, Square};

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

#[inline]
fn in_bounds(row: i8, col: i8) -> bool {
    (0..8).contains(&row) && (0..8).contains(&col)
}

/// True iff any piece of `by_color` attacks `square` on the current board.
pub fn is_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    let row = square.row as i8;
    let col = square.col as i8;

    // Pawn attacks: a pawn of `by_color` attacks diagonally "forward" from
    // its own perspective, i.e. the square being attacked is diagonally
    // *behind* the pawn from White's point of view when by_color is White.
    let pawn_row_offset: i8 = if by_color == Color::White { 1 } else { -1 };
    for dc in [-1i8, 1] {
        let pr = row + pawn_row_offset;
        let pc = col + dc;
        if in_bounds(pr, pc) {
            let sq = Square::new(pr as u8, pc as u8);
            if board.piece_at(sq) == Some((by_color, Piece::Pawn)) {
                return true;
            }
        }
    }

    for &(dr, dc) in KNIGHT_OFFSETS.iter() {
        let r = row + dr;
        let c = col + dc;
        if in_bounds(r, c) {
            let sq = Square::new(r as u8, c as u8);
            if board.piece_at(sq) == Some((by_color, Piece::Knight)) {
                return true;
            }
        }
    }

    for &(dr, dc) in KING_OFFSETS.iter() {
        let r = row + dr;
        let c = col + dc;
        if in_bounds(r, c) {
            let sq = Square::new(r as u8, c as u8);
            if board.piece_at(sq) == Some((by_color, Piece::King)) {
                return true;
            }
        }
    }

    for &(dr, dc) in ROOK_DIRS.iter() {
        if ray_hits(board, row, col, dr, dc, by_color, &[Piece::Rook, Piece::Queen]) {
            return true;
        }
    }
    for &(dr, dc) in BISHOP_DIRS.iter() {
        if ray_hits(board, row, col, dr, dc, by_color, &[Piece::Bishop, Piece::Queen]) {
            return true;
        }
    }

    false
}

/// Walk a ray from `(row, col)` in direction `(dr, dc)`, stopping at the
/// first occupied square. Returns true iff that square holds a `by_color`
/// piece whose type is one of `accept`.
fn ray_hits(
    board: &Board,
    row: i8,
    col: i8,
    dr: i8,
    dc: i8,
    by_color: Color,
    accept: &[Piece],
) -> bool {
    let mut r = row + dr;
    let mut c = col + dc;
    while in_bounds(r, c) {
        let sq = Square::new(r as u8, c as u8);
        if let Some((color, piece)) = board.piece_at(sq) {
            return color == by_color && accept.contains(&piece);
        }
        r += dr;
        c += dc;
    }
    false
}

/// True iff `color`'s king is attacked by the opposite side. A missing king
/// (pathological input) is reported as not in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(sq) => is_attacked(board, sq, color.opposite()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn starting_position_has_no_checks() {
        let board = Board::new();
        assert!(!is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn rook_on_open_file_attacks_king() {
        let board = Board::from_str("4k3/8/8/8/8/8/8/4K2R w - - 0 1").unwrap();
        assert!(is_attacked(&board, Square::new(0, 4), Color::White));
    }

    #[test]
    fn pawn_attacks_diagonally_forward_only() {
        let board = Board::from_str("8/8/8/8/3p4/8/8/4K2k w - - 0 1").unwrap();
        // Black pawn on d4 attacks c3 and e3 (forward for Black = increasing row).
        assert!(is_attacked(&board, Square::new(4, 2), Color::Black));
        assert!(is_attacked(&board, Square::new(4, 4), Color::Black));
        assert!(!is_attacked(&board, Square::new(2, 2), Color::Black));
    }

    #[test]
    fn blocked_slider_does_not_attack_past_blocker() {
        let board = Board::from_str("4k3/8/8/8/8/4P3/8/4K2R w - - 0 1").unwrap();
        // White pawn on e3 blocks the rook's own e-file vision; irrelevant,
        // but a black blocker on the rank should stop the rook's own-rank ray.
        let board2 = Board::from_str("4k3/8/8/8/8/8/4r3/4K2R w - - 0 1").unwrap();
        assert!(is_attacked(&board2, Square::new(6, 4), Color::Black));
        let _ = board;
    }

    #[test]
    fn absent_king_is_reported_as_not_in_check() {
        let board = Board::new_empty();
        assert!(!is_in_check(&board, Color::White));
    }
}
