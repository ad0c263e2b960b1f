//! Position-description (FEN-style) string parsing and printing.
//!
//! Six space-separated fields: placement, side to move, castling rights,
//! en-passant square, halfmove clock, fullmove number. Missing counters
//! default to 0 and 1.

use super::fen_tables::CHAR_TO_PC;
use super::{Board, Color, Square, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ};

impl Board {
    /// Replace this board's contents from a position-description string.
    pub fn parse_placement(&mut self, text: &str) -> Result<(), String> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.is_empty() {
            return Err(format!("empty position string: {text:?}"));
        }

        let mut board = Board::new_empty();
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(format!("expected 8 ranks, got {}", ranks.len()));
        }
        for (row, rank_str) in ranks.iter().enumerate() {
            let mut col = 0u8;
            for c in rank_str.chars() {
                if let Some(d) = c.to_digit(10) {
                    col += d as u8;
                } else {
                    if col >= 8 {
                        return Err(format!("rank {row} overflows 8 files"));
                    }
                    let (piece, color) = CHAR_TO_PC[c as usize]
                        .ok_or_else(|| format!("unrecognised piece glyph {c:?}"))?;
                    board.set_piece(Square::new(row as u8, col), Some((color, piece)));
                    col += 1;
                }
            }
            if col != 8 {
                return Err(format!("rank {row} does not sum to 8 files"));
            }
        }

        board.side_to_move = match fields.get(1).copied().unwrap_or("w") {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(format!("bad side to move {other:?}")),
        };

        board.castling_rights = 0;
        if let Some(&castle_field) = fields.get(2) {
            if castle_field != "-" {
                for c in castle_field.chars() {
                    board.castling_rights |= match c {
                        'K' => CASTLE_WK,
                        'Q' => CASTLE_WQ,
                        'k' => CASTLE_BK,
                        'q' => CASTLE_BQ,
                        other => return Err(format!("bad castling glyph {other:?}")),
                    };
                }
            }
        }

        board.en_passant = match fields.get(3).copied().unwrap_or("-") {
            "-" => None,
            sq => Some(Square::from_algebraic(sq).ok_or_else(|| format!("bad en-passant square {sq:?}"))?),
        };

        board.halfmove_clock = fields.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);
        board.fullmove_number = fields.get(5).and_then(|s| s.parse().ok()).unwrap_or(1);

        // Seed the repetition map with one occurrence of the freshly loaded
        // position, matching `reset()`'s convention for the start position.
        let key = board.key();
        board.repetitions.insert(key, 1);

        *self = board;
        Ok(())
    }

    /// Render the current position as a position-description string.
    pub fn to_fen(&self) -> String {
        let mut s = String::with_capacity(90);
        for row in 0..8u8 {
            let mut empties = 0u8;
            for col in 0..8u8 {
                match self.piece_at(Square::new(row, col)) {
                    None => empties += 1,
                    Some((color, piece)) => {
                        if empties > 0 {
                            s.push((b'0' + empties) as char);
                            empties = 0;
                        }
                        s.push(piece.to_char(color));
                    }
                }
            }
            if empties > 0 {
                s.push((b'0' + empties) as char);
            }
            if row != 7 {
                s.push('/');
            }
        }
        s.push(' ');
        s.push(if self.side_to_move == Color::White { 'w' } else { 'b' });
        s.push(' ');
        let mut any = false;
        if self.castling_rights & CASTLE_WK != 0 {
            s.push('K');
            any = true;
        }
        if self.castling_rights & CASTLE_WQ != 0 {
            s.push('Q');
            any = true;
        }
        if self.castling_rights & CASTLE_BK != 0 {
            s.push('k');
            any = true;
        }
        if self.castling_rights & CASTLE_BQ != 0 {
            s.push('q');
            any = true;
        }
        if !any {
            s.push('-');
        }
        s.push(' ');
        match self.en_passant {
            Some(sq) => s.push_str(&sq.to_algebraic()),
            None => s.push('-'),
        }
        s.push(' ');
        s.push_str(&self.halfmove_clock.to_string());
        s.push(' ');
        s.push_str(&self.fullmove_number.to_string());
        s
    }
}

impl std::str::FromStr for Board {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new_empty();
        board.parse_placement(s)?;
        Ok(board)
    }
}
