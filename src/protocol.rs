//! The UCI front-end: a line-oriented command loop over stdin/stdout. All
//! wire output goes through `println!`, never `tracing` -- `info`/
//! `bestmove` lines are protocol, not diagnostics.

use std::io::BufRead;
use std::str::FromStr;
use std::time::Duration;

use crate::board::{Board, Color, Move};
use crate::book::{parse_uci, Book};
use crate::config::EngineConfig;
use crate::search::{root_search, SearchContext, TranspositionTable};

const MIN_BUDGET_MS: u64 = 10;

pub struct Engine {
    board: Board,
    tt: TranspositionTable,
    ctx: SearchContext,
    book: Book,
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig, book: Book) -> Self {
        Engine {
            board: Board::new(),
            tt: TranspositionTable::new(config.tt_capacity),
            ctx: SearchContext::new(),
            book,
            config,
        }
    }

    /// Run the command loop to completion (until `quit` or end of input).
    pub fn run<R: BufRead>(&mut self, input: R) {
        for line in input.lines() {
            let Ok(line) = line else { break };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if !self.handle_line(line) {
                break;
            }
        }
    }

    /// Dispatch one input line. Returns `false` iff the engine should quit.
    pub fn handle_line(&mut self, line: &str) -> bool {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else { return true };

        match command {
            "uci" => {
                println!("id name {}", self.config.name);
                println!("id author {}", self.config.author);
                println!("uciok");
            }
            "isready" => println!("readyok"),
            "ucinewgame" => {
                self.board = Board::new();
                self.tt.clear();
            }
            "position" => self.handle_position(&parts),
            "go" => self.handle_go(&parts),
            "quit" => return false,
            _ => {} // malformed/unknown input: skipped silently, loop continues
        }
        true
    }

    fn handle_position(&mut self, parts: &[&str]) {
        let Some(&kind) = parts.get(1) else { return };

        let mut board = match kind {
            "startpos" => Board::new(),
            "fen" => {
                let moves_idx = parts.iter().position(|&p| p == "moves").unwrap_or(parts.len());
                let fen = parts[2..moves_idx].join(" ");
                match Board::from_str(&fen) {
                    Ok(b) => b,
                    Err(err) => {
                        println!("info string invalid fen: {err}");
                        return;
                    }
                }
            }
            _ => return,
        };

        if let Some(moves_idx) = parts.iter().position(|&p| p == "moves") {
            for token in &parts[moves_idx + 1..] {
                match parse_legal_uci(&board, token) {
                    Some(mv) => board.apply_full_move(mv),
                    None => {
                        tracing::warn!(move_text = token, "illegal move in position move list");
                        break;
                    }
                }
            }
        }

        self.board = board;
    }

    fn handle_go(&mut self, parts: &[&str]) {
        let budget = derive_budget(parts, self.board.side_to_move);
        let report = root_search(&mut self.board, &mut self.tt, &mut self.ctx, &self.book, budget);
        println!("bestmove {}", report.best_move.to_uci());
    }
}

/// Parse a UCI move string and validate it against the position's current
/// legal moves (mirrors [`Book::probe`]'s stale-entry defense).
fn parse_legal_uci(board: &Board, text: &str) -> Option<Move> {
    let candidate = parse_uci(text)?;
    let mut legal = crate::moves::buffer::MoveList::new();
    crate::moves::generate_legal(board, false, &mut legal);
    legal.iter().find(|m| **m == candidate).copied()
}

/// Derive a search time budget in milliseconds from `go` parameters, per
/// the budget-derivation rule: explicit `movetime` wins outright; otherwise
/// a share of the mover's clock plus increment, clamped both above and
/// below.
fn derive_budget(parts: &[&str], side_to_move: Color) -> Duration {
    let mut movetime: Option<u64> = None;
    let mut wtime: Option<u64> = None;
    let mut btime: Option<u64> = None;
    let mut winc: u64 = 0;
    let mut binc: u64 = 0;
    let mut movestogo: Option<u64> = None;

    let mut i = 1;
    while i < parts.len() {
        let value = parts.get(i + 1).and_then(|v| v.parse::<u64>().ok());
        match parts[i] {
            "movetime" => movetime = value,
            "wtime" => wtime = value,
            "btime" => btime = value,
            "winc" => winc = value.unwrap_or(0),
            "binc" => binc = value.unwrap_or(0),
            "movestogo" => movestogo = value,
            _ => {}
        }
        i += 2;
    }

    if let Some(mt) = movetime {
        let ms = mt.saturating_sub(100).max(MIN_BUDGET_MS);
        return Duration::from_millis(ms);
    }

    let (my_time, my_inc) = if side_to_move == Color::White { (wtime, winc) } else { (btime, binc) };
    let Some(my_time) = my_time else { return Duration::from_millis(1900) };

    let moves_to_go = match movestogo {
        Some(mtg) if (1..80).contains(&mtg) => mtg,
        _ => 35,
    };

    let raw = my_time / moves_to_go + my_inc;
    let budget = raw.saturating_sub(100);
    let ceiling = (my_time / 2).saturating_sub(100);
    let ms = budget.min(ceiling).max(MIN_BUDGET_MS);
    Duration::from_millis(ms)
}
