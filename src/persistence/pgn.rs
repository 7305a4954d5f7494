//! PGN export and import of the move history
//!
//! Export writes the seven-tag roster and SAN movetext. Import is deliberately
//! forgiving: it reads the main line of the first game and ignores headers,
//! comments, variations, NAGs and move numbers. Turning the tokens into moves
//! is left to the rules adapter.

use super::PersistenceResult;
use crate::game::rules::BoardState;
use crate::game::types::Move;
use chrono::Local;
use std::fs;
use std::path::Path;

/// Longest movetext line written on export
const LINE_WIDTH: usize = 80;

const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// The seven-tag roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnHeaders {
    pub event: String,
    pub site: String,
    pub date: String,
    pub round: String,
    pub white: String,
    pub black: String,
    pub result: String,
}

impl PgnHeaders {
    /// Headers for a training game played today
    pub fn new(white: impl Into<String>, black: impl Into<String>, result: &str) -> Self {
        Self {
            event: "Training".to_string(),
            site: "Local".to_string(),
            date: Local::now().format("%Y.%m.%d").to_string(),
            round: "1".to_string(),
            white: white.into(),
            black: black.into(),
            result: result.to_string(),
        }
    }

    fn tags(&self) -> [(&'static str, &str); 7] {
        [
            ("Event", self.event.as_str()),
            ("Site", self.site.as_str()),
            ("Date", self.date.as_str()),
            ("Round", self.round.as_str()),
            ("White", self.white.as_str()),
            ("Black", self.black.as_str()),
            ("Result", self.result.as_str()),
        ]
    }
}

/// Render `moves` (from the initial position) as a PGN game
pub fn export(headers: &PgnHeaders, moves: &[Move]) -> String {
    let mut out = String::new();
    for (name, value) in headers.tags() {
        out.push_str(&format!("[{} \"{}\"]\n", name, value.replace('"', "'")));
    }
    out.push('\n');

    let mut tokens: Vec<String> = Vec::with_capacity(moves.len() + moves.len() / 2 + 1);
    let mut board = BoardState::new_game();
    for (ply, mv) in moves.iter().enumerate() {
        if ply % 2 == 0 {
            tokens.push(format!("{}.", ply / 2 + 1));
        }
        tokens.push(board.san(*mv).unwrap_or_else(|| mv.to_uci()));
        if board.push(*mv).is_err() {
            break;
        }
    }
    tokens.push(headers.result.clone());

    let mut line = String::new();
    for token in tokens {
        if !line.is_empty() && line.len() + 1 + token.len() > LINE_WIDTH {
            out.push_str(&line);
            out.push('\n');
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&token);
    }
    out.push_str(&line);
    out.push('\n');
    out
}

/// Move tokens of the first game's main line, in order
pub fn parse_movetext(text: &str) -> Vec<String> {
    let mut cleaned = String::with_capacity(text.len());
    let mut comment = false;
    let mut rest_of_line = false;
    let mut variation_depth = 0usize;
    let mut seen_moves = false;

    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') && !comment && variation_depth == 0 {
            if seen_moves {
                // Headers of the next game
                break;
            }
            continue;
        }

        for ch in line.chars() {
            match ch {
                _ if rest_of_line => {}
                '}' if comment => comment = false,
                _ if comment => {}
                '{' => comment = true,
                ';' => rest_of_line = true,
                '(' => variation_depth += 1,
                ')' => variation_depth = variation_depth.saturating_sub(1),
                _ if variation_depth > 0 => {}
                _ => {
                    if !ch.is_whitespace() {
                        seen_moves = true;
                    }
                    cleaned.push(ch);
                }
            }
        }
        rest_of_line = false;
        cleaned.push(' ');
    }

    let mut moves = Vec::new();
    for token in cleaned.split_whitespace() {
        if RESULT_TOKENS.contains(&token) {
            break;
        }
        if token.starts_with('$') {
            continue;
        }
        let token = match token.rfind('.') {
            Some(index) => &token[index + 1..],
            None => token,
        };
        if !token.is_empty() {
            moves.push(token.to_string());
        }
    }
    moves
}

pub fn write_pgn(path: &Path, pgn: &str) -> PersistenceResult<()> {
    fs::write(path, pgn)?;
    Ok(())
}

pub fn read_pgn(path: &Path) -> PersistenceResult<String> {
    Ok(fs::read_to_string(path)?)
}
