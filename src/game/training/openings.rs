//! Opening book: named training lines
//!
//! Books are JSON objects keyed by line name:
//!
//! ```json
//! {
//!   "italian": {
//!     "moves": ["e4", "e5", "Nf3", "Nc6", "Bc4"],
//!     "description": "Giuoco Piano",
//!     "recommended_color": "white"
//!   }
//! }
//! ```
//!
//! A small built-in book is always available so training works without any
//! file on disk.

use crate::game::error::GameResult;
use crate::game::training::TrainingLine;
use crate::game::types::parse_color;
use crate::persistence::PersistenceResult;
use serde::{Deserialize, Serialize};
use shakmaty::Color;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// One book entry, moves in SAN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningLine {
    pub moves: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recommended_color: Option<String>,
}

impl OpeningLine {
    fn new(moves: &str, description: &str, color: &str) -> Self {
        Self {
            moves: moves.split_whitespace().map(str::to_string).collect(),
            description: description.to_string(),
            recommended_color: Some(color.to_string()),
        }
    }

    /// Side the line is meant to be practised from, defaulting to White
    pub fn recommended_color(&self) -> Color {
        self.recommended_color
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(Color::White)
    }

    /// Validate this entry into a playable line
    pub fn to_training_line(&self, name: &str) -> GameResult<TrainingLine> {
        TrainingLine::load(name, &self.moves)
    }
}

/// Named collection of opening lines, iterated in name order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningBook {
    lines: BTreeMap<String, OpeningLine>,
}

impl OpeningBook {
    /// Lines bundled with the trainer
    pub fn builtin() -> Self {
        let entries = [
            (
                "italian",
                OpeningLine::new(
                    "e4 e5 Nf3 Nc6 Bc4 Bc5 c3 Nf6 d4 exd4 cxd4 Bb4+",
                    "Italian Game, Giuoco Piano main line",
                    "white",
                ),
            ),
            (
                "ruy_lopez",
                OpeningLine::new(
                    "e4 e5 Nf3 Nc6 Bb5 a6 Ba4 Nf6 O-O Be7 Re1 b5 Bb3 d6 c3 O-O",
                    "Ruy Lopez, Closed",
                    "white",
                ),
            ),
            (
                "najdorf",
                OpeningLine::new(
                    "e4 c5 Nf3 d6 d4 cxd4 Nxd4 Nf6 Nc3 a6",
                    "Sicilian Defense, Najdorf Variation",
                    "black",
                ),
            ),
            (
                "qgd",
                OpeningLine::new(
                    "d4 d5 c4 e6 Nc3 Nf6 Bg5 Be7 e3 O-O Nf3",
                    "Queen's Gambit Declined, Orthodox",
                    "white",
                ),
            ),
            (
                "french",
                OpeningLine::new(
                    "e4 e6 d4 d5 Nc3 Bb4 e5 c5 a3 Bxc3+ bxc3 Ne7",
                    "French Defense, Winawer",
                    "black",
                ),
            ),
        ];

        Self {
            lines: entries
                .into_iter()
                .map(|(name, line)| (name.to_string(), line))
                .collect(),
        }
    }

    /// Read a JSON book from disk
    pub fn load(path: &Path) -> PersistenceResult<Self> {
        let text = fs::read_to_string(path)?;
        let book: Self = serde_json::from_str(&text)?;
        info!(
            "[TRAINING] Loaded {} opening lines from {:?}",
            book.len(),
            path
        );
        Ok(book)
    }

    /// Book at `path`, or the built-in book when there is no path or it can't be read
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };
        match Self::load(path) {
            Ok(book) if !book.is_empty() => book,
            Ok(_) => {
                warn!("[TRAINING] Opening book {:?} is empty, using built-in lines", path);
                Self::builtin()
            }
            Err(e) => {
                warn!(
                    "[TRAINING] Failed to load opening book {:?}: {}. Using built-in lines.",
                    path, e
                );
                Self::builtin()
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&OpeningLine> {
        self.lines.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.lines.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OpeningLine)> {
        self.lines.iter().map(|(name, line)| (name.as_str(), line))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn insert(&mut self, name: impl Into<String>, line: OpeningLine) {
        self.lines.insert(name.into(), line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lines_are_playable() {
        //! Every bundled line must survive validation
        let book = OpeningBook::builtin();
        assert_eq!(book.len(), 5);
        for (name, line) in book.iter() {
            let training = line.to_training_line(name);
            assert!(training.is_ok(), "built-in line '{}' failed: {:?}", name, training);
        }
    }

    #[test]
    fn test_recommended_color() {
        let book = OpeningBook::builtin();
        assert_eq!(book.get("najdorf").unwrap().recommended_color(), Color::Black);
        assert_eq!(book.get("italian").unwrap().recommended_color(), Color::White);

        let unset = OpeningLine {
            moves: vec![],
            description: String::new(),
            recommended_color: None,
        };
        assert_eq!(unset.recommended_color(), Color::White);
    }

    #[test]
    fn test_parse_book_json() {
        let json = r#"{
            "scandi": { "moves": ["e4", "d5", "exd5", "Qxd5"], "recommended_color": "black" },
            "london": { "moves": ["d4", "d5", "Bf4"], "description": "London System" }
        }"#;
        let book: OpeningBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.names().collect::<Vec<_>>(), vec!["london", "scandi"]);
        assert_eq!(book.get("london").unwrap().description, "London System");
        assert_eq!(book.get("scandi").unwrap().moves.len(), 4);
    }

    #[test]
    fn test_missing_file_falls_back_to_builtin() {
        let path = std::env::temp_dir().join("chess-trainer-no-such-book.json");
        let book = OpeningBook::load_or_builtin(Some(&path));
        assert_eq!(book, OpeningBook::builtin());
        assert!(OpeningBook::load(&path).is_err());
    }
}
