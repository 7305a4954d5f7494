//! Training sequencer - scripted opening lines
//!
//! A training line is a fixed list of moves for *both* sides. The human plays
//! their side and must match the line exactly; the other side's moves are
//! replayed straight from the line, never from the search engine.
//!
//! # Flow
//!
//! 1. [`TrainingLine::load`] parses every entry on a scratch board. A single
//!    unparsable or illegal entry rejects the whole line.
//! 2. [`TrainingLine::advance_non_human`] plays line moves while it is not the
//!    human's turn.
//! 3. [`TrainingLine::check_human_move`] compares a human submission with the
//!    expected move; the controller calls [`TrainingLine::accept`] on a match.
//! 4. Once the cursor reaches the end of the line the controller carries on in
//!    ordinary manual mode.

pub mod openings;

use crate::game::error::{GameError, GameResult};
use crate::game::rules::BoardState;
use crate::game::types::Move;
use serde::Serialize;
use shakmaty::Color;
use tracing::{debug, info, warn};

pub use openings::{OpeningBook, OpeningLine};

/// A validated scripted line plus the position reached in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingLine {
    name: String,
    moves: Vec<Move>,
    /// Index of the next expected move, in `0..=moves.len()`
    cursor: usize,
}

/// Outcome of comparing a human move with the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCheck {
    Match,
    Mismatch { expected: Move },
    /// Line already finished; any legal move is fine
    Exhausted,
}

/// Why [`TrainingLine::advance_non_human`] stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceStatus {
    /// Next line move belongs to the human
    AwaitingHuman,
    /// Every line move has been played and the game goes on
    Completed,
    /// The line led into a finished game
    Terminal,
}

/// A line move played on the human's opponent's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoPlayed {
    pub side: Color,
    pub mv: Move,
    pub san: String,
}

/// Moves auto-played by one call to [`TrainingLine::advance_non_human`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub applied: Vec<AutoPlayed>,
    pub status: AdvanceStatus,
}

/// Progress shown to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingProgress {
    pub name: String,
    pub played: usize,
    pub total: usize,
}

impl TrainingLine {
    /// Parse and validate a line given in SAN or UCI
    ///
    /// Each entry is resolved against the position reached by the entries
    /// before it, starting from the initial position.
    pub fn load<S: AsRef<str>>(name: &str, notation: &[S]) -> GameResult<Self> {
        let mut scratch = BoardState::new_game();
        let mut moves = Vec::with_capacity(notation.len());

        for (index, text) in notation.iter().enumerate() {
            let text = text.as_ref();
            let invalid = || GameError::InvalidTrainingLine {
                line: name.to_string(),
                index,
                notation: text.to_string(),
            };
            let mv = scratch.parse_notation(text).map_err(|_| invalid())?;
            scratch.push(mv).map_err(|_| invalid())?;
            moves.push(mv);
        }

        info!("[TRAINING] Loaded line '{}' ({} plies)", name, moves.len());
        Ok(Self {
            name: name.to_string(),
            moves,
            cursor: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.moves.len()
    }

    /// Move the line expects next
    pub fn expected(&self) -> Option<Move> {
        self.moves.get(self.cursor).copied()
    }

    pub fn progress(&self) -> TrainingProgress {
        TrainingProgress {
            name: self.name.clone(),
            played: self.cursor,
            total: self.moves.len(),
        }
    }

    pub fn check_human_move(&self, mv: Move) -> LineCheck {
        match self.expected() {
            None => LineCheck::Exhausted,
            Some(expected) if expected == mv => LineCheck::Match,
            Some(expected) => LineCheck::Mismatch { expected },
        }
    }

    /// Step past the expected move after the controller committed it
    pub fn accept(&mut self) {
        if !self.is_complete() {
            self.cursor += 1;
        }
    }

    /// Play line moves on `board` while it is not `human`'s turn
    ///
    /// Never touches the board on the human's turn. Stops when the line runs
    /// out or the game is over. A board that no longer follows the line ends
    /// the line early.
    pub fn advance_non_human(&mut self, board: &mut BoardState, human: Color) -> Advance {
        let mut applied = Vec::new();

        while !self.is_complete() && board.turn() != human && !board.is_terminal() {
            let mv = self.moves[self.cursor];
            let side = board.turn();
            let san = board.san(mv).unwrap_or_else(|| mv.to_uci());
            if let Err(e) = board.push(mv) {
                warn!("[TRAINING] Line '{}' left at ply {}: {}", self.name, self.cursor, e);
                self.cursor = self.moves.len();
                break;
            }
            self.cursor += 1;
            debug!("[TRAINING] Auto-played {} for {:?}", san, side);
            applied.push(AutoPlayed { side, mv, san });
        }

        let status = if board.is_terminal() {
            AdvanceStatus::Terminal
        } else if self.is_complete() {
            AdvanceStatus::Completed
        } else {
            AdvanceStatus::AwaitingHuman
        };

        Advance { applied, status }
    }
}
