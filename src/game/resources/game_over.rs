//! Game over classification and result records
//!
//! The rules adapter only knows the board result (`1-0`, `0-1`, draw). The
//! player cares about something else: did *I* win? This module turns the
//! board result into a [`ResultKind`] relative to the human, or into a neutral
//! label for engine-vs-engine games.
//!
//! # Classification
//!
//! | Mode              | Board result       | ResultKind              |
//! |-------------------|--------------------|-------------------------|
//! | Manual / Training | human's color won  | `Win`                   |
//! | Manual / Training | other color won    | `Loss`                  |
//! | Manual / Training | draw               | `Draw`                  |
//! | Auto              | anything           | `Automated(result)`     |
//!
//! [`classify`] is a pure function of `(result, mode, human color)`.

use crate::game::mode::ModeKind;
use crate::game::rules::{BoardResult, Termination};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use shakmaty::Color;
use uuid::Uuid;

/// Outcome of a finished game from the human's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultKind {
    Win,
    Loss,
    Draw,
    /// No human was playing; carries the board result as-is
    Automated(BoardResult),
}

impl ResultKind {
    /// Human-readable message for the end-of-game banner
    pub fn message(&self) -> String {
        match self {
            ResultKind::Win => "You won!".to_string(),
            ResultKind::Loss => "You lost. Keep practicing!".to_string(),
            ResultKind::Draw => "Draw.".to_string(),
            ResultKind::Automated(result) => {
                format!("Automatic game finished: {}", result.pgn_token())
            }
        }
    }
}

/// Classify a board result for the given mode and human color
pub fn classify(result: BoardResult, mode: ModeKind, human: Option<Color>) -> ResultKind {
    let human = match (mode, human) {
        (ModeKind::Manual | ModeKind::Training, Some(human)) => human,
        _ => return ResultKind::Automated(result),
    };

    match result.winner() {
        None => ResultKind::Draw,
        Some(winner) if winner == human => ResultKind::Win,
        Some(_) => ResultKind::Loss,
    }
}

/// Record emitted once per finished game, handed to statistics persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub session_id: Uuid,
    pub mode: ModeKind,
    pub kind: ResultKind,
    pub board_result: BoardResult,
    pub termination: Termination,
    /// Number of plies played when the game ended
    pub plies: usize,
    pub timestamp: DateTime<Local>,
}

impl ResultRecord {
    pub fn new(
        session_id: Uuid,
        mode: ModeKind,
        human: Option<Color>,
        board_result: BoardResult,
        termination: Termination,
        plies: usize,
    ) -> Self {
        Self {
            session_id,
            mode,
            kind: classify(board_result, mode, human),
            board_result,
            termination,
            plies,
            timestamp: Local::now(),
        }
    }

    /// One-line summary, e.g. `You won! (checkmate, 1-0)`
    pub fn summary(&self) -> String {
        format!(
            "{} ({}, {})",
            self.kind.message(),
            self.termination.description(),
            self.board_result.pgn_token()
        )
    }
}
