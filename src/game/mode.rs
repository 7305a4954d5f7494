//! Session mode: what kind of game is being played right now
//!
//! Exactly one mode is active at a time. A finished or stopped game returns to
//! [`Mode::Idle`]; the board and its history stay around for review.

use crate::game::training::TrainingLine;
use crate::game::types::Strength;
use serde::{Deserialize, Serialize};
use shakmaty::Color;

/// Top-level activity of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// No game running; history may be reviewed, undone or exported
    Idle,
    /// Human plays `human`, the search engine plays the other side at `strength`
    Manual { human: Color, strength: Strength },
    /// Engine against engine
    Auto { white: Strength, black: Strength },
    /// Human follows a scripted line; the line supplies the other side's moves
    Training { line: TrainingLine, human: Color },
}

/// Field-less mirror of [`Mode`] used in snapshots and result records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    Idle,
    Manual,
    Auto,
    Training,
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Idle => ModeKind::Idle,
            Mode::Manual { .. } => ModeKind::Manual,
            Mode::Auto { .. } => ModeKind::Auto,
            Mode::Training { .. } => ModeKind::Training,
        }
    }

    /// Color the human plays, if a human is playing
    pub fn human(&self) -> Option<Color> {
        match self {
            Mode::Manual { human, .. } | Mode::Training { human, .. } => Some(*human),
            Mode::Idle | Mode::Auto { .. } => None,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Mode::Idle)
    }

    /// Strength the search engine plays `side` at, or `None` when that side is
    /// not engine-driven in this mode
    pub fn engine_strength(&self, side: Color) -> Option<Strength> {
        match self {
            Mode::Manual { human, strength } if *human != side => Some(*strength),
            Mode::Auto { white, black } => Some(match side {
                Color::White => *white,
                Color::Black => *black,
            }),
            _ => None,
        }
    }

    /// PGN player names for (White, Black)
    pub fn player_names(&self) -> (String, String) {
        let seat = |human: Color, side: Color| {
            if human == side { "You" } else { "Stockfish" }.to_string()
        };
        match self {
            Mode::Auto { .. } => ("Auto-White".to_string(), "Auto-Black".to_string()),
            Mode::Manual { human, .. } | Mode::Training { human, .. } => {
                (seat(*human, Color::White), seat(*human, Color::Black))
            }
            Mode::Idle => ("White".to_string(), "Black".to_string()),
        }
    }
}

impl std::fmt::Display for ModeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModeKind::Idle => "idle",
            ModeKind::Manual => "manual",
            ModeKind::Auto => "auto",
            ModeKind::Training => "training",
        };
        f.write_str(name)
    }
}
