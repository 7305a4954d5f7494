//! Error types for game module
//!
//! Every rejection a caller can receive from the session controller. All of
//! them are local: when an operation returns one of these, no session state
//! has been changed. Flag-fall is not an error; it arrives as
//! [`crate::game::events::SessionEvent::TimeExpired`].

use crate::game::types::Move;

/// Errors that can occur in game logic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// No human move is expected right now (wrong mode or engine's turn)
    #[error("Not the human player's turn")]
    InvalidTurn,

    /// Move is not in the current legal-move set
    #[error("Illegal move: {mv}")]
    IllegalMove { mv: Move },

    /// A stored training move does not parse or is illegal at its ply
    #[error("Invalid training line '{line}': ply {index} ('{notation}') is not playable")]
    InvalidTrainingLine {
        line: String,
        index: usize,
        notation: String,
    },

    /// Legal move that leaves the scripted training line
    #[error("Move {played} is not in the training line (expected {expected})")]
    OffLine { expected: Move, played: Move },

    /// Search engine missing, or it failed to produce a move
    #[error("Search engine unavailable: {message}")]
    EngineUnavailable { message: String },

    /// Search engine answered with a move that is illegal in the current position
    #[error("Search engine proposed illegal move {mv}")]
    EngineInvalidMove { mv: Move },

    /// A move request is already outstanding
    #[error("Search engine is busy computing a move")]
    EngineBusy,

    /// Text could not be read as UCI or SAN in the current position
    #[error("Cannot read move '{text}'")]
    Notation { text: String },

    /// Operation refused while an automated game is running
    #[error("Not available while an automatic game is running")]
    AutoModeActive,
}

impl GameError {
    pub fn engine_unavailable(message: impl Into<String>) -> Self {
        GameError::EngineUnavailable {
            message: message.into(),
        }
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
