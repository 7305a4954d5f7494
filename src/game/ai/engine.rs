//! Search engine capability
//!
//! The session controller never talks to an engine directly. It hands an
//! immutable request to the coordinator, whose worker drives an implementation
//! of [`SearchEngine`]. Calls on this trait may block for seconds and are only
//! ever made from a worker.

use crate::game::types::{Move, Strength};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors raised while talking to a search engine
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine protocol error: {message}")]
    Protocol { message: String },
}

impl SearchError {
    pub fn protocol(message: impl Into<String>) -> Self {
        SearchError::Protocol {
            message: message.into(),
        }
    }
}

pub type SearchResult<T> = Result<T, SearchError>;

/// Position score from White's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evaluation {
    Centipawns(i32),
    /// Mate in this many moves; negative when Black mates
    MateIn(i32),
}

impl Evaluation {
    /// Score used when a mate has to be compared with centipawns
    pub const MATE_SCORE: i32 = 100_000;

    pub fn as_centipawns(self) -> i32 {
        match self {
            Evaluation::Centipawns(cp) => cp,
            Evaluation::MateIn(n) if n > 0 => Self::MATE_SCORE,
            Evaluation::MateIn(_) => -Self::MATE_SCORE,
        }
    }

    /// Same score seen from the other side
    pub fn flipped(self) -> Self {
        match self {
            Evaluation::Centipawns(cp) => Evaluation::Centipawns(-cp),
            Evaluation::MateIn(n) => Evaluation::MateIn(-n),
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Centipawns(cp) => write!(f, "{:+.2}", f64::from(*cp) / 100.0),
            Evaluation::MateIn(n) => write!(f, "#{}", n),
        }
    }
}

/// Evaluation plus the engine's preferred move in the analysed position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub evaluation: Evaluation,
    pub best_move: Option<Move>,
}

/// Process-level engine tuning, applied once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub threads: u32,
    pub hash_mb: u32,
    /// Skill level 0-20 used alongside an ELO limit
    pub skill: u32,
    /// Depth for a move search
    pub move_depth: u32,
    /// Depth for an analysis search
    pub analysis_depth: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            threads: 1,
            hash_mb: 64,
            skill: 20,
            move_depth: 12,
            analysis_depth: 15,
        }
    }
}

/// Blocking move-search service
pub trait SearchEngine: Send {
    /// Limit playing strength, or play at full strength with `None`
    fn configure(&mut self, strength: Option<Strength>) -> SearchResult<()>;

    /// Set the position as a move list from the initial position
    fn set_position(&mut self, moves: &[Move]) -> SearchResult<()>;

    /// Best move in the current position, `None` when there is none
    fn best_move(&mut self) -> SearchResult<Option<Move>>;

    /// Score the current position
    fn evaluate(&mut self) -> SearchResult<Analysis>;
}
