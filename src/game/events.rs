//! Events emitted by the session controller
//!
//! The controller queues these as it changes state; the front end collects
//! them with [`crate::game::controller::SessionController::drain_events`] and
//! renders whatever it likes. Order is the order things happened.

use crate::game::ai::{Analysis, RequestPurpose};
use crate::game::error::GameError;
use crate::game::resources::ResultRecord;
use crate::game::training::TrainingProgress;
use crate::game::types::Move;
use shakmaty::Color;

/// Who put a move on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Human,
    Engine,
    /// Auto-played from a training line
    Training,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    GameStarted,
    MoveCommitted {
        side: Color,
        mv: Move,
        /// SAN as written before the move was played
        san: String,
        source: MoveSource,
    },
    MoveUndone(Move),
    MoveRedone(Move),
    EngineRequested {
        generation: u64,
        purpose: RequestPurpose,
    },
    /// A response from an older generation arrived and was dropped
    StaleResponseDiscarded { generation: u64 },
    HintReady(Move),
    AnalysisReady(Analysis),
    TrainingProgress(TrainingProgress),
    /// Line exhausted with the game still going; play continues as manual
    TrainingCompleted { name: String },
    EngineFailed(GameError),
    TimeExpired(Color),
    GameOver(ResultRecord),
    /// Game abandoned without a result
    Stopped,
    Imported { plies: usize },
}
