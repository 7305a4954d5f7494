//! Search engine integration
//!
//! The engine runs out-of-band so the control loop never blocks on it.
//!
//! # Architecture
//!
//! - `engine`: the [`SearchEngine`] capability plus evaluation types
//! - `uci`: [`UciEngine`], a Stockfish process behind that trait
//! - `coordinator`: [`EngineCoordinator`], generation-stamped requests and a
//!   response channel drained by the controller
//!
//! # Integration Strategy
//!
//! The controller's board is the source of truth. For every query:
//! 1. Snapshot the move list into an immutable [`EngineRequest`]
//! 2. A worker replays it on the engine and searches
//! 3. The response comes back over the channel tagged with its generation
//! 4. The controller drops stale responses and re-validates the move before
//!    committing it like any other move

pub mod coordinator;
pub mod engine;
pub mod uci;

pub use coordinator::{
    Dispatch, EngineCoordinator, EngineReply, EngineRequest, EngineResponse, RequestPurpose,
};
pub use engine::{Analysis, EngineOptions, Evaluation, SearchEngine, SearchError, SearchResult};
pub use uci::{guess_engine_paths, UciEngine};
