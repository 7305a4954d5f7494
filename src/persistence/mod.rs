//! Persistence - statistics and PGN files
//!
//! Nothing in here is allowed to interrupt a game. Callers log a
//! [`PersistenceError`] and carry on.

pub mod error;
pub mod pgn;
pub mod stats;

pub use error::{PersistenceError, PersistenceResult};
pub use pgn::PgnHeaders;
pub use stats::GameStats;
