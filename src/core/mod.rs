//! Core module - application infrastructure
//!
//! - `settings` - [`TrainerSettings`], persisted as JSON in the user's config directory
//! - `logging` - tracing subscriber setup
//! - `error` - [`CoreError`] for the above

pub mod error;
pub mod logging;
pub mod settings;

pub use error::{CoreError, CoreResult};
pub use logging::init_tracing;
pub use settings::TrainerSettings;
