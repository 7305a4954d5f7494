//! Chess game logic - the game session controller and everything it drives
//!
//! # Module Organization
//!
//! - `types` - [`Move`](types::Move) and [`Strength`](types::Strength), the values that cross threads
//! - `rules` - Rules oracle over `shakmaty` (legality, terminal detection, notation)
//! - `resources` - Clock, redo stack and game-over classification
//! - `training` - Scripted opening lines and the opening book
//! - `ai` - Search engine trait, UCI process and the request coordinator
//! - `mode` / `session` - Session state and the renderer snapshot
//! - `controller` - [`SessionController`], the top-level state machine
//! - `events` - [`SessionEvent`]s handed to the front end
//!
//! # Ownership
//!
//! The controller and everything it owns live on one control thread. Engine
//! workers receive an immutable move list and answer over a channel; they
//! never hold a reference to the board.

pub mod ai;
pub mod controller;
pub mod error;
pub mod events;
pub mod mode;
pub mod resources;
pub mod rules;
pub mod session;
pub mod training;
pub mod types;

pub use controller::SessionController;
pub use error::{GameError, GameResult};
pub use events::{MoveSource, SessionEvent};
pub use mode::{Mode, ModeKind};
pub use session::SessionSnapshot;
