//! Per-game state managed alongside the board
//!
//! # Resource Categories
//!
//! ## Game Timing
//! - [`GameTimer`] - Fischer increment time control
//!
//! ## Game History
//! - [`MoveHistory`] - Redo stack for taken-back moves
//!
//! ## Game Status
//! - [`ResultRecord`] - Win/loss/draw classification of a finished game

pub mod game_over;
pub mod history;
pub mod timer;

pub use game_over::*;
pub use history::*;
pub use timer::*;
