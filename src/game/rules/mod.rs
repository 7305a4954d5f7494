//! Chess rules module - the synchronous legality and terminal-state oracle
//!
//! The session controller never generates moves itself. It asks this module
//! whether a move is legal, applies and takes back moves, and asks whether the
//! game is over. Move generation is delegated to the `shakmaty` crate.
//!
//! # Module Structure
//!
//! - `board_state` - [`BoardState`], a position with history (push/pop, repetition)
//! - `outcome` - [`BoardResult`] and [`Termination`]

pub mod board_state;
pub mod outcome;

#[cfg(test)]
mod tests;

pub use board_state::BoardState;
pub use outcome::{BoardResult, Termination};
