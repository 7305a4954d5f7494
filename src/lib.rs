//! Chess trainer: play, watch, or drill openings against a UCI engine
//!
//! - [`game`] - the game session controller and everything it drives
//! - [`persistence`] - statistics and PGN files
//! - [`core`] - settings, logging, core errors
//! - [`cli`] - terminal front end used by the `chess-trainer` binary

pub mod cli;
pub mod core;
pub mod game;
pub mod persistence;
