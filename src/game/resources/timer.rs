//! Game timer with Fischer increment support
//!
//! Each side starts with a base time and receives a fixed increment after
//! completing a move. Example: 10+5 means 10 minutes base time with 5 seconds
//! added per move.
//!
//! # Time Management
//!
//! - The timer counts whole seconds; the control loop calls [`GameTimer::tick`]
//!   once per elapsed second of wall time
//! - Only the side to move loses time
//! - The increment goes to the side that just moved
//! - Reaching zero yields [`TimeExpired`] and stops the timer
//!
//! # Reference
//!
//! Fischer increment time control is standard in online chess (Chess.com, Lichess).
//! See: https://en.wikipedia.org/wiki/Time_control#Increment_and_delay_methods

use serde::{Deserialize, Serialize};
use shakmaty::Color;
use tracing::info;

/// Time control chosen when a game starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Base time per side in minutes (1..=180)
    pub minutes: u32,
    /// Increment per move in seconds (0..=60)
    pub increment: u32,
}

impl ClockConfig {
    pub const MAX_MINUTES: u32 = 180;
    pub const MAX_INCREMENT: u32 = 60;

    pub fn new(minutes: u32, increment: u32) -> Self {
        Self { minutes, increment }.clamped()
    }

    /// Same config with both fields forced into their supported ranges
    pub fn clamped(self) -> Self {
        Self {
            minutes: self.minutes.clamp(1, Self::MAX_MINUTES),
            increment: self.increment.min(Self::MAX_INCREMENT),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            minutes: 10,
            increment: 0,
        }
    }
}

/// A side's flag fell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeExpired(pub Color);

/// Per-side countdown clock
///
/// Defaults to 10+0 with the timer paused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTimer {
    /// White player's remaining time in seconds
    pub white_time_left: u32,
    /// Black player's remaining time in seconds
    pub black_time_left: u32,
    /// Fischer increment added after each move (in seconds)
    pub increment: u32,
    /// Whether the timer is currently running
    pub is_running: bool,
}

impl Default for GameTimer {
    fn default() -> Self {
        Self::from_config(ClockConfig::default())
    }
}

impl GameTimer {
    /// Fresh, paused clock for the given time control
    pub fn from_config(config: ClockConfig) -> Self {
        let config = config.clamped();
        let base = config.minutes * 60;
        Self {
            white_time_left: base,
            black_time_left: base,
            increment: config.increment,
            is_running: false,
        }
    }

    pub fn start(&mut self) {
        self.is_running = true;
    }

    pub fn stop(&mut self) {
        self.is_running = false;
    }

    pub fn remaining(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white_time_left,
            Color::Black => self.black_time_left,
        }
    }

    /// One second of play for `side_to_move`
    ///
    /// Does nothing while stopped. Returns [`TimeExpired`] on the tick that
    /// reaches zero; the timer is stopped at that point so later ticks are
    /// no-ops.
    pub fn tick(&mut self, side_to_move: Color) -> Option<TimeExpired> {
        if !self.is_running {
            return None;
        }

        let left = match side_to_move {
            Color::White => &mut self.white_time_left,
            Color::Black => &mut self.black_time_left,
        };
        *left = left.saturating_sub(1);

        if *left == 0 {
            self.is_running = false;
            info!("[CLOCK] {:?} flag fell", side_to_move);
            return Some(TimeExpired(side_to_move));
        }
        None
    }

    /// Apply Fischer increment to the player who just moved
    pub fn apply_increment(&mut self, color: Color) {
        if self.increment > 0 {
            match color {
                Color::White => self.white_time_left += self.increment,
                Color::Black => self.black_time_left += self.increment,
            }
        }
    }
}

/// `mm:ss` rendering used by the terminal front end
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
