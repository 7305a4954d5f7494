//! Game statistics
//!
//! A flat JSON record kept in the user's data directory:
//!
//! ```json
//! {
//!   "games": 12, "wins": 5, "losses": 6, "draws": 1,
//!   "best_streak": 3, "current_streak": 0,
//!   "last_result": "L", "last_game_time": "2024-05-01 18:42"
//! }
//! ```
//!
//! Automatic games count towards `games` only. A draw or a loss resets the
//! current streak.

use super::PersistenceResult;
use crate::game::resources::{ResultKind, ResultRecord};
use chrono::{DateTime, Local};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const STATS_FILENAME: &str = "stats.json";

/// Format of `last_game_time`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Cumulative results across sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub best_streak: u32,
    pub current_streak: u32,
    /// `W`, `L`, `D`, or empty before the first counted game
    pub last_result: String,
    pub last_game_time: String,
}

impl GameStats {
    /// Default location: `stats.json` in the per-user data directory
    pub fn default_path() -> PathBuf {
        match ProjectDirs::from("com", "trilltino", "ChessTrainer") {
            Some(dirs) => dirs.data_dir().join(STATS_FILENAME),
            None => PathBuf::from(STATS_FILENAME),
        }
    }

    /// Fold one finished game into the totals
    pub fn record(&mut self, record: &ResultRecord) {
        self.record_kind(record.kind, record.timestamp);
    }

    pub fn record_kind(&mut self, kind: ResultKind, when: DateTime<Local>) {
        self.games += 1;
        match kind {
            ResultKind::Win => {
                self.wins += 1;
                self.current_streak += 1;
                self.best_streak = self.best_streak.max(self.current_streak);
                self.last_result = "W".to_string();
            }
            ResultKind::Loss => {
                self.losses += 1;
                self.current_streak = 0;
                self.last_result = "L".to_string();
            }
            ResultKind::Draw => {
                self.draws += 1;
                self.current_streak = 0;
                self.last_result = "D".to_string();
            }
            ResultKind::Automated(_) => {}
        }
        self.last_game_time = when.format(TIMESTAMP_FORMAT).to_string();
    }

    /// Wins as a percentage of all games
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.wins) * 100.0 / f64::from(self.games)
        }
    }

    pub fn summary(&self) -> String {
        let mut text = format!(
            "Games: {}\nWins: {}\nLosses: {}\nDraws: {}\nWin rate: {:.1}%\nBest streak: {}\nCurrent streak: {}",
            self.games,
            self.wins,
            self.losses,
            self.draws,
            self.win_rate(),
            self.best_streak,
            self.current_streak
        );
        if !self.last_result.is_empty() {
            text.push_str(&format!("\nLast result: {}", self.last_result));
        }
        if !self.last_game_time.is_empty() {
            text.push_str(&format!("\nLast game: {}", self.last_game_time));
        }
        text
    }

    pub fn load(path: &Path) -> PersistenceResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Stats at `path`, or empty stats when missing or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("[STATS] No stats file at {:?}, starting fresh", path);
            return Self::default();
        }
        match Self::load(path) {
            Ok(stats) => stats,
            Err(e) => {
                warn!("[STATS] Failed to load {:?}: {}. Starting fresh.", path, e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> PersistenceResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("[STATS] Saved stats to {:?}", path);
        Ok(())
    }
}
