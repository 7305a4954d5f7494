//! Trainer settings and their persistence
//!
//! Saves and loads [`TrainerSettings`] to/from a JSON file.
//!
//! # File Location
//!
//! `settings.json` in the per-user configuration directory, e.g.
//! `~/.config/ChessTrainer/settings.json` on Linux. Falls back to a local
//! `settings.json` when no config directory can be resolved.
//!
//! # Error Handling
//!
//! - Load failures fall back to default settings
//! - Save failures are reported to the caller, who logs them
//!
//! Every field has a default, so older or partial files still load.

use super::error::CoreResult;
use crate::game::ai::EngineOptions;
use crate::game::resources::ClockConfig;
use crate::game::types::Strength;
use crate::persistence::GameStats;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Shortest accepted control loop interval
const MIN_POLL_INTERVAL_MS: u64 = 10;

/// User preferences for the trainer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerSettings {
    /// Engine executable; discovered automatically when unset
    pub engine_path: Option<PathBuf>,
    pub engine: EngineOptions,
    /// Control loop cadence (engine polling and clock)
    pub poll_interval_ms: u64,
    pub clock: ClockConfig,
    /// Engine strength in manual games
    pub strength: Strength,
    pub auto_white: Strength,
    pub auto_black: Strength,
    /// JSON opening book; the built-in book is used when unset
    pub opening_book: Option<PathBuf>,
    /// Statistics file; the per-user data directory when unset
    pub stats_path: Option<PathBuf>,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            engine_path: None,
            engine: EngineOptions::default(),
            poll_interval_ms: 100,
            clock: ClockConfig::default(),
            strength: Strength::default(),
            auto_white: Strength::new(2500),
            auto_black: Strength::new(800),
            opening_book: None,
            stats_path: None,
        }
    }
}

impl TrainerSettings {
    /// Resolve the settings file path in the user's configuration directory
    pub fn default_path() -> PathBuf {
        match ProjectDirs::from("com", "trilltino", "ChessTrainer") {
            Some(dirs) => dirs.config_dir().join(SETTINGS_FILENAME),
            None => PathBuf::from(SETTINGS_FILENAME),
        }
    }

    pub fn load(path: &Path) -> CoreResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        Ok(settings.normalized())
    }

    /// Settings at `path`, or defaults when the file is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
            return Self::default();
        }

        match Self::load(path) {
            Ok(settings) => {
                info!("[SETTINGS] Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!(
                    "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("[SETTINGS] Saved settings to {:?}", path);
        Ok(())
    }

    /// Clamp values a hand-edited file may have pushed out of range
    pub fn normalized(mut self) -> Self {
        self.clock = self.clock.clamped();
        self.poll_interval_ms = self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS);
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    pub fn stats_path(&self) -> PathBuf {
        self.stats_path.clone().unwrap_or_else(GameStats::default_path)
    }
}
