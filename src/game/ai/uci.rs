//! Stockfish engine process
//!
//! The UCI conversation itself is handled by the `stockfish` crate. This
//! module maps it onto [`SearchEngine`]: strength limits become ELO and skill
//! settings, a move list becomes a FEN position, and engine output becomes a
//! [`Move`] or an [`Evaluation`].
//!
//! # Executable discovery
//!
//! [`guess_engine_paths`] lists candidates in priority order: the
//! `STOCKFISH_PATH` environment variable, the usual install locations, then
//! every `stockfish` binary found on `PATH`. [`UciEngine::discover`] tries an
//! explicit path first and then each candidate.

use super::engine::{Analysis, EngineOptions, Evaluation, SearchEngine, SearchError, SearchResult};
use crate::game::rules::BoardState;
use crate::game::types::{Move, Strength};
use shakmaty::Color;
use std::env;
use std::path::{Path, PathBuf};
use stockfish::{EvalType, Stockfish};
use tracing::{debug, info, warn};

/// Environment variable naming the engine executable
pub const ENGINE_PATH_VAR: &str = "STOCKFISH_PATH";

/// Skill level Stockfish uses at full strength
const MAX_SKILL_LEVEL: u32 = 20;

#[cfg(windows)]
const ENGINE_BINARY: &str = "stockfish.exe";
#[cfg(not(windows))]
const ENGINE_BINARY: &str = "stockfish";

/// Plausible engine locations that exist on this machine, best first
pub fn guess_engine_paths() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    if let Some(path) = env::var_os(ENGINE_PATH_VAR).filter(|p| !p.is_empty()) {
        candidates.push(PathBuf::from(path));
    }

    if cfg!(windows) {
        for base in [r"C:\Program Files", r"C:\Program Files (x86)"] {
            candidates.push(Path::new(base).join("Stockfish").join("stockfish.exe"));
            candidates.push(
                Path::new(base)
                    .join("Stockfish")
                    .join("bin")
                    .join("stockfish.exe"),
            );
        }
    } else {
        for path in [
            "/usr/bin/stockfish",
            "/usr/local/bin/stockfish",
            "/opt/homebrew/bin/stockfish",
            "/usr/games/stockfish",
        ] {
            candidates.push(PathBuf::from(path));
        }
    }

    if let Some(search_path) = env::var_os("PATH") {
        candidates.extend(env::split_paths(&search_path).map(|dir| dir.join(ENGINE_BINARY)));
    }

    let mut found: Vec<PathBuf> = Vec::new();
    for path in candidates {
        if path.is_file() && !found.contains(&path) {
            found.push(path);
        }
    }
    found
}

/// A running Stockfish process
pub struct UciEngine {
    path: PathBuf,
    stockfish: Stockfish,
    options: EngineOptions,
    /// Set by `set_position`; engine scores are relative to the side to move
    side_to_move: Color,
}

impl UciEngine {
    /// Start the engine at `path` and apply the process-level options
    pub fn spawn(path: &Path, options: EngineOptions) -> SearchResult<Self> {
        let text = path
            .to_str()
            .ok_or_else(|| SearchError::protocol(format!("engine path {:?} is not UTF-8", path)))?;

        let mut stockfish = Stockfish::new(text)?;
        stockfish.set_threads(options.threads)?;
        stockfish.set_hash(options.hash_mb)?;
        stockfish.setup_for_new_game()?;

        info!("[ENGINE] Started {:?}", path);
        Ok(Self {
            path: path.to_path_buf(),
            stockfish,
            options,
            side_to_move: Color::White,
        })
    }

    /// Start the first engine that works: `explicit` if given, then the guessed paths
    pub fn discover(explicit: Option<&Path>, options: EngineOptions) -> SearchResult<Self> {
        let mut candidates: Vec<PathBuf> = explicit.map(Path::to_path_buf).into_iter().collect();
        candidates.extend(guess_engine_paths());

        let mut last_error = None;
        for candidate in candidates {
            match Self::spawn(&candidate, options) {
                Ok(engine) => return Ok(engine),
                Err(e) => {
                    warn!("[ENGINE] Could not start {:?}: {}", candidate, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            SearchError::protocol(format!(
                "no engine executable found (set {} or pass --engine)",
                ENGINE_PATH_VAR
            ))
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SearchEngine for UciEngine {
    fn configure(&mut self, strength: Option<Strength>) -> SearchResult<()> {
        match strength {
            Some(strength) => {
                self.stockfish.set_skill_level(self.options.skill)?;
                self.stockfish.set_elo(strength.elo())?;
            }
            None => {
                self.stockfish.set_skill_level(MAX_SKILL_LEVEL)?;
                self.stockfish
                    .set_option("UCI_LimitStrength", "false")?;
            }
        }
        Ok(())
    }

    fn set_position(&mut self, moves: &[Move]) -> SearchResult<()> {
        let board = BoardState::replay(moves)
            .map_err(|e| SearchError::protocol(format!("unplayable position: {}", e)))?;
        self.side_to_move = board.turn();
        self.stockfish.set_fen_position(&board.fen())?;
        Ok(())
    }

    fn best_move(&mut self) -> SearchResult<Option<Move>> {
        self.stockfish.set_depth(self.options.move_depth);
        let output = self.stockfish.go()?;
        let best = parse_best_move(output.best_move())?;
        debug!("[ENGINE] bestmove {:?}", best.map(|mv| mv.to_uci()));
        Ok(best)
    }

    fn evaluate(&mut self) -> SearchResult<Analysis> {
        self.stockfish.set_depth(self.options.analysis_depth);
        let output = self.stockfish.go()?;
        let best_move = parse_best_move(output.best_move())?;

        let eval = output.eval();
        let relative = match eval.eval_type() {
            EvalType::Mate => Evaluation::MateIn(eval.value()),
            _ => Evaluation::Centipawns(eval.value()),
        };
        Ok(Analysis {
            evaluation: white_relative(relative, self.side_to_move),
            best_move,
        })
    }
}

/// Engine's `bestmove` text; `(none)`, `0000` and empty mean no move
fn parse_best_move(text: &str) -> SearchResult<Option<Move>> {
    let token = text.trim();
    if token.is_empty() || token == "(none)" || token == "0000" {
        return Ok(None);
    }
    token
        .parse::<Move>()
        .map(Some)
        .map_err(|e| SearchError::protocol(e.to_string()))
}

/// Turn a side-to-move score into White's point of view
fn white_relative(score: Evaluation, side_to_move: Color) -> Evaluation {
    match side_to_move {
        Color::White => score,
        Color::Black => score.flipped(),
    }
}
