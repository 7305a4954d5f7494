//! Session state owned by the controller
//!
//! Only the control thread ever touches a [`Session`]. Engine workers get an
//! immutable move list, never a reference into here. Renderers get a
//! [`SessionSnapshot`].

use crate::game::ai::{Analysis, RequestPurpose};
use crate::game::mode::{Mode, ModeKind};
use crate::game::resources::{ClockConfig, GameTimer, MoveHistory, ResultRecord};
use crate::game::rules::BoardState;
use crate::game::training::TrainingProgress;
use crate::game::types::Move;
use shakmaty::{Color, Square};
use uuid::Uuid;

/// The engine request the session is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Awaiting {
    pub generation: u64,
    pub purpose: RequestPurpose,
}

/// Everything about the game in progress (or the last one played)
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) id: Uuid,
    pub(crate) board: BoardState,
    pub(crate) mode: Mode,
    pub(crate) history: MoveHistory,
    pub(crate) timer: GameTimer,
    /// Clock settings the game started with
    pub(crate) clock: ClockConfig,
    pub(crate) awaiting: Option<Awaiting>,
    pub(crate) hint: Option<Move>,
    pub(crate) analysis: Option<Analysis>,
    pub(crate) selected: Option<Square>,
    pub(crate) orientation: Color,
    /// PGN names for (White, Black), fixed when the game starts
    pub(crate) players: (String, String),
    pub(crate) last_result: Option<ResultRecord>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Mode::Idle, ClockConfig::default())
    }
}

impl Session {
    /// Fresh board in `mode`; the clock is paused
    pub fn new(mode: Mode, clock: ClockConfig) -> Self {
        let orientation = mode.human().unwrap_or(Color::White);
        let players = mode.player_names();
        Self {
            id: Uuid::new_v4(),
            board: BoardState::new_game(),
            mode,
            history: MoveHistory::default(),
            timer: GameTimer::from_config(clock),
            clock,
            awaiting: None,
            hint: None,
            analysis: None,
            selected: None,
            orientation,
            players,
            last_result: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    pub fn awaiting(&self) -> Option<Awaiting> {
        self.awaiting
    }

    pub fn hint(&self) -> Option<Move> {
        self.hint
    }

    pub fn last_result(&self) -> Option<&ResultRecord> {
        self.last_result.as_ref()
    }

    /// Human's turn in a mode that has a human
    pub fn is_human_turn(&self) -> bool {
        self.mode.human() == Some(self.board.turn())
    }

    pub fn awaiting_engine_move(&self) -> bool {
        matches!(
            self.awaiting,
            Some(Awaiting {
                purpose: RequestPurpose::Move,
                ..
            })
        )
    }

    pub fn training_progress(&self) -> Option<TrainingProgress> {
        match &self.mode {
            Mode::Training { line, .. } => Some(line.progress()),
            _ => None,
        }
    }

    /// Drop per-position helpers after the board changed
    pub(crate) fn clear_position_hints(&mut self) {
        self.hint = None;
        self.analysis = None;
        self.selected = None;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let legal_targets = self
            .selected
            .map(|square| self.board.legal_targets(square))
            .unwrap_or_default();

        SessionSnapshot {
            fen: self.board.fen(),
            last_move: self.board.last_move(),
            selected_square: self.selected,
            legal_targets,
            orientation: self.orientation,
            mode: self.mode.kind(),
            human: self.mode.human(),
            side_to_move: self.board.turn(),
            ply_count: self.board.ply_count(),
            clocks: ClockSnapshot {
                white: self.timer.white_time_left,
                black: self.timer.black_time_left,
                running: self.timer.is_running,
            },
            hint: self.hint,
            analysis: self.analysis,
            training: self.training_progress(),
            awaiting_engine: self.awaiting_engine_move(),
            can_redo: self.history.can_redo(),
            last_result: self.last_result.clone(),
        }
    }
}

/// Remaining time per side in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSnapshot {
    pub white: u32,
    pub black: u32,
    pub running: bool,
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub fen: String,
    pub last_move: Option<Move>,
    pub selected_square: Option<Square>,
    /// Destinations of the selected piece for the side to move
    pub legal_targets: Vec<Square>,
    /// Side shown at the bottom of the board
    pub orientation: Color,
    pub mode: ModeKind,
    pub human: Option<Color>,
    pub side_to_move: Color,
    pub ply_count: usize,
    pub clocks: ClockSnapshot,
    pub hint: Option<Move>,
    pub analysis: Option<Analysis>,
    pub training: Option<TrainingProgress>,
    pub awaiting_engine: bool,
    pub can_redo: bool,
    pub last_result: Option<ResultRecord>,
}
