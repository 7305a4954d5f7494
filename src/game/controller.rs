//! Session controller - the game's top-level state machine
//!
//! Owns the [`Session`] and the [`EngineCoordinator`] and is driven from a
//! single control thread. Every operation either succeeds or returns a
//! [`GameError`] having changed nothing.
//!
//! # State Machine
//!
//! ```text
//!            start_manual / start_auto / start_training
//!   Idle ─────────────────────────────────────────────▶ Manual | Auto | Training
//!    ▲                                                        │
//!    └── terminal position / resign / stop / flag fall ───────┘
//!
//!   Training ── line exhausted, game still going ──▶ Manual
//! ```
//!
//! A finished game is `Idle` with [`Session::last_result`] set. The board and
//! its history stay available for undo/redo and PGN export.
//!
//! # Move acceptance
//!
//! Every ply goes through one private `commit` step: the move is pushed,
//! the redo stack is cleared, the mover gets the clock increment and hints are
//! dropped. Human moves are validated in [`SessionController::submit_human_move`];
//! engine moves are checked for staleness and legality in
//! [`SessionController::apply_response`] before they get there.
//!
//! # Control loop
//!
//! The front end calls [`SessionController::update`] at a fixed cadence
//! (100 ms by default). One update drains the engine channel, then ticks the
//! clock once per whole second elapsed since the previous tick.

use crate::game::ai::{
    EngineCoordinator, EngineReply, EngineRequest, EngineResponse, RequestPurpose,
};
use crate::game::error::{GameError, GameResult};
use crate::game::events::{MoveSource, SessionEvent};
use crate::game::mode::Mode;
use crate::game::resources::{ClockConfig, ResultRecord, TimeExpired};
use crate::game::rules::{BoardResult, BoardState, Termination};
use crate::game::session::{Awaiting, Session, SessionSnapshot};
use crate::game::training::{AdvanceStatus, LineCheck, TrainingLine};
use crate::game::types::{Move, Strength};
use crate::persistence::pgn::{self, PgnHeaders};
use shakmaty::{Color, Square};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct SessionController {
    session: Session,
    coordinator: EngineCoordinator,
    /// Opponent strength once a training line runs out
    default_strength: Strength,
    events: Vec<SessionEvent>,
    /// Instant the last whole clock second was counted from
    tick_anchor: Option<Instant>,
}

impl SessionController {
    pub fn new(coordinator: EngineCoordinator, default_strength: Strength) -> Self {
        Self {
            session: Session::default(),
            coordinator,
            default_strength,
            events: Vec::new(),
            tick_anchor: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn board(&self) -> &BoardState {
        &self.session.board
    }

    pub fn mode(&self) -> &Mode {
        &self.session.mode
    }

    pub fn engine_available(&self) -> bool {
        self.coordinator.is_available()
    }

    /// Generation of the most recent engine request or invalidation
    pub fn generation(&self) -> u64 {
        self.coordinator.generation()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Events queued since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // Starting games
    // ------------------------------------------------------------------

    /// Human against the engine
    ///
    /// When the engine moves first a request goes out immediately, which needs
    /// an engine; with the human moving first the engine is only needed later.
    pub fn start_manual(
        &mut self,
        human: Color,
        clock: ClockConfig,
        strength: Strength,
    ) -> GameResult<()> {
        if human != Color::White && !self.coordinator.is_available() {
            return Err(GameError::engine_unavailable(
                "the engine has to move first but none is configured",
            ));
        }

        self.begin(Mode::Manual { human, strength }, clock);
        info!(
            "[SESSION] Manual game: human plays {:?}, engine at {}",
            human, strength
        );

        if self.session.board.turn() != human {
            self.dispatch_engine_move();
        }
        Ok(())
    }

    /// Engine against engine
    pub fn start_auto(
        &mut self,
        white: Strength,
        black: Strength,
        clock: ClockConfig,
    ) -> GameResult<()> {
        if !self.coordinator.is_available() {
            return Err(GameError::engine_unavailable(
                "automatic games need a search engine",
            ));
        }

        self.begin(Mode::Auto { white, black }, clock);
        info!("[SESSION] Auto game: {} vs {}", white, black);
        self.dispatch_engine_move();
        Ok(())
    }

    /// Drill a scripted line as `human`
    ///
    /// The line is validated before anything changes; a bad line leaves the
    /// current session exactly as it was.
    pub fn start_training<S: AsRef<str>>(
        &mut self,
        name: &str,
        notation: &[S],
        human: Color,
        clock: ClockConfig,
    ) -> GameResult<()> {
        let line = TrainingLine::load(name, notation)?;

        self.begin(Mode::Training { line, human }, clock);
        info!("[SESSION] Training '{}' as {:?}", name, human);
        self.advance_training();
        Ok(())
    }

    fn begin(&mut self, mode: Mode, clock: ClockConfig) {
        self.coordinator.invalidate();
        self.session = Session::new(mode, clock);
        self.session.timer.start();
        self.tick_anchor = None;
        self.events.push(SessionEvent::GameStarted);
    }

    // ------------------------------------------------------------------
    // Human input
    // ------------------------------------------------------------------

    /// Play `mv` for the human
    pub fn submit_human_move(&mut self, mv: Move) -> GameResult<()> {
        let human = self.session.mode.human().ok_or(GameError::InvalidTurn)?;
        if self.session.board.turn() != human {
            return Err(GameError::InvalidTurn);
        }
        if !self.session.board.is_legal(mv) {
            return Err(GameError::IllegalMove { mv });
        }
        if let Mode::Training { line, .. } = &self.session.mode {
            if let LineCheck::Mismatch { expected } = line.check_human_move(mv) {
                debug!("[TRAINING] Off line: played {}, expected {}", mv, expected);
                return Err(GameError::OffLine {
                    expected,
                    played: mv,
                });
            }
        }

        self.commit(mv, MoveSource::Human)?;
        if let Mode::Training { line, .. } = &mut self.session.mode {
            line.accept();
        }

        if self.finish_if_terminal() {
            return Ok(());
        }

        match self.session.mode {
            Mode::Manual { .. } => self.dispatch_engine_move(),
            Mode::Training { .. } => self.advance_training(),
            Mode::Idle | Mode::Auto { .. } => {}
        }
        Ok(())
    }

    /// Parse UCI or SAN text in the current position and submit it
    pub fn submit_notation(&mut self, text: &str) -> GameResult<()> {
        let mv = self.session.board.parse_notation(text)?;
        self.submit_human_move(mv)
    }

    /// Give up the current game
    ///
    /// Counts as a loss for the human. In an automatic game there is nobody to
    /// lose, so this is the same as [`SessionController::stop`].
    pub fn resign(&mut self) {
        match self.session.mode.human() {
            Some(human) => {
                info!("[SESSION] {:?} resigns", human);
                self.finish(BoardResult::won_by(!human), Termination::Resignation);
            }
            None => self.stop(),
        }
    }

    /// Abandon the current game without recording a result
    pub fn stop(&mut self) {
        self.coordinator.invalidate();
        self.session.awaiting = None;
        self.session.timer.stop();
        self.tick_anchor = None;

        if self.session.mode.is_active() {
            info!("[SESSION] Stopped {} game", self.session.mode.kind());
            self.session.mode = Mode::Idle;
            self.events.push(SessionEvent::Stopped);
        }
    }

    /// Take back the last ply (idle or manual games only)
    pub fn undo(&mut self) -> Option<Move> {
        if !self.history_enabled() {
            return None;
        }
        self.cancel_pending();

        let mv = self.session.history.undo(&mut self.session.board)?;
        self.session.clear_position_hints();
        self.events.push(SessionEvent::MoveUndone(mv));
        self.resume_engine_turn();
        Some(mv)
    }

    /// Replay the last undone ply if it is still legal (idle or manual games only)
    pub fn redo(&mut self) -> Option<Move> {
        if !self.history_enabled() {
            return None;
        }
        self.cancel_pending();

        let mv = self.session.history.redo(&mut self.session.board)?;
        self.session.clear_position_hints();
        self.events.push(SessionEvent::MoveRedone(mv));
        if self.session.mode.is_active() && !self.finish_if_terminal() {
            self.resume_engine_turn();
        }
        Some(mv)
    }

    pub fn select_square(&mut self, square: Option<Square>) {
        self.session.selected = square;
    }

    pub fn set_orientation(&mut self, color: Color) {
        self.session.orientation = color;
    }

    // ------------------------------------------------------------------
    // Engine queries
    // ------------------------------------------------------------------

    /// Ask the engine for a suggestion on the human's turn
    ///
    /// A newer hint request supersedes an older one.
    pub fn request_hint(&mut self) -> GameResult<u64> {
        if !self.session.is_human_turn() {
            return Err(GameError::InvalidTurn);
        }
        self.query(RequestPurpose::Hint)
    }

    /// Ask for an evaluation of the current position, in any mode
    pub fn request_analysis(&mut self) -> GameResult<u64> {
        self.query(RequestPurpose::Analysis)
    }

    /// Ask the engine to move again after a failed attempt
    pub fn request_engine_move(&mut self) -> GameResult<u64> {
        let side = self.session.board.turn();
        if self.session.mode.engine_strength(side).is_none() || self.session.board.is_terminal()
        {
            return Err(GameError::InvalidTurn);
        }
        if self.session.awaiting_engine_move() {
            return Err(GameError::EngineBusy);
        }
        self.submit_move_request()
    }

    fn query(&mut self, purpose: RequestPurpose) -> GameResult<u64> {
        if self.session.awaiting_engine_move() {
            return Err(GameError::EngineBusy);
        }
        let request = EngineRequest::new(
            purpose,
            self.session.board.turn(),
            self.session.board.moves().to_vec(),
            None,
        );
        let generation = self.coordinator.submit(request)?;
        self.session.awaiting = Some(Awaiting {
            generation,
            purpose,
        });
        self.events
            .push(SessionEvent::EngineRequested { generation, purpose });
        Ok(generation)
    }

    fn submit_move_request(&mut self) -> GameResult<u64> {
        let side = self.session.board.turn();
        let strength = self
            .session
            .mode
            .engine_strength(side)
            .ok_or(GameError::InvalidTurn)?;
        let request = EngineRequest::new(
            RequestPurpose::Move,
            side,
            self.session.board.moves().to_vec(),
            Some(strength),
        );

        let generation = self.coordinator.submit(request)?;
        self.session.awaiting = Some(Awaiting {
            generation,
            purpose: RequestPurpose::Move,
        });
        self.events.push(SessionEvent::EngineRequested {
            generation,
            purpose: RequestPurpose::Move,
        });
        Ok(generation)
    }

    /// Request the engine's move, turning a failure into an event
    fn dispatch_engine_move(&mut self) {
        if let Err(e) = self.submit_move_request() {
            self.engine_failed(e);
        }
    }

    /// Request a move if the engine is on move in the running game
    fn resume_engine_turn(&mut self) {
        let side = self.session.board.turn();
        if self.session.mode.engine_strength(side).is_some() {
            self.dispatch_engine_move();
        }
    }

    // ------------------------------------------------------------------
    // Control loop
    // ------------------------------------------------------------------

    /// One step of the control loop: apply engine responses, then run the clock
    pub fn update(&mut self, now: Instant) {
        for response in self.coordinator.drain() {
            self.apply_response(response);
        }

        if !self.session.timer.is_running {
            self.tick_anchor = None;
            return;
        }
        let anchor = *self.tick_anchor.get_or_insert(now);
        let elapsed = now.saturating_duration_since(anchor).as_secs();
        self.tick_anchor = Some(anchor + Duration::from_secs(elapsed));

        for _ in 0..elapsed {
            if !self.tick() {
                break;
            }
        }
    }

    /// One second of play for the side to move
    ///
    /// Returns `false` once the clock is no longer running.
    pub fn tick(&mut self) -> bool {
        let side = self.session.board.turn();
        if let Some(TimeExpired(flagged)) = self.session.timer.tick(side) {
            self.events.push(SessionEvent::TimeExpired(flagged));
            self.finish(BoardResult::won_by(!flagged), Termination::Timeout);
        }
        self.session.timer.is_running
    }

    /// Apply one engine response, dropping it if it is stale
    pub fn apply_response(&mut self, response: EngineResponse) {
        let current = matches!(
            self.session.awaiting,
            Some(Awaiting { generation, purpose })
                if generation == response.generation && purpose == response.purpose
        );
        if !current {
            debug!(
                "[ENGINE] Discarding stale response #{} (current {})",
                response.generation,
                self.coordinator.generation()
            );
            self.events.push(SessionEvent::StaleResponseDiscarded {
                generation: response.generation,
            });
            return;
        }
        self.session.awaiting = None;

        match (response.purpose, response.reply) {
            (RequestPurpose::Move, EngineReply::BestMove(mv)) => self.apply_engine_move(mv),
            (RequestPurpose::Move, EngineReply::NoMove) => {
                self.engine_failed(GameError::engine_unavailable("engine returned no move"))
            }
            (RequestPurpose::Move, EngineReply::Failed(message)) => {
                self.engine_failed(GameError::engine_unavailable(message))
            }
            (RequestPurpose::Hint, EngineReply::BestMove(mv)) => {
                if self.session.board.is_legal(mv) {
                    self.session.hint = Some(mv);
                    self.events.push(SessionEvent::HintReady(mv));
                } else {
                    self.events
                        .push(SessionEvent::EngineFailed(GameError::EngineInvalidMove { mv }));
                }
            }
            (RequestPurpose::Analysis, EngineReply::Evaluation(analysis)) => {
                self.session.analysis = Some(analysis);
                self.events.push(SessionEvent::AnalysisReady(analysis));
            }
            (_, EngineReply::Failed(message)) => self
                .events
                .push(SessionEvent::EngineFailed(GameError::engine_unavailable(message))),
            (purpose, reply) => {
                warn!("[ENGINE] Unexpected {:?} reply to {:?} request", reply, purpose);
                self.events
                    .push(SessionEvent::EngineFailed(GameError::engine_unavailable(
                        "engine gave no usable answer",
                    )));
            }
        }
    }

    fn apply_engine_move(&mut self, mv: Move) {
        if !self.session.board.is_legal(mv) {
            warn!("[ENGINE] Proposed illegal move {}", mv);
            self.engine_failed(GameError::EngineInvalidMove { mv });
            return;
        }
        if self.commit(mv, MoveSource::Engine).is_err() || self.finish_if_terminal() {
            return;
        }
        if matches!(self.session.mode, Mode::Auto { .. }) {
            self.dispatch_engine_move();
        }
    }

    /// Report an engine failure; automatic games cannot continue without one
    fn engine_failed(&mut self, error: GameError) {
        warn!("[ENGINE] {}", error);
        if matches!(self.session.mode, Mode::Auto { .. }) {
            self.stop_silently();
            self.events.push(SessionEvent::EngineFailed(error));
            self.events.push(SessionEvent::Stopped);
        } else {
            self.events.push(SessionEvent::EngineFailed(error));
        }
    }

    fn stop_silently(&mut self) {
        self.coordinator.invalidate();
        self.session.awaiting = None;
        self.session.timer.stop();
        self.session.mode = Mode::Idle;
    }

    // ------------------------------------------------------------------
    // PGN
    // ------------------------------------------------------------------

    /// Current history as PGN
    pub fn export_pgn(&self) -> String {
        let (white, black) = self.session.players.clone();
        let result = match (&self.session.last_result, self.session.mode.is_active()) {
            (Some(record), false) => record.board_result.pgn_token(),
            _ => "*",
        };
        let headers = PgnHeaders::new(white, black, result);
        pgn::export(&headers, self.session.board.moves())
    }

    /// Replace the board with the game in `text`
    ///
    /// When a human is playing and the imported position is not over, play
    /// continues as a manual game from there with a fresh clock; otherwise the
    /// game is left idle for review. Refused while an automatic game is
    /// running. Returns the number of plies imported.
    pub fn import_pgn(&mut self, text: &str) -> GameResult<usize> {
        if matches!(self.session.mode, Mode::Auto { .. }) {
            return Err(GameError::AutoModeActive);
        }

        let mut board = BoardState::new_game();
        for token in pgn::parse_movetext(text) {
            let mv = board.parse_notation(&token)?;
            board.push(mv)?;
        }

        let resumed = match self.session.mode.human() {
            Some(human) if board.termination().is_none() => Some(Mode::Manual {
                human,
                strength: self
                    .session
                    .mode
                    .engine_strength(!human)
                    .unwrap_or(self.default_strength),
            }),
            _ => None,
        };

        self.coordinator.invalidate();
        let plies = board.ply_count();
        let orientation = self.session.orientation;
        let clock = self.session.clock;
        let mut session = match resumed {
            Some(mode) => Session::new(mode, clock),
            None => Session::default(),
        };
        session.board = board;
        session.orientation = orientation;
        self.session = session;
        self.tick_anchor = None;

        info!("[SESSION] Imported {} plies", plies);
        self.events.push(SessionEvent::Imported { plies });

        if self.session.mode.is_active() {
            info!(
                "[SESSION] Continuing imported game as manual, {:?} to move",
                self.session.board.turn()
            );
            self.session.timer.start();
            self.resume_engine_turn();
        }
        Ok(plies)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn history_enabled(&self) -> bool {
        matches!(self.session.mode, Mode::Idle | Mode::Manual { .. })
    }

    fn cancel_pending(&mut self) {
        self.coordinator.invalidate();
        self.session.awaiting = None;
    }

    /// The single place a ply enters the board
    fn commit(&mut self, mv: Move, source: MoveSource) -> GameResult<()> {
        let side = self.session.board.turn();
        let san = self
            .session
            .board
            .san(mv)
            .unwrap_or_else(|| mv.to_uci());
        self.session.board.push(mv)?;
        self.record_commit(side, mv, san, source);
        Ok(())
    }

    /// Bookkeeping shared by every committed ply
    fn record_commit(&mut self, side: Color, mv: Move, san: String, source: MoveSource) {
        self.session.history.clear_redo();
        self.session.timer.apply_increment(side);
        self.session.clear_position_hints();
        if self.session.awaiting.is_some() {
            // Hint or analysis of the previous position
            self.cancel_pending();
        }
        debug!("[SESSION] {:?} played {} ({:?})", side, san, source);
        self.events.push(SessionEvent::MoveCommitted {
            side,
            mv,
            san,
            source,
        });
    }

    /// Play line moves for the non-human side and handle what comes after
    fn advance_training(&mut self) {
        let Session { mode, board, .. } = &mut self.session;
        let Mode::Training { line, human } = mode else {
            return;
        };
        let human = *human;
        let advance = line.advance_non_human(board, human);
        let name = line.name().to_string();
        let progress = line.progress();

        for played in advance.applied {
            self.record_commit(played.side, played.mv, played.san, MoveSource::Training);
        }

        match advance.status {
            AdvanceStatus::AwaitingHuman => {
                self.events.push(SessionEvent::TrainingProgress(progress));
            }
            AdvanceStatus::Terminal => {
                self.finish_if_terminal();
            }
            AdvanceStatus::Completed => {
                info!("[TRAINING] Line '{}' complete, continuing against the engine", name);
                self.session.mode = Mode::Manual {
                    human,
                    strength: self.default_strength,
                };
                self.events.push(SessionEvent::TrainingCompleted { name });
                if self.session.board.turn() != human {
                    self.dispatch_engine_move();
                }
            }
        }
    }

    /// End the game if the position is terminal
    fn finish_if_terminal(&mut self) -> bool {
        let board = &self.session.board;
        match (board.termination(), board.result()) {
            (Some(termination), Some(result)) => {
                self.finish(result, termination);
                true
            }
            _ => false,
        }
    }

    fn finish(&mut self, result: BoardResult, termination: Termination) {
        let record = ResultRecord::new(
            self.session.id,
            self.session.mode.kind(),
            self.session.mode.human(),
            result,
            termination,
            self.session.board.ply_count(),
        );
        info!("[SESSION] Game over: {}", record.summary());

        self.stop_silently();
        self.tick_anchor = None;
        self.session.last_result = Some(record.clone());
        self.events.push(SessionEvent::GameOver(record));
    }
}
