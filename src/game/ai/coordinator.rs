//! Engine coordinator - generation-stamped requests to the search engine
//!
//! Every request gets the next value of a monotonic generation counter. The
//! controller remembers the generation it is waiting for; anything else that
//! comes back is stale and gets dropped. Cancellation is therefore soft:
//! [`EngineCoordinator::invalidate`] bumps the counter and an in-flight query
//! simply finishes into the void.
//!
//! # Threading
//!
//! With [`Dispatch::Thread`] each request runs on its own short-lived worker
//! thread. The engine handle is shared behind a mutex, so a single engine
//! process serves one query at a time and later queries queue up behind it.
//! Workers only see the immutable request and only talk back through the
//! response channel.
//!
//! [`Dispatch::Inline`] runs the query inside `submit` but still delivers the
//! response through the channel, which keeps the controller's code path
//! identical while making tests deterministic.

use super::engine::{Analysis, SearchEngine};
use crate::game::error::{GameError, GameResult};
use crate::game::types::{Move, Strength};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use shakmaty::Color;
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};

/// Engine handle shared between the coordinator and its workers
pub type SharedEngine = Arc<Mutex<Box<dyn SearchEngine>>>;

/// Where engine queries are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dispatch {
    /// One background thread per request
    #[default]
    Thread,
    /// Run during `submit`, deliver through the channel
    Inline,
}

/// What the controller wants from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestPurpose {
    /// A move to play on the board
    Move,
    /// A suggestion for the human, never played automatically
    Hint,
    /// Evaluation of the current position
    Analysis,
}

/// Immutable query handed to a worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRequest {
    /// Stamped by [`EngineCoordinator::submit`]
    pub generation: u64,
    pub purpose: RequestPurpose,
    pub side: Color,
    /// Position as a move list from the initial position
    pub moves: Vec<Move>,
    /// `None` plays at full strength
    pub strength: Option<Strength>,
}

impl EngineRequest {
    pub fn new(
        purpose: RequestPurpose,
        side: Color,
        moves: Vec<Move>,
        strength: Option<Strength>,
    ) -> Self {
        Self {
            generation: 0,
            purpose,
            side,
            moves,
            strength,
        }
    }
}

/// Engine answer payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineReply {
    BestMove(Move),
    NoMove,
    Evaluation(Analysis),
    Failed(String),
}

/// Answer to one request, tagged with the request's generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineResponse {
    pub generation: u64,
    pub purpose: RequestPurpose,
    pub reply: EngineReply,
}

/// Single-flight request plumbing between the controller and the engine
pub struct EngineCoordinator {
    engine: Option<SharedEngine>,
    dispatch: Dispatch,
    generation: u64,
    sender: Sender<EngineResponse>,
    receiver: Receiver<EngineResponse>,
}

impl EngineCoordinator {
    pub fn new(engine: Option<Box<dyn SearchEngine>>, dispatch: Dispatch) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            engine: engine.map(|engine| Arc::new(Mutex::new(engine))),
            dispatch,
            generation: 0,
            sender,
            receiver,
        }
    }

    /// Coordinator with no engine; every submit fails with `EngineUnavailable`
    pub fn without_engine() -> Self {
        Self::new(None, Dispatch::Inline)
    }

    pub fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    /// Most recently issued generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stamp `request` with a fresh generation and dispatch it
    pub fn submit(&mut self, mut request: EngineRequest) -> GameResult<u64> {
        let engine = self
            .engine
            .clone()
            .ok_or_else(|| GameError::engine_unavailable("no search engine configured"))?;

        self.generation += 1;
        request.generation = self.generation;
        let sender = self.sender.clone();

        debug!(
            "[ENGINE] Request #{} {:?} for {:?} after {} plies",
            request.generation,
            request.purpose,
            request.side,
            request.moves.len()
        );

        match self.dispatch {
            Dispatch::Inline => deliver(&sender, run_query(&engine, &request)),
            Dispatch::Thread => {
                let generation = request.generation;
                thread::Builder::new()
                    .name(format!("engine-query-{}", generation))
                    .spawn(move || deliver(&sender, run_query(&engine, &request)))
                    .map_err(|e| {
                        GameError::engine_unavailable(format!("failed to start worker: {}", e))
                    })?;
            }
        }

        Ok(self.generation)
    }

    /// Advance the generation without dispatching, making every in-flight
    /// response stale
    pub fn invalidate(&mut self) -> u64 {
        self.generation += 1;
        debug!("[ENGINE] Generation advanced to {}", self.generation);
        self.generation
    }

    /// Next delivered response, if any, without blocking
    pub fn try_next(&self) -> Option<EngineResponse> {
        self.receiver.try_recv().ok()
    }

    /// Every response delivered so far, in arrival order
    pub fn drain(&self) -> Vec<EngineResponse> {
        self.receiver.try_iter().collect()
    }
}

fn deliver(sender: &Sender<EngineResponse>, response: EngineResponse) {
    if sender.send(response).is_err() {
        debug!("[ENGINE] Coordinator gone, response dropped");
    }
}

/// Blocking engine conversation for one request
fn run_query(engine: &SharedEngine, request: &EngineRequest) -> EngineResponse {
    let mut engine = engine.lock();

    let reply = engine
        .configure(request.strength)
        .and_then(|()| engine.set_position(&request.moves))
        .and_then(|()| match request.purpose {
            RequestPurpose::Move | RequestPurpose::Hint => {
                engine.best_move().map(|best| match best {
                    Some(mv) => EngineReply::BestMove(mv),
                    None => EngineReply::NoMove,
                })
            }
            RequestPurpose::Analysis => engine.evaluate().map(EngineReply::Evaluation),
        })
        .unwrap_or_else(|e| {
            warn!("[ENGINE] Request #{} failed: {}", request.generation, e);
            EngineReply::Failed(e.to_string())
        });

    info!(
        "[ENGINE] Request #{} {:?} answered: {:?}",
        request.generation, request.purpose, reply
    );

    EngineResponse {
        generation: request.generation,
        purpose: request.purpose,
        reply,
    }
}
