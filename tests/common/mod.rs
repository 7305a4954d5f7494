//! Shared test fixtures
//!
//! [`ScriptedEngine`] stands in for a UCI process. Replies are queued from the
//! test through an [`EngineHandle`]; with nothing queued it plays the first
//! legal move. Every call is logged so tests can assert what the controller
//! asked for.

#![allow(dead_code)]

use chess_trainer::game::ai::{
    Analysis, Dispatch, EngineCoordinator, Evaluation, SearchEngine, SearchError, SearchResult,
};
use chess_trainer::game::resources::ClockConfig;
use chess_trainer::game::rules::BoardState;
use chess_trainer::game::types::{Move, Strength};
use chess_trainer::game::{SessionController, SessionEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Queued answer for the next search
#[derive(Debug, Clone)]
pub enum Scripted {
    Move(Move),
    NoMove,
    Fail(String),
    Eval(Analysis),
}

/// Calls received by the engine, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Configure(Option<Strength>),
    SetPosition(Vec<Move>),
    BestMove,
    Evaluate,
}

pub struct ScriptedEngine {
    replies: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<EngineCall>>>,
    /// Searches block until the test sends on this gate
    gate: Option<Receiver<()>>,
    position: Vec<Move>,
}

/// Test-side view of a [`ScriptedEngine`]
#[derive(Clone)]
pub struct EngineHandle {
    replies: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<EngineCall>>>,
}

impl EngineHandle {
    pub fn push_reply(&self, reply: Scripted) {
        self.replies.lock().push_back(reply);
    }

    pub fn push_move(&self, uci: &str) {
        self.push_reply(Scripted::Move(mv(uci)));
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    pub fn search_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, EngineCall::BestMove | EngineCall::Evaluate))
            .count()
    }

    pub fn configured_strengths(&self) -> Vec<Option<Strength>> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                EngineCall::Configure(strength) => Some(*strength),
                _ => None,
            })
            .collect()
    }
}

impl ScriptedEngine {
    pub fn new() -> (Self, EngineHandle) {
        let replies = Arc::new(Mutex::new(VecDeque::new()));
        let calls = Arc::new(Mutex::new(Vec::new()));
        let engine = Self {
            replies: Arc::clone(&replies),
            calls: Arc::clone(&calls),
            gate: None,
            position: Vec::new(),
        };
        (engine, EngineHandle { replies, calls })
    }

    /// Engine whose searches wait for a message on the returned sender
    pub fn gated() -> (Self, EngineHandle, Sender<()>) {
        let (engine, handle) = Self::new();
        let (release, gate) = unbounded();
        (
            Self {
                gate: Some(gate),
                ..engine
            },
            handle,
            release,
        )
    }

    fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            let _ = gate.recv();
        }
    }

    fn first_legal(&self) -> Option<Move> {
        BoardState::replay(&self.position)
            .ok()
            .and_then(|board| board.legal_moves().first().copied())
    }
}

impl SearchEngine for ScriptedEngine {
    fn configure(&mut self, strength: Option<Strength>) -> SearchResult<()> {
        self.calls.lock().push(EngineCall::Configure(strength));
        Ok(())
    }

    fn set_position(&mut self, moves: &[Move]) -> SearchResult<()> {
        self.calls.lock().push(EngineCall::SetPosition(moves.to_vec()));
        self.position = moves.to_vec();
        Ok(())
    }

    fn best_move(&mut self) -> SearchResult<Option<Move>> {
        self.calls.lock().push(EngineCall::BestMove);
        self.wait_for_gate();
        let reply = self.replies.lock().pop_front();
        match reply {
            Some(Scripted::Move(mv)) => Ok(Some(mv)),
            Some(Scripted::NoMove) => Ok(None),
            Some(Scripted::Fail(message)) => Err(SearchError::protocol(message)),
            Some(Scripted::Eval(analysis)) => Ok(analysis.best_move),
            None => Ok(self.first_legal()),
        }
    }

    fn evaluate(&mut self) -> SearchResult<Analysis> {
        self.calls.lock().push(EngineCall::Evaluate);
        self.wait_for_gate();
        let reply = self.replies.lock().pop_front();
        match reply {
            Some(Scripted::Eval(analysis)) => Ok(analysis),
            Some(Scripted::Fail(message)) => Err(SearchError::protocol(message)),
            _ => Ok(Analysis {
                evaluation: Evaluation::Centipawns(0),
                best_move: self.first_legal(),
            }),
        }
    }
}

pub fn mv(uci: &str) -> Move {
    uci.parse().expect("test move must be valid UCI")
}

pub fn moves(list: &[&str]) -> Vec<Move> {
    list.iter().map(|m| mv(m)).collect()
}

/// Controller with a scripted engine answering inline
pub fn inline_controller() -> (SessionController, EngineHandle) {
    let (engine, handle) = ScriptedEngine::new();
    let coordinator = EngineCoordinator::new(Some(Box::new(engine)), Dispatch::Inline);
    (SessionController::new(coordinator, Strength::new(1500)), handle)
}

/// Controller with no engine at all
pub fn engineless_controller() -> SessionController {
    SessionController::new(EngineCoordinator::without_engine(), Strength::new(1500))
}

pub fn clock() -> ClockConfig {
    ClockConfig::default()
}

/// Run one control-loop step and return the events it produced
pub fn step(controller: &mut SessionController) -> Vec<SessionEvent> {
    controller.update(std::time::Instant::now());
    controller.drain_events()
}

pub fn has_event(events: &[SessionEvent], predicate: impl Fn(&SessionEvent) -> bool) -> bool {
    events.iter().any(predicate)
}
