//! Undo/redo over the board's move history
//!
//! The committed moves themselves live in [`BoardState`]; this resource only
//! holds the moves that were taken back and may be replayed.
//!
//! - **Undo** pops the last move off the board onto the redo stack
//! - **Redo** pops the redo stack and replays the move if it is still legal
//! - Any freshly committed move clears the redo stack (see [`MoveHistory::clear_redo`])
//!
//! Whether undo/redo is allowed in the current mode is decided by the session
//! controller, not here.

use crate::game::rules::BoardState;
use crate::game::types::Move;
use tracing::debug;

/// Redo stack for taken-back moves
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MoveHistory {
    /// Most recently undone move is last
    redo_stack: Vec<Move>,
}

impl MoveHistory {
    /// Take back the last move on `board`
    ///
    /// Returns the move taken back, or `None` when there is no history.
    pub fn undo(&mut self, board: &mut BoardState) -> Option<Move> {
        let mv = board.pop()?;
        self.redo_stack.push(mv);
        debug!("[HISTORY] Undo {} ({} redoable)", mv, self.redo_stack.len());
        Some(mv)
    }

    /// Replay the most recently undone move
    ///
    /// The move is re-validated against the current position. When it is no
    /// longer legal the entry is consumed and nothing else happens; the rest
    /// of the stack stays intact.
    pub fn redo(&mut self, board: &mut BoardState) -> Option<Move> {
        let mv = self.redo_stack.pop()?;
        match board.push(mv) {
            Ok(()) => {
                debug!("[HISTORY] Redo {}", mv);
                Some(mv)
            }
            Err(_) => {
                debug!("[HISTORY] Redo {} no longer legal, skipped", mv);
                None
            }
        }
    }

    /// Drop every redoable move (called on each committed ply)
    pub fn clear_redo(&mut self) {
        self.redo_stack.clear();
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Redoable moves, most recently undone last
    pub fn redo_stack(&self) -> &[Move] {
        &self.redo_stack
    }
}
