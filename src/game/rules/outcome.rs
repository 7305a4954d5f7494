//! Board-level game results
//!
//! [`BoardResult`] is what the rules say about a finished game, independent of
//! who was sitting at the board. Mapping it onto a win/loss for the human is
//! done in [`crate::game::resources::game_over`].

use serde::{Deserialize, Serialize};
use shakmaty::Color;

/// Final score of a game from the board's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardResult {
    WhiteWin,
    BlackWin,
    Draw,
}

impl BoardResult {
    /// Result for a game won by `color`
    pub fn won_by(color: Color) -> Self {
        match color {
            Color::White => BoardResult::WhiteWin,
            Color::Black => BoardResult::BlackWin,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            BoardResult::WhiteWin => Some(Color::White),
            BoardResult::BlackWin => Some(Color::Black),
            BoardResult::Draw => None,
        }
    }

    /// PGN result token (`1-0`, `0-1`, `1/2-1/2`)
    pub fn pgn_token(self) -> &'static str {
        match self {
            BoardResult::WhiteWin => "1-0",
            BoardResult::BlackWin => "0-1",
            BoardResult::Draw => "1/2-1/2",
        }
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    /// Same position reached for the third time
    Repetition,
    /// Fifty moves by each side without capture or pawn move
    FiftyMoves,
    Timeout,
    Resignation,
}

impl Termination {
    pub fn description(self) -> &'static str {
        match self {
            Termination::Checkmate => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::InsufficientMaterial => "insufficient material",
            Termination::Repetition => "threefold repetition",
            Termination::FiftyMoves => "fifty-move rule",
            Termination::Timeout => "time forfeit",
            Termination::Resignation => "resignation",
        }
    }
}
