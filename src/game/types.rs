//! Core value types shared by every game subsystem
//!
//! These are the only values that cross thread boundaries: an engine worker
//! receives a move list and a [`Strength`], and hands back a [`Move`]. All of
//! them are `Copy` or cheaply clonable and carry no reference to the live board.
//!
//! # Move representation
//!
//! A [`Move`] is the structural triple `(from, to, promotion)`, written in UCI
//! long algebraic notation (`e2e4`, `e7e8q`). Castling is expressed as the king
//! move (`e1g1`), which is what UCI engines emit and what the rules adapter in
//! [`crate::game::rules`] expects.

use serde::{Deserialize, Serialize};
use shakmaty::uci::UciMove;
use shakmaty::{Color, Role, Square};
use std::fmt;
use std::str::FromStr;

/// A single ply in UCI form
///
/// Equality is structural: two moves are equal when they share origin,
/// destination and promotion piece. Whether a move is legal is decided by the
/// rules adapter, never by this type. Serialized as its UCI text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, role: Role) -> Self {
        Self {
            from,
            to,
            promotion: Some(role),
        }
    }

    /// UCI text for this move, e.g. `e2e4` or `a7a8q`
    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

/// Error returned when text is not a well-formed UCI move
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a UCI move")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts `e2e4` and `a7a8q`; the promotion letter may be upper case.
    /// Drops (`N@f3`) and the null move (`0000`) are not board moves.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || ParseMoveError(text.to_string());

        match UciMove::from_ascii(text.to_ascii_lowercase().as_bytes()) {
            Ok(UciMove::Normal {
                from,
                to,
                promotion,
            }) if !matches!(promotion, Some(Role::Pawn | Role::King)) => Ok(Self {
                from,
                to,
                promotion,
            }),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Move {
    type Error = ParseMoveError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> Self {
        mv.to_uci()
    }
}

/// Engine playing strength expressed as an ELO target
///
/// Always held inside `[Strength::MIN_ELO, Strength::MAX_ELO]`; values read
/// from settings files or the command line are clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Strength {
    elo: u32,
}

impl Strength {
    pub const MIN_ELO: u32 = 800;
    pub const MAX_ELO: u32 = 3000;

    pub fn new(elo: u32) -> Self {
        Self {
            elo: elo.clamp(Self::MIN_ELO, Self::MAX_ELO),
        }
    }

    pub fn elo(self) -> u32 {
        self.elo
    }
}

impl Default for Strength {
    fn default() -> Self {
        Self::new(1500)
    }
}

impl From<u32> for Strength {
    fn from(elo: u32) -> Self {
        Self::new(elo)
    }
}

impl From<Strength> for u32 {
    fn from(strength: Strength) -> Self {
        strength.elo
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ELO", self.elo)
    }
}

/// Parse `white`/`black` (or `w`/`b`) into a color
pub fn parse_color(text: &str) -> Option<Color> {
    match text.trim().to_ascii_lowercase().as_str() {
        "white" | "w" => Some(Color::White),
        "black" | "b" => Some(Color::Black),
        _ => None,
    }
}

/// Lowercase color name used in logs, PGN headers and stats
pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}
