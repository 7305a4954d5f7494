//! Board state: the rules oracle the session controller consults
//!
//! Wraps a [`shakmaty::Chess`] position and adds what the controller needs on
//! top of a bare position: an exact `pop`, the ordered move list, and the
//! repetition / fifty-move checks that shakmaty leaves to the caller.
//!
//! Every move enters through [`BoardState::push`], which looks the move up in
//! the legal-move list, so an illegal move can never reach the underlying
//! position.

use super::outcome::{BoardResult, Termination};
use crate::game::error::{GameError, GameResult};
use crate::game::types::Move;
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Chess, Color, EnPassantMode, File, Move as RawMove, Position, Square};

/// Threefold repetition threshold
const REPETITION_LIMIT: usize = 3;

/// Half-moves without capture or pawn move before the fifty-move draw
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Chess position plus its full history from the initial position
#[derive(Debug, Clone)]
pub struct BoardState {
    position: Chess,
    /// Position before each applied move, parallel to `moves`
    previous: Vec<Chess>,
    moves: Vec<Move>,
    /// Hash of every position reached, starting position included
    hashes: Vec<Zobrist64>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl BoardState {
    /// Standard starting position with no history
    pub fn new_game() -> Self {
        let position = Chess::default();
        let hashes = vec![position_hash(&position)];
        Self {
            position,
            previous: Vec::new(),
            moves: Vec::new(),
            hashes,
        }
    }

    /// Replay `moves` from the starting position
    ///
    /// Fails with [`GameError::IllegalMove`] on the first move that is not
    /// legal where it is played.
    pub fn replay(moves: &[Move]) -> GameResult<Self> {
        let mut board = Self::new_game();
        for mv in moves {
            board.push(*mv)?;
        }
        Ok(board)
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    /// Moves applied since the starting position, oldest first
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Underlying shakmaty position, read-only
    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves().iter().map(to_plain).collect()
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.find_legal(mv).is_some()
    }

    /// Destination squares reachable from `from` for the side to move
    pub fn legal_targets(&self, from: Square) -> Vec<Square> {
        let mut targets: Vec<Square> = self
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.from == from)
            .map(|mv| mv.to)
            .collect();
        targets.sort_unstable();
        targets.dedup();
        targets
    }

    /// Apply a legal move
    pub fn push(&mut self, mv: Move) -> GameResult<()> {
        let raw = self.find_legal(mv).ok_or(GameError::IllegalMove { mv })?;
        let before = self.position.clone();
        self.position.play_unchecked(&raw);
        self.previous.push(before);
        self.moves.push(mv);
        self.hashes.push(position_hash(&self.position));
        Ok(())
    }

    /// Take back the last move, returning it
    pub fn pop(&mut self) -> Option<Move> {
        let before = self.previous.pop()?;
        let mv = self.moves.pop()?;
        self.hashes.pop();
        self.position = before;
        Some(mv)
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn is_terminal(&self) -> bool {
        self.termination().is_some()
    }

    /// Reason the game is over, if it is
    pub fn termination(&self) -> Option<Termination> {
        if self.position.is_checkmate() {
            Some(Termination::Checkmate)
        } else if self.position.is_stalemate() {
            Some(Termination::Stalemate)
        } else if self.position.is_insufficient_material() {
            Some(Termination::InsufficientMaterial)
        } else if self.repetition_count() >= REPETITION_LIMIT {
            Some(Termination::Repetition)
        } else if self.position.halfmoves() >= FIFTY_MOVE_HALFMOVES {
            Some(Termination::FiftyMoves)
        } else {
            None
        }
    }

    /// Board result of a finished game, `None` while play continues
    pub fn result(&self) -> Option<BoardResult> {
        self.termination().map(|termination| match termination {
            Termination::Checkmate => BoardResult::won_by(!self.turn()),
            _ => BoardResult::Draw,
        })
    }

    /// Parse UCI (`g1f3`) or SAN (`Nf3`, `O-O`, `exd5+`) text
    ///
    /// UCI text is returned even when the move is illegal so the caller can
    /// report [`GameError::IllegalMove`]; SAN is resolved against the current
    /// position and therefore always yields a legal move.
    pub fn parse_notation(&self, text: &str) -> GameResult<Move> {
        let trimmed = text.trim();
        if let Ok(mv) = trimmed.parse::<Move>() {
            return Ok(mv);
        }

        let san_text: String = trimmed
            .trim_end_matches(['+', '#', '!', '?'])
            .replace('0', "O");
        san_text
            .parse::<San>()
            .ok()
            .and_then(|san| san.to_move(&self.position).ok())
            .map(|raw| to_plain(&raw))
            .ok_or_else(|| GameError::Notation {
                text: trimmed.to_string(),
            })
    }

    /// Standard algebraic notation for a legal move, with check suffix
    pub fn san(&self, mv: Move) -> Option<String> {
        let raw = self.find_legal(mv)?;
        let mut text = San::from_move(&self.position, &raw).to_string();
        let mut after = self.position.clone();
        after.play_unchecked(&raw);
        if after.is_checkmate() {
            text.push('#');
        } else if after.is_check() {
            text.push('+');
        }
        Some(text)
    }

    /// FEN of the current position
    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    fn find_legal(&self, mv: Move) -> Option<RawMove> {
        self.position
            .legal_moves()
            .into_iter()
            .find(|raw| to_plain(raw) == mv)
    }

    fn repetition_count(&self) -> usize {
        match self.hashes.last() {
            Some(current) => self.hashes.iter().filter(|hash| *hash == current).count(),
            None => 0,
        }
    }
}

fn position_hash(position: &Chess) -> Zobrist64 {
    position.zobrist_hash(EnPassantMode::Legal)
}

/// Convert a shakmaty move into UCI form, castling as the king's two-square move
fn to_plain(raw: &RawMove) -> Move {
    match *raw {
        RawMove::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                File::G
            } else {
                File::C
            };
            Move::new(king, Square::from_coords(file, king.rank()))
        }
        _ => Move {
            from: raw.from().unwrap_or_else(|| raw.to()),
            to: raw.to(),
            promotion: raw.promotion(),
        },
    }
}
