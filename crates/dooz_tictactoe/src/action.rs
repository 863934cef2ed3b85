//! Move records and move errors.

use super::{Board, Outcome, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move in tic-tac-toe: a player placing their mark at a position.
///
/// Moves are recorded by the session so that a finished game can be logged,
/// serialized and replayed onto a fresh board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Applies `moves` in order to `board`, stopping at the first rejected move.
///
/// Returns the outcome after the last move, or the board's current outcome
/// when `moves` is empty.
#[instrument(skip(board, moves), fields(moves = moves.len()))]
pub fn replay(board: &mut Board, moves: &[Move]) -> Result<Outcome, MoveError> {
    let mut outcome = board.outcome();
    for mv in moves {
        outcome = board.apply(mv.position, mv.player)?;
    }
    Ok(outcome)
}

/// An invalid move. Every variant is recoverable: the caller keeps the board
/// as it was and asks for another move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Invalid move: {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game has already been decided.
    #[display("Invalid move: game is already over ({})", _0)]
    GameOver(Outcome),

    /// It's not this player's turn.
    #[display("Invalid move: it's not {}'s turn", _0)]
    WrongPlayer(Player),
}

impl std::error::Error for MoveError {}
