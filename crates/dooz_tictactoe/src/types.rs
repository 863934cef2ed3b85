//! Core domain types for tic-tac-toe.

use super::action::MoveError;
use super::position::Position;
use super::rules;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the mark character for this player.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Player {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(BoardParseError::UnknownPlayer(other.to_string())),
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// Result of a game, always derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Moves remain and nobody has three in a row.
    InProgress,
    /// X completed a line.
    XWins,
    /// O completed a line.
    OWins,
    /// Board is full with no winning line.
    Draw,
}

impl Outcome {
    /// The winning outcome for `player`.
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::X => Outcome::XWins,
            Player::O => Outcome::OWins,
        }
    }

    /// Returns the winner, if the game was won.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::XWins => Some(Player::X),
            Outcome::OWins => Some(Player::O),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    /// True once the game is decided.
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::XWins => write!(f, "X wins"),
            Outcome::OWins => write!(f, "O wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Squares are stored in row-major order, so index `i` is row `i / 3`,
/// column `i % 3`:
///
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
///
/// The player to move and the outcome are computed from the squares and never
/// stored alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares in index order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of marks `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// The player whose ply it is. X moves whenever the mark counts are equal.
    pub fn to_move(&self) -> Player {
        if self.count(Player::X) > self.count(Player::O) {
            Player::O
        } else {
            Player::X
        }
    }

    /// Computes the outcome from the current squares.
    pub fn outcome(&self) -> Outcome {
        rules::outcome(self)
    }

    /// The three positions of the completed line, if any.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        rules::winning_line(self)
    }

    /// Empty positions in ascending index order.
    ///
    /// The order is fixed so that search results are reproducible.
    pub fn legal_moves(&self) -> Vec<Position> {
        Position::valid_moves(self)
    }

    /// Places `player`'s mark at `pos` and returns the resulting outcome.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the board is already terminal
    /// - [`MoveError::SquareOccupied`] if the square holds a mark
    /// - [`MoveError::WrongPlayer`] if it is the other player's ply
    #[instrument(skip(self), fields(board = %self))]
    pub fn apply(&mut self, pos: Position, player: Player) -> Result<Outcome, MoveError> {
        let before = self.outcome();
        if before.is_terminal() {
            return Err(MoveError::GameOver(before));
        }
        if !self.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }
        if player != self.to_move() {
            return Err(MoveError::WrongPlayer(player));
        }

        self.place(pos, player);
        let outcome = self.outcome();
        debug!(%outcome, "Move applied");
        Ok(outcome)
    }

    /// Clears every square.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.squares = [Square::Empty; 9];
    }

    /// Writes a mark without validation. Only the search uses this, on its own
    /// copies of the board.
    pub(crate) fn place(&mut self, pos: Position, player: Player) {
        self.squares[pos.to_index()] = Square::Occupied(player);
    }

    /// Formats the board as a multi-line grid, numbering empty squares 1-9.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (i, square) in self.squares.iter().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push_str("\n---+---+---\n");
            }
            match square {
                Square::Empty => result.push_str(&format!(" {} ", i + 1)),
                Square::Occupied(player) => result.push_str(&format!(" {} ", player)),
            }
            if i % 3 < 2 {
                result.push('|');
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Compact nine-character notation, `_` for empty squares.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for square in &self.squares {
            match square {
                Square::Empty => write!(f, "_")?,
                Square::Occupied(player) => write!(f, "{}", player)?,
            }
        }
        Ok(())
    }
}

/// Parses the nine-character notation. `_`, `.` and `-` mark empty squares;
/// whitespace and `/` row separators are ignored.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if cells.len() != 9 {
            return Err(BoardParseError::Length(cells.len()));
        }

        let mut board = Board::new();
        for (i, c) in cells.into_iter().enumerate() {
            board.squares[i] = match c {
                'X' | 'x' => Square::Occupied(Player::X),
                'O' | 'o' => Square::Occupied(Player::O),
                '_' | '.' | '-' => Square::Empty,
                other => return Err(BoardParseError::Symbol(other)),
            };
        }

        let x = board.count(Player::X);
        let o = board.count(Player::O);
        if x < o || x - o > 1 {
            return Err(BoardParseError::Counts { x, o });
        }

        // The winner must have made the last move.
        match (
            rules::has_line(&board, Player::X),
            rules::has_line(&board, Player::O),
        ) {
            (true, true) => Err(BoardParseError::TwoWinners),
            (true, false) if x != o + 1 => Err(BoardParseError::MovedAfterWin(Player::X)),
            (false, true) if x != o => Err(BoardParseError::MovedAfterWin(Player::O)),
            _ => Ok(board),
        }
    }
}

/// Error parsing a board or player from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// Wrong number of squares.
    #[display("Expected 9 squares, found {}", _0)]
    Length(usize),

    /// Character that is not a mark or an empty marker.
    #[display("Unexpected square symbol {:?}", _0)]
    Symbol(char),

    /// X must have as many marks as O, or exactly one more.
    #[display("Impossible mark counts: {} X and {} O", x, o)]
    Counts {
        /// Number of X marks.
        x: usize,
        /// Number of O marks.
        o: usize,
    },

    /// Both players have a complete line.
    #[display("Impossible board: both X and O have three in a row")]
    TwoWinners,

    /// A line is complete but the mark counts show play continued past it.
    #[display("Impossible board: {} won but the mark counts do not end on its move", _0)]
    MovedAfterWin(Player),

    /// Player name other than X or O.
    #[display("Unknown player {:?}", _0)]
    UnknownPlayer(String),
}

impl std::error::Error for BoardParseError {}
