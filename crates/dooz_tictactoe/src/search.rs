//! Exhaustive minimax search.
//!
//! The full game tree below a 3x3 position is small enough to walk completely
//! (under 550,000 nodes from the empty board), so there is no pruning, no
//! depth limit and no transposition table. Every probe works on a private copy
//! of the board; the caller's board is only ever borrowed immutably.

use super::{Board, Outcome, Player, Position};
use serde::Serialize;
use std::fmt;
use tracing::{debug, error, instrument};

/// Game value from the maximizing player's point of view.
///
/// Only three values exist: [`Value::WIN`], [`Value::DRAW`] and [`Value::LOSS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Value(i8);

impl Value {
    /// The maximizing player wins.
    pub const WIN: Self = Self(1);

    /// Neither player wins.
    pub const DRAW: Self = Self(0);

    /// The maximizing player loses.
    pub const LOSS: Self = Self(-1);

    /// Get the underlying value (-1, 0 or 1).
    pub fn get(self) -> i8 {
        self.0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Value of one root move, as reported by [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveValue {
    /// The candidate move.
    pub position: Position,
    /// Minimax value after playing it.
    pub value: Value,
    /// Plies until the game ends under optimal play, counting this move.
    pub plies: u8,
}

/// Full result of a root search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// The move [`best_move`] returns.
    pub best: Position,
    /// Value of the best move.
    pub value: Value,
    /// Every legal root move in ascending index order.
    pub moves: Vec<MoveValue>,
    /// Number of positions visited, root children included.
    pub nodes: u64,
}

/// Value of a line of optimal play and its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Line {
    value: Value,
    plies: u8,
}

impl Line {
    /// Preference key for the maximizing player.
    ///
    /// Value dominates. Among wins fewer plies rank higher, among losses more
    /// plies rank higher, and all draws rank equal. Max and min over this key
    /// select the same values as plain minimax.
    fn rank(self) -> (Value, i16) {
        let plies = i16::from(self.plies);
        let tempo = match self.value {
            Value::WIN => -plies,
            Value::LOSS => plies,
            _ => 0,
        };
        (self.value, tempo)
    }

    /// The same line seen one ply earlier.
    fn extended(self) -> Self {
        Self {
            value: self.value,
            plies: self.plies + 1,
        }
    }
}

struct Searcher {
    maximizer: Player,
    nodes: u64,
}

impl Searcher {
    fn new(maximizer: Player) -> Self {
        Self {
            maximizer,
            nodes: 0,
        }
    }

    fn terminal_value(&self, outcome: Outcome) -> Value {
        match outcome.winner() {
            Some(winner) if winner == self.maximizer => Value::WIN,
            Some(_) => Value::LOSS,
            None => Value::DRAW,
        }
    }

    /// Value of the line reached by `to_move` playing `pos` on `board`.
    fn probe(&mut self, board: &Board, pos: Position, to_move: Player) -> Line {
        let mut child = board.clone();
        child.place(pos, to_move);
        self.search(&child, to_move.opponent()).extended()
    }

    fn search(&mut self, board: &Board, to_move: Player) -> Line {
        self.nodes += 1;

        let outcome = board.outcome();
        if outcome.is_terminal() {
            return Line {
                value: self.terminal_value(outcome),
                plies: 0,
            };
        }

        let maximizing = to_move == self.maximizer;
        board
            .legal_moves()
            .into_iter()
            .map(|pos| self.probe(board, pos, to_move))
            .reduce(|best, line| {
                let better = if maximizing {
                    line.rank() > best.rank()
                } else {
                    line.rank() < best.rank()
                };
                if better { line } else { best }
            })
            // An in-progress board always has an empty square.
            .unwrap_or(Line {
                value: Value::DRAW,
                plies: 0,
            })
    }
}

/// Minimax value of `board` with `to_move` on turn, scored for `maximizer`.
///
/// Terminal boards score [`Value::WIN`] if `maximizer` has a line,
/// [`Value::LOSS`] if the opponent does and [`Value::DRAW`] otherwise.
/// Otherwise the value is the maximum over children on `maximizer`'s plies
/// and the minimum on the opponent's.
pub fn evaluate(board: &Board, to_move: Player, maximizer: Player) -> Value {
    Searcher::new(maximizer).search(board, to_move).value
}

/// Searches every legal move of `player` and reports all root values.
///
/// Returns `None` when the board is already decided. Calling it there is a
/// caller bug: check [`Board::outcome`] first.
#[instrument(skip(board), fields(board = %board))]
pub fn analyze(board: &Board, player: Player) -> Option<Analysis> {
    let outcome = board.outcome();
    if outcome.is_terminal() {
        error!(%outcome, "Search requested on a finished board");
        return None;
    }

    let mut searcher = Searcher::new(player);
    let mut moves = Vec::new();
    let mut best: Option<(Position, Line)> = None;

    for pos in board.legal_moves() {
        let line = searcher.probe(board, pos, player);
        moves.push(MoveValue {
            position: pos,
            value: line.value,
            plies: line.plies,
        });

        // Strict comparison: the lowest index wins a tie.
        match best {
            Some((_, current)) if line.rank() <= current.rank() => {}
            _ => best = Some((pos, line)),
        }
    }

    let (best, line) = best?;
    debug!(
        best = best.to_index(),
        value = %line.value,
        plies = line.plies,
        nodes = searcher.nodes,
        "Search complete"
    );

    Some(Analysis {
        best,
        value: line.value,
        moves,
        nodes: searcher.nodes,
    })
}

/// Picks the optimal move for `player`.
///
/// Returns `None` when there is no legal move; otherwise always one of
/// [`Board::legal_moves`].
pub fn best_move(board: &Board, player: Player) -> Option<Position> {
    analyze(board, player).map(|analysis| analysis.best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_terminal_values() {
        let x_won = board("XXXOO____");
        assert_eq!(evaluate(&x_won, Player::O, Player::X), Value::WIN);
        assert_eq!(evaluate(&x_won, Player::O, Player::O), Value::LOSS);

        let drawn = board("XOXXOOOXX");
        assert_eq!(evaluate(&drawn, Player::O, Player::X), Value::DRAW);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let empty = Board::new();
        assert_eq!(evaluate(&empty, Player::X, Player::X), Value::DRAW);
        assert_eq!(evaluate(&empty, Player::X, Player::O), Value::DRAW);
    }

    #[test]
    fn test_forced_win_for_side_to_move() {
        // X to move completes the top row.
        let b = board("XX_OO____");
        assert_eq!(evaluate(&b, Player::X, Player::X), Value::WIN);
        assert_eq!(evaluate(&b, Player::X, Player::O), Value::LOSS);
    }

    #[test]
    fn test_line_rank_prefers_quick_wins_and_slow_losses() {
        let quick_win = Line { value: Value::WIN, plies: 1 };
        let slow_win = Line { value: Value::WIN, plies: 3 };
        let quick_loss = Line { value: Value::LOSS, plies: 2 };
        let slow_loss = Line { value: Value::LOSS, plies: 4 };
        let draw = Line { value: Value::DRAW, plies: 9 };

        assert!(quick_win.rank() > slow_win.rank());
        assert!(slow_win.rank() > draw.rank());
        assert!(draw.rank() > slow_loss.rank());
        assert!(slow_loss.rank() > quick_loss.rank());
    }

    #[test]
    fn test_analyze_refuses_finished_board() {
        assert!(analyze(&board("XXXOO____"), Player::O).is_none());
    }

    #[test]
    fn test_analyze_reports_every_legal_move() {
        let b = board("XOXOX____");
        let analysis = analyze(&b, Player::O).unwrap();
        let positions: Vec<_> = analysis.moves.iter().map(|m| m.position).collect();
        assert_eq!(positions, b.legal_moves());
        assert!(analysis.nodes >= positions.len() as u64);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::WIN.to_string(), "+1");
        assert_eq!(Value::DRAW.to_string(), "0");
        assert_eq!(Value::LOSS.to_string(), "-1");
    }
}
