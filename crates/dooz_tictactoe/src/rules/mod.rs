//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Rules are kept apart from board storage so
//! the search can call them on scratch copies without touching game state.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, has_line, winning_line};

use super::{Board, Outcome};

/// Derives the outcome of `board`.
///
/// A completed line wins; otherwise a full board is a draw.
pub fn outcome(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        Outcome::won_by(winner)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_in_progress() {
        let board: Board = "X___O____".parse().unwrap();
        assert_eq!(outcome(&board), Outcome::InProgress);
    }

    #[test]
    fn test_outcome_win_beats_full() {
        // Full board whose last mark completed a line is a win, not a draw.
        let board: Board = "XXXOOXXOO".parse().unwrap();
        assert_eq!(outcome(&board), Outcome::XWins);
    }

    #[test]
    fn test_outcome_draw() {
        let board: Board = "XOXXOOOXX".parse().unwrap();
        assert_eq!(outcome(&board), Outcome::Draw);
    }
}
