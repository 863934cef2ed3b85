//! The single owner of live game state.

use crate::score::Score;
use crate::settings::Mode;
use derive_getters::Getters;
use dooz_tictactoe::{Board, Move, MoveError, Outcome, Player, Position, search};
use tracing::{debug, error, info, instrument, warn};

/// Board, score, mode and move history for one player seat arrangement.
///
/// Presentation code holds a `Session` and calls [`Session::play`] for human
/// input and [`Session::play_computer`] when [`Session::is_computer_turn`]
/// says so. Both go through the same validated board update.
#[derive(Debug, Clone, Getters)]
pub struct Session {
    board: Board,
    score: Score,
    mode: Mode,
    /// Mark the computer plays in [`Mode::VsComputer`].
    computer: Player,
    history: Vec<Move>,
}

impl Session {
    /// Creates a session with an empty board and zeroed score.
    #[instrument]
    pub fn new(mode: Mode, computer: Player) -> Self {
        info!("Creating new session");
        Self {
            board: Board::new(),
            score: Score::new(),
            mode,
            computer,
            history: Vec::new(),
        }
    }

    /// Outcome of the current game.
    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    /// True when the next ply belongs to the computer.
    pub fn is_computer_turn(&self) -> bool {
        self.mode == Mode::VsComputer
            && !self.outcome().is_terminal()
            && self.board.to_move() == self.computer
    }

    /// Plays a human move for whoever is on turn.
    ///
    /// # Errors
    ///
    /// Any [`MoveError`] from the board, and [`MoveError::WrongPlayer`] when
    /// the computer is on turn.
    #[instrument(skip(self), fields(mode = ?self.mode))]
    pub fn play(&mut self, pos: Position) -> Result<Outcome, MoveError> {
        let player = self.board.to_move();
        if self.is_computer_turn() {
            warn!(%player, "Human move rejected on the computer's turn");
            return Err(MoveError::WrongPlayer(player));
        }
        self.apply(pos, player)
    }

    /// Asks the search for the computer's move and plays it.
    ///
    /// Returns `None` when it is not the computer's turn.
    #[instrument(skip(self))]
    pub fn play_computer(&mut self) -> Option<(Position, Outcome)> {
        if !self.is_computer_turn() {
            debug!("Not the computer's turn");
            return None;
        }

        let pos = search::best_move(&self.board, self.computer)?;
        match self.apply(pos, self.computer) {
            Ok(outcome) => Some((pos, outcome)),
            Err(e) => {
                error!(error = %e, "Search returned a move the board rejected");
                None
            }
        }
    }

    fn apply(&mut self, pos: Position, player: Player) -> Result<Outcome, MoveError> {
        let outcome = self.board.apply(pos, player)?;
        let mv = Move::new(player, pos);
        info!(%mv, %outcome, "Move played");
        self.history.push(mv);

        if outcome.is_terminal() {
            self.score.record(outcome);
            info!(%outcome, score = %self.score, "Game finished");
        }
        Ok(outcome)
    }

    /// Clears the board for a new game. The score is kept.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.board.reset();
        self.history.clear();
    }

    /// Switches mode and starts a new game.
    #[instrument(skip(self), fields(from = ?self.mode))]
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
        info!(mode = ?self.mode, "Mode changed");
        self.new_game();
    }

    /// Zeroes the score.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.score.reset();
    }

    /// Whose turn it is, phrased for the current mode.
    pub fn turn_label(&self) -> String {
        let player = self.board.to_move();
        match self.mode {
            Mode::TwoPlayer => format!("Turn: Player {}", player),
            Mode::VsComputer if player == self.computer => {
                format!("Turn: Computer ({})", player)
            }
            Mode::VsComputer => format!("Turn: You ({})", player),
        }
    }

    /// End-of-game announcement, or `None` while the game is running.
    pub fn result_message(&self) -> Option<String> {
        match self.outcome() {
            Outcome::InProgress => None,
            Outcome::Draw => Some("It's a draw!".to_string()),
            outcome => {
                let winner = outcome.winner()?;
                if self.mode == Mode::VsComputer && winner == self.computer {
                    Some("Computer wins!".to_string())
                } else {
                    Some(format!("Player {} wins!", winner))
                }
            }
        }
    }
}
