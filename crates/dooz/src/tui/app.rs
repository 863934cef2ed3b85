//! Application state and key handling.

use super::input::{digit_position, move_cursor};
use crate::session::Session;
use crossterm::event::KeyCode;
use dooz_tictactoe::{Outcome, Position};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the TUI.
    Quit,
}

/// Main application state.
///
/// Wraps the [`Session`] with the cursor, the status line and the deadline
/// of a pending computer move. While a computer move is pending every board
/// key is ignored, so no human move can land between scheduling and playing.
#[derive(Debug)]
pub struct App {
    session: Session,
    cursor: Position,
    status: String,
    computer_delay: Duration,
    computer_due: Option<Instant>,
}

impl App {
    /// Creates the application and schedules the computer if it opens.
    pub fn new(session: Session, computer_delay: Duration, now: Instant) -> Self {
        let mut app = Self {
            status: session.turn_label(),
            session,
            cursor: Position::Center,
            computer_delay,
            computer_due: None,
        };
        app.schedule_computer(now);
        app
    }

    /// The game session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The highlighted square.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// The status line text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// True while the computer's move is waiting for its delay.
    pub fn is_computer_pending(&self) -> bool {
        self.computer_due.is_some()
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) -> Control {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char('n') => {
                self.session.new_game();
                self.restart(now);
            }
            KeyCode::Char('m') => {
                self.session.toggle_mode();
                self.restart(now);
            }
            KeyCode::Char('r') => {
                self.session.reset_scores();
                self.status = "Scores reset.".to_string();
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor, now),
            KeyCode::Char(c) => {
                if let Some(pos) = digit_position(c) {
                    self.cursor = pos;
                    self.place(pos, now);
                }
            }
            _ => {}
        }
        Control::Continue
    }

    /// Plays the computer's move once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        let Some(due) = self.computer_due else {
            return;
        };
        if now < due {
            return;
        }
        self.computer_due = None;

        match self.session.play_computer() {
            Some((pos, outcome)) => {
                debug!(position = pos.to_index(), "Computer moved");
                self.cursor = pos;
                self.after_move(outcome, now);
            }
            None => {
                warn!("Computer move was due but none was played");
                self.status = self.session.turn_label();
            }
        }
    }

    fn place(&mut self, pos: Position, now: Instant) {
        if self.is_computer_pending() {
            self.status = "Computer is thinking...".to_string();
            return;
        }

        match self.session.play(pos) {
            Ok(outcome) => self.after_move(outcome, now),
            Err(e) => {
                debug!(error = %e, "Move rejected");
                self.status = e.to_string();
            }
        }
    }

    fn after_move(&mut self, outcome: Outcome, now: Instant) {
        if let Some(message) = self.session.result_message() {
            info!(%outcome, "Game over");
            self.status = format!("{} Press 'n' for a new game.", message);
        } else {
            self.status = self.session.turn_label();
            self.schedule_computer(now);
        }
    }

    fn restart(&mut self, now: Instant) {
        self.computer_due = None;
        self.cursor = Position::Center;
        self.status = format!(
            "New game ({}). {}",
            self.session.mode().label(),
            self.session.turn_label()
        );
        self.schedule_computer(now);
    }

    fn schedule_computer(&mut self, now: Instant) {
        if self.session.is_computer_turn() {
            self.computer_due = Some(now + self.computer_delay);
            self.status = "Computer is thinking...".to_string();
        }
    }
}
