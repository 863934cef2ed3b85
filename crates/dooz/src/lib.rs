//! Dooz - terminal tic-tac-toe
//!
//! Everything around the pure game core in [`dooz_tictactoe`]:
//!
//! - **Session**: owns the board, score, mode and move history
//! - **Config**: optional `dooz.toml` with CLI overrides
//! - **TUI**: ratatui front end that forwards key presses to the session and
//!   schedules the computer's replies

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod score;
mod session;
mod settings;
pub mod tui;

pub use config::{ConfigError, DoozConfig};
pub use score::Score;
pub use session::Session;
pub use settings::Mode;
