//! Dooz tic-tac-toe core.
//!
//! Pure game logic with no UI or I/O:
//!
//! - **Board model**: [`Board`] holds nine [`Square`]s; the player to move and
//!   the [`Outcome`] are always derived from them. [`Board::apply`] is the one
//!   way a live game changes.
//! - **Rules**: [`rules`] checks the eight winning lines and full boards.
//! - **Search**: [`search::best_move`] walks the whole game tree with minimax
//!   and never loses.
//!
//! # Example
//!
//! ```
//! use dooz_tictactoe::{Board, Outcome, Player, Position, search};
//!
//! let mut board = Board::new();
//! board.apply(Position::Center, Player::X).unwrap();
//!
//! let reply = search::best_move(&board, Player::O).unwrap();
//! assert_eq!(board.apply(reply, Player::O), Ok(Outcome::InProgress));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod position;
pub mod rules;
pub mod search;
mod types;

pub use action::{Move, MoveError, replay};
pub use position::Position;
pub use search::{Analysis, MoveValue, Value};
pub use types::{Board, BoardParseError, Outcome, Player, Square};
