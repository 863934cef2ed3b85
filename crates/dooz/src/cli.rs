//! Command-line interface for dooz.

use clap::{Parser, Subcommand};
use dooz::Mode;
use dooz_tictactoe::{Board, Player};
use std::path::PathBuf;

/// Dooz - tic-tac-toe with an opponent that never loses
#[derive(Parser, Debug)]
#[command(name = "dooz")]
#[command(about = "Terminal tic-tac-toe with an optimal computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Path to the TOML config file (defaults are used if it is missing)
        #[arg(short, long, default_value = "dooz.toml")]
        config: PathBuf,

        /// Starting mode, overriding the config file
        #[arg(long, value_enum)]
        mode: Option<Mode>,

        /// Mark the computer plays (X or O)
        #[arg(long)]
        computer: Option<Player>,

        /// Pause before the computer moves, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Log file for the TUI session
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Print the optimal move for a position
    BestMove {
        /// Board in 9-character notation, e.g. "XX_OO____" (`_` or `.` for empty)
        #[arg(short, long)]
        board: Board,

        /// Player to search for (defaults to the side on turn)
        #[arg(short, long)]
        player: Option<Player>,

        /// Emit the full analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play optimal against optimal from the empty board
    SelfPlay {
        /// Emit the game record as JSON
        #[arg(long)]
        json: bool,
    },
}
