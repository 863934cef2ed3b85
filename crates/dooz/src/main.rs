//! Dooz - unified CLI
//!
//! Terminal tic-tac-toe plus two headless commands for inspecting the
//! computer opponent.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use dooz::DoozConfig;
use dooz_tictactoe::{Board, Move, Player, search};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            mode,
            computer,
            delay_ms,
            log_file,
        } => run_play(config, mode, computer, delay_ms, log_file),
        Command::BestMove {
            board,
            player,
            json,
        } => {
            initialize_stderr_tracing();
            run_best_move(board, player, json)
        }
        Command::SelfPlay { json } => {
            initialize_stderr_tracing();
            run_self_play(json)
        }
    }
}

/// Run the terminal UI
fn run_play(
    config_path: PathBuf,
    mode: Option<dooz::Mode>,
    computer: Option<Player>,
    delay_ms: Option<u64>,
    log_file: Option<PathBuf>,
) -> Result<()> {
    let mut config = DoozConfig::load_or_default(&config_path)?;
    if let Some(mode) = mode {
        config = config.with_mode(mode);
    }
    if let Some(computer) = computer {
        config = config.with_computer(computer);
    }
    if let Some(delay_ms) = delay_ms {
        config = config.with_computer_delay_ms(delay_ms);
    }
    if let Some(log_file) = log_file {
        config = config.with_log_file(log_file);
    }

    initialize_file_tracing(config.log_file())?;
    info!(?config, "Configuration resolved");

    dooz::tui::run_tui(&config)
}

/// Print the search result for one position
#[instrument(skip(board), fields(board = %board))]
fn run_best_move(board: Board, player: Option<Player>, json: bool) -> Result<()> {
    let player = player.unwrap_or_else(|| board.to_move());
    let outcome = board.outcome();
    let analysis = search::analyze(&board, player)
        .with_context(|| format!("No move to search: the game is already over ({})", outcome))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("{}\n", board.display());
    println!("Values for {} (+1 win, 0 draw, -1 loss):", player);
    for mv in &analysis.moves {
        let marker = if mv.position == analysis.best { '*' } else { ' ' };
        println!(
            "{} {} {:<13} {:>2}  ({} plies)",
            marker,
            mv.position.to_index(),
            mv.position.label(),
            mv.value.to_string(),
            mv.plies
        );
    }
    println!(
        "\nBest move: {} ({}), {} positions searched",
        analysis.best.to_index(),
        analysis.best.label(),
        analysis.nodes
    );
    Ok(())
}

/// Play optimal against optimal and print the game
#[instrument]
fn run_self_play(json: bool) -> Result<()> {
    let mut board = Board::new();
    let mut moves = Vec::new();

    while !board.outcome().is_terminal() {
        let player = board.to_move();
        let pos = search::best_move(&board, player)
            .context("Search found no move on an unfinished board")?;
        board.apply(pos, player)?;
        moves.push(Move::new(player, pos));
    }
    let outcome = board.outcome();
    info!(%outcome, plies = moves.len(), "Self-play finished");

    if json {
        let record = serde_json::json!({
            "moves": moves,
            "outcome": outcome,
            "board": board.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    for (ply, mv) in moves.iter().enumerate() {
        println!("{:>2}. {}", ply + 1, mv);
    }
    println!("\n{}\n\nResult: {}", board.display(), outcome);
    Ok(())
}

fn initialize_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Log to a file so the TUI screen stays clean.
fn initialize_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,dooz=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
