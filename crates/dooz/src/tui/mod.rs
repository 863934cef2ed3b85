//! Terminal UI for dooz.
//!
//! A synchronous crossterm poll loop: draw, wait briefly for a key, let the
//! [`App`] react, and play a due computer move on each pass.

mod app;
mod input;
mod ui;

pub use app::{App, Control};

use crate::config::DoozConfig;
use crate::session::Session;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

/// How long each pass waits for input before checking the computer timer.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the game screen until the user quits.
#[instrument(skip_all)]
pub fn run_tui(config: &DoozConfig) -> Result<()> {
    info!("Starting Dooz TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let session = Session::new(*config.mode(), *config.computer());
    let mut app = App::new(session, config.computer_delay(), Instant::now());
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!(score = %app.session().score(), "Dooz TUI stopped");
    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release on some platforms).
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if app.handle_key(key.code, Instant::now()) == Control::Quit {
                info!("User quit");
                return Ok(());
            }
        }
    }
}
