//! Terminal User Interface (TUI) for respira.
//!
//! Provides the full-screen breathing interface: a configuration view for
//! picking technique, duration, and sound, and an active-session view with
//! the animated breathing circle. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::cli::commands::{build_cue, SessionSettings};
use crate::config::Config;
use crate::error::RespiraError;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(settings: SessionSettings, config: &Config) -> Result<(), RespiraError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| RespiraError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| RespiraError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| RespiraError::Terminal(format!("Failed to create terminal: {e}")))?;

    // Create app state and run main loop
    let cue = build_cue(settings.sound, config);
    let mut app = App::new(settings, cue);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal on every exit path; the engine (and with it the audio
    // handle) is dropped when `app` goes out of scope.
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), RespiraError> {
    loop {
        // Advance the session before drawing so the view is current.
        app.tick(Instant::now());

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| RespiraError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(app)? {
            match action {
                event::Action::Quit => {
                    app.stop_session();
                    break;
                }
                event::Action::ToggleSession => app.toggle_session(),
                event::Action::NextTechnique => app.next_technique(),
                event::Action::PrevTechnique => app.prev_technique(),
                event::Action::CycleDuration => app.cycle_duration(),
                event::Action::ToggleSound => app.toggle_sound(),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
