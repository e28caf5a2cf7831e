//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};

use crate::error::RespiraError;
use crate::tui::app::App;

/// Action to take after handling an event.
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or stop the session.
    ToggleSession,
    /// Select the next technique.
    NextTechnique,
    /// Select the previous technique.
    PrevTechnique,
    /// Cycle through the duration presets.
    CycleDuration,
    /// Toggle the cue tone.
    ToggleSound,
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed. The poll
/// timeout doubles as the session tick interval.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App) -> Result<Option<Action>, RespiraError> {
    // Poll for events with a small timeout
    if event::poll(Duration::from_millis(50))
        .map_err(|e| RespiraError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| RespiraError::Terminal(format!("Event read failed: {e}")))?
        {
            // Handle Ctrl+C
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(Some(Action::Quit));
            }

            match key.code {
                // Quit; Esc stops a running session first
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Esc => {
                    if app.engine.is_running() {
                        return Ok(Some(Action::ToggleSession));
                    }
                    return Ok(Some(Action::Quit));
                }

                // Start/stop
                KeyCode::Char(' ') | KeyCode::Enter => {
                    return Ok(Some(Action::ToggleSession));
                }

                // Technique selection - vim style
                KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('j') | KeyCode::Down => {
                    return Ok(Some(Action::NextTechnique));
                }
                KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('k') | KeyCode::Up => {
                    return Ok(Some(Action::PrevTechnique));
                }

                // Duration and sound
                KeyCode::Char('d') => return Ok(Some(Action::CycleDuration)),
                KeyCode::Char('s') => return Ok(Some(Action::ToggleSound)),

                // Help
                KeyCode::Char('?') => {
                    app.status = Some(
                        "h/l:technique | d:duration | s:sound | Space:start/stop | q:quit"
                            .to_string(),
                    );
                }

                _ => {}
            }
        }
    }

    Ok(None)
}
