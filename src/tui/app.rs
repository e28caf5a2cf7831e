//! Application state for the TUI.

use std::time::Instant;

use crate::audio::CueEmitter;
use crate::cli::commands::SessionSettings;
use crate::core::{format_duration, SessionDuration};
use crate::session::{SessionEngine, SessionEvent, TechniqueId};

/// Duration presets offered in the configuration view, in cycle order.
pub const DURATION_PRESETS: [SessionDuration; 4] = [
    SessionDuration::Finite(std::time::Duration::from_secs(30)),
    SessionDuration::Finite(std::time::Duration::from_secs(120)),
    SessionDuration::Finite(std::time::Duration::from_secs(300)),
    SessionDuration::Unbounded,
];

/// Application state.
pub struct App {
    /// The breathing session engine.
    pub engine: SessionEngine,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create a new app instance from resolved settings.
    #[must_use]
    pub fn new(settings: SessionSettings, cue: Box<dyn CueEmitter>) -> Self {
        Self {
            engine: SessionEngine::new(
                settings.technique,
                settings.duration,
                settings.sound,
                cue,
            ),
            status: Some("Space to start, ? for help".to_string()),
            should_quit: false,
        }
    }

    /// Advance the session and surface a summary when it finishes.
    pub fn tick(&mut self, now: Instant) {
        for event in self.engine.tick(now) {
            if let SessionEvent::Stopped(summary) = event {
                self.status = Some(format!(
                    "Session complete: {} for {}",
                    summary.technique,
                    format_duration(std::time::Duration::from_secs(summary.elapsed_secs))
                ));
            }
        }
    }

    /// Start the session if idle, stop it if running.
    pub fn toggle_session(&mut self) {
        let now = Instant::now();
        if self.engine.is_running() {
            self.stop_session();
        } else {
            self.engine.start(now);
            self.status = Some("Space to stop".to_string());
        }
    }

    /// Stop the session if one is running. Safe to call when idle.
    pub fn stop_session(&mut self) {
        if let Some(summary) = self.engine.stop(Instant::now()) {
            self.status = Some(format!(
                "Stopped after {}",
                format_duration(std::time::Duration::from_secs(summary.elapsed_secs))
            ));
        }
    }

    /// Select the next technique in the catalog. Inert while running.
    pub fn next_technique(&mut self) {
        self.shift_technique(1);
    }

    /// Select the previous technique in the catalog. Inert while running.
    pub fn prev_technique(&mut self) {
        let len = TechniqueId::all().len();
        self.shift_technique(len - 1);
    }

    fn shift_technique(&mut self, offset: usize) {
        let all = TechniqueId::all();
        let current = all
            .iter()
            .position(|&id| id == self.engine.technique())
            .unwrap_or(0);
        let next = all[(current + offset) % all.len()];
        if !self.engine.set_technique(next) {
            self.refuse_while_running();
        }
    }

    /// Cycle through the duration presets. Inert while running.
    pub fn cycle_duration(&mut self) {
        let current = DURATION_PRESETS
            .iter()
            .position(|&d| d == self.engine.duration())
            .unwrap_or(0);
        let next = DURATION_PRESETS[(current + 1) % DURATION_PRESETS.len()];
        if !self.engine.set_duration(next) {
            self.refuse_while_running();
        }
    }

    /// Toggle the cue tone. Inert while running.
    pub fn toggle_sound(&mut self) {
        let target = !self.engine.sound_enabled();
        if !self.engine.set_sound_enabled(target) {
            self.refuse_while_running();
        }
    }

    fn refuse_while_running(&mut self) {
        self.status = Some("Stop the session to change settings".to_string());
    }
}
