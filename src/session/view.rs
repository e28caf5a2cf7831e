//! The observable session state.
//!
//! Every mutation the engine makes funnels through this model; the CLI and
//! TUI render it and nothing else.

use serde::Serialize;

use crate::session::catalog::VisualTarget;

/// Neutral instruction shown while no session is running.
pub const READY_LABEL: &str = "Ready to begin";

/// The single piece of state the presentation layer binds to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    /// Current phase label, or [`READY_LABEL`] when idle.
    pub instruction: String,
    /// Where the breathing circle is animating to.
    pub visual: VisualTarget,
    /// Seconds the current visual transition takes.
    pub transition_secs: u64,
    /// Fraction of a finite session elapsed, in `0.0..=1.0`.
    /// `None` when the session duration is unbounded.
    pub progress: Option<f64>,
    /// Whether a session is running. Drives which view variant is shown.
    pub is_running: bool,
}

impl SessionView {
    /// The idle view for a given duration setting.
    #[must_use]
    pub fn idle(finite_duration: bool) -> Self {
        Self {
            instruction: READY_LABEL.to_string(),
            visual: VisualTarget::INACTIVE,
            transition_secs: 4,
            progress: finite_duration.then_some(0.0),
            is_running: false,
        }
    }
}
