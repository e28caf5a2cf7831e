//! The breathing session state machine.
//!
//! One engine owns everything a running session schedules: the phase-advance
//! deadline, the duration watchdog, and the progress sampler. The host event
//! loop drives it by calling [`SessionEngine::tick`] with the current time;
//! the engine never reads the clock itself, so tests can run entire sessions
//! in simulated time.
//!
//! Stopping disarms every deadline before any state reset is published, so a
//! late tick can never observe or mutate a stopped session.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::audio::CueEmitter;
use crate::core::SessionDuration;
use crate::session::catalog::{Phase, TechniqueId};
use crate::session::view::SessionView;

/// How often the progress fraction is resampled during a finite session.
pub const PROGRESS_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

/// Session lifecycle state.
///
/// There is no distinct "stopped" state: stopping re-enters `Idle` with all
/// fields reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No session running.
    Idle,
    /// A session is in progress.
    Running,
}

/// What happened during a [`SessionEngine::tick`] call, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The session advanced into a new phase.
    PhaseStarted {
        /// The new phase's instruction label.
        label: &'static str,
    },
    /// The progress sampler published a new fraction.
    ProgressSampled(f64),
    /// The session stopped (watchdog expiry or manual stop via tick).
    Stopped(SessionSummary),
}

/// Recap of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Which technique was practiced.
    pub technique: TechniqueId,
    /// Wall time from start to stop, in whole seconds.
    pub elapsed_secs: u64,
    /// Number of phases entered, including the initial one.
    pub phases_completed: usize,
    /// True when the duration watchdog ended the session.
    pub auto_stopped: bool,
}

/// Deadline-driven state machine for one breathing session.
pub struct SessionEngine {
    technique: TechniqueId,
    duration: SessionDuration,
    sound_enabled: bool,
    cue: Box<dyn CueEmitter>,

    state: SessionState,
    started_at: Option<Instant>,
    phase_index: usize,
    phases_entered: usize,

    // The three scheduled "timers". `None` means disarmed.
    phase_deadline: Option<Instant>,
    watchdog: Option<Instant>,
    next_sample: Option<Instant>,

    view: SessionView,
    last_summary: Option<SessionSummary>,
}

impl SessionEngine {
    /// Create an idle engine with the given settings.
    #[must_use]
    pub fn new(
        technique: TechniqueId,
        duration: SessionDuration,
        sound_enabled: bool,
        cue: Box<dyn CueEmitter>,
    ) -> Self {
        Self {
            technique,
            duration,
            sound_enabled,
            cue,
            state: SessionState::Idle,
            started_at: None,
            phase_index: 0,
            phases_entered: 0,
            phase_deadline: None,
            watchdog: None,
            next_sample: None,
            view: SessionView::idle(duration.is_finite()),
            last_summary: None,
        }
    }

    /// The current observable state.
    #[must_use]
    pub const fn view(&self) -> &SessionView {
        &self.view
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a session is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// The selected technique.
    #[must_use]
    pub const fn technique(&self) -> TechniqueId {
        self.technique
    }

    /// The selected session duration.
    #[must_use]
    pub const fn duration(&self) -> SessionDuration {
        self.duration
    }

    /// Whether the cue tone is enabled.
    #[must_use]
    pub const fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Recap of the most recently finished session, if any.
    #[must_use]
    pub const fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    /// Change the technique. Refused (returns `false`) while running.
    pub fn set_technique(&mut self, technique: TechniqueId) -> bool {
        if self.is_running() {
            return false;
        }
        self.technique = technique;
        true
    }

    /// Change the session duration. Refused (returns `false`) while running.
    pub fn set_duration(&mut self, duration: SessionDuration) -> bool {
        if self.is_running() {
            return false;
        }
        self.duration = duration;
        self.view = SessionView::idle(duration.is_finite());
        true
    }

    /// Toggle the cue tone. Refused (returns `false`) while running.
    pub fn set_sound_enabled(&mut self, enabled: bool) -> bool {
        if self.is_running() {
            return false;
        }
        self.sound_enabled = enabled;
        true
    }

    /// Start a session at `now`.
    ///
    /// A no-op returning `false` if a session is already running. Otherwise
    /// enters phase 0 immediately (publishing its label and visual target and
    /// emitting a cue), arms the phase deadline, and for finite durations
    /// arms the watchdog and the progress sampler.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }

        self.state = SessionState::Running;
        self.started_at = Some(now);
        self.phase_index = 0;
        self.phases_entered = 1;

        let phase = *self.technique.technique().phase_at(0);
        self.publish_phase(&phase);
        self.view.is_running = true;
        self.view.progress = self.duration.is_finite().then_some(0.0);
        self.play_cue();

        self.phase_deadline = Some(now + phase.duration());
        match self.duration {
            SessionDuration::Finite(total) => {
                self.watchdog = Some(now + total);
                self.next_sample = Some(now + PROGRESS_SAMPLE_INTERVAL);
            }
            SessionDuration::Unbounded => {
                self.watchdog = None;
                self.next_sample = None;
            }
        }

        debug!(technique = %self.technique, duration = %self.duration, "session started");
        true
    }

    /// Stop the session at `now`.
    ///
    /// Effective from any state and idempotent: stopping an idle engine is a
    /// safe no-op returning `None`. All scheduled deadlines are disarmed
    /// before the view resets, so no residual tick can fire afterward.
    pub fn stop(&mut self, now: Instant) -> Option<SessionSummary> {
        self.stop_with(now, false)
    }

    /// Advance the engine to `now`, returning the events that occurred.
    ///
    /// Processing order within one tick: progress samples first, then the
    /// duration watchdog, then phase advances. The watchdog wins ties with
    /// the phase deadline so no extra phase fires at session expiry.
    pub fn tick(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if !self.is_running() {
            return events;
        }
        let Some(started_at) = self.started_at else {
            return events;
        };

        // Progress sampler. Disarms itself once 1.0 has been published.
        if let (Some(next), Some(total_secs)) = (self.next_sample, self.duration.seconds()) {
            if now >= next {
                let elapsed = now.saturating_duration_since(started_at);
                #[allow(clippy::cast_precision_loss)]
                let progress = (elapsed.as_secs_f64() / total_secs as f64).min(1.0);
                self.view.progress = Some(progress);
                events.push(SessionEvent::ProgressSampled(progress));
                self.next_sample = if progress >= 1.0 {
                    None
                } else {
                    Some(now + PROGRESS_SAMPLE_INTERVAL)
                };
            }
        }

        // Duration watchdog.
        if let Some(deadline) = self.watchdog {
            if now >= deadline {
                if let Some(summary) = self.stop_with(now, true) {
                    events.push(SessionEvent::Stopped(summary));
                }
                return events;
            }
        }

        // Phase advance, catching up if host ticks arrive late.
        while let Some(deadline) = self.phase_deadline {
            if now < deadline {
                break;
            }
            self.phase_index += 1;
            self.phases_entered += 1;
            let phase = *self.technique.technique().phase_at(self.phase_index);
            self.publish_phase(&phase);
            self.play_cue();
            events.push(SessionEvent::PhaseStarted { label: phase.label });
            // Re-arm from the old deadline, not `now`, to avoid drift.
            self.phase_deadline = Some(deadline + phase.duration());
        }

        events
    }

    fn stop_with(&mut self, now: Instant, auto: bool) -> Option<SessionSummary> {
        // Disarm all scheduled work before any state reset is published.
        self.phase_deadline = None;
        self.watchdog = None;
        self.next_sample = None;

        if !self.is_running() {
            return None;
        }

        let elapsed = self
            .started_at
            .map(|s| now.saturating_duration_since(s))
            .unwrap_or_default();
        let summary = SessionSummary {
            technique: self.technique,
            elapsed_secs: elapsed.as_secs(),
            phases_completed: self.phases_entered,
            auto_stopped: auto,
        };

        self.state = SessionState::Idle;
        self.started_at = None;
        self.phase_index = 0;
        self.phases_entered = 0;
        self.view = SessionView::idle(self.duration.is_finite());
        self.last_summary = Some(summary.clone());

        debug!(
            technique = %self.technique,
            elapsed_secs = summary.elapsed_secs,
            auto,
            "session stopped"
        );
        Some(summary)
    }

    fn publish_phase(&mut self, phase: &Phase) {
        self.view.instruction = phase.label.to_string();
        self.view.visual = phase.visual;
        self.view.transition_secs = phase.seconds;
    }

    fn play_cue(&mut self) {
        if self.sound_enabled {
            self.cue.emit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{MockCueEmitter, SilentCue};
    use crate::session::view::READY_LABEL;

    fn engine(technique: TechniqueId, duration: SessionDuration) -> SessionEngine {
        SessionEngine::new(technique, duration, false, Box::new(SilentCue))
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn labels(events: &[SessionEvent]) -> Vec<&'static str> {
        events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::PhaseStarted { label } => Some(*label),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_start_enters_first_phase_immediately() {
        let mut engine = engine(TechniqueId::Simple, SessionDuration::Unbounded);
        let t0 = Instant::now();

        assert!(engine.start(t0));
        assert!(engine.is_running());
        assert_eq!(engine.view().instruction, "Breathe In");
        assert_eq!(engine.view().visual.scale, 1.0);
        assert_eq!(engine.view().transition_secs, 4);
    }

    #[test]
    fn test_simple_cycle_timing() {
        let mut engine = engine(TechniqueId::Simple, SessionDuration::Unbounded);
        let t0 = Instant::now();
        engine.start(t0);

        // Nothing happens before the first phase ends.
        assert!(engine.tick(t0 + Duration::from_millis(3999)).is_empty());
        assert_eq!(engine.view().instruction, "Breathe In");

        // 4s: Breathe In -> Breathe Out
        let events = engine.tick(t0 + secs(4));
        assert_eq!(labels(&events), ["Breathe Out"]);
        assert_eq!(engine.view().instruction, "Breathe Out");
        assert_eq!(engine.view().transition_secs, 6);

        // 10s: back to Breathe In (cycle length 10s)
        let events = engine.tick(t0 + secs(10));
        assert_eq!(labels(&events), ["Breathe In"]);
        assert_eq!(engine.view().instruction, "Breathe In");
    }

    #[test]
    fn test_box_cycle_repeats_every_16_seconds() {
        let mut engine = engine(TechniqueId::Box, SessionDuration::Unbounded);
        let t0 = Instant::now();
        engine.start(t0);
        assert_eq!(engine.view().instruction, "Breathe In");

        let mut seen = vec![];
        for s in [4u64, 8, 12, 16, 20, 24, 28, 32] {
            let events = engine.tick(t0 + secs(s));
            seen.extend(labels(&events));
        }
        assert_eq!(
            seen,
            [
                "Hold",
                "Breathe Out",
                "Hold",
                "Breathe In",
                "Hold",
                "Breathe Out",
                "Hold",
                "Breathe In"
            ]
        );
    }

    #[test]
    fn test_late_tick_catches_up() {
        let mut engine = engine(TechniqueId::Simple, SessionDuration::Unbounded);
        let t0 = Instant::now();
        engine.start(t0);

        // One late tick covering two deadlines advances through both phases.
        let events = engine.tick(t0 + secs(10));
        assert_eq!(labels(&events), ["Breathe Out", "Breathe In"]);
    }

    #[test]
    fn test_finite_session_auto_stops() {
        let mut engine = engine(
            TechniqueId::Simple,
            SessionDuration::Finite(secs(30)),
        );
        let t0 = Instant::now();
        engine.start(t0);
        assert_eq!(engine.view().progress, Some(0.0));

        // Sample mid-session.
        let events = engine.tick(t0 + secs(15));
        assert!(events.iter().any(
            |e| matches!(e, SessionEvent::ProgressSampled(p) if (*p - 0.5).abs() < 0.01)
        ));

        // At expiry the sampler publishes 1.0, then the watchdog stops the
        // session; the tie with the 30s phase deadline resolves to the
        // watchdog, so no extra phase fires.
        let events = engine.tick(t0 + secs(30));
        assert!(labels(&events).is_empty());
        let mut iter = events.iter();
        assert!(
            matches!(iter.next(), Some(SessionEvent::ProgressSampled(p)) if (*p - 1.0).abs() < f64::EPSILON)
        );
        assert!(matches!(
            iter.next(),
            Some(SessionEvent::Stopped(s)) if s.auto_stopped
        ));

        assert!(!engine.is_running());
        assert_eq!(engine.view().instruction, READY_LABEL);
        assert_eq!(engine.view().progress, Some(0.0));

        // No residual phase ticks after the stop.
        assert!(engine.tick(t0 + secs(60)).is_empty());
        assert_eq!(engine.view().instruction, READY_LABEL);
    }

    #[test]
    fn test_unbounded_session_has_no_progress() {
        let mut engine = engine(TechniqueId::Simple, SessionDuration::Unbounded);
        let t0 = Instant::now();
        engine.start(t0);
        assert_eq!(engine.view().progress, None);

        // Run a long simulated stretch; progress stays not-applicable.
        for s in 1..=120 {
            engine.tick(t0 + secs(s));
            assert_eq!(engine.view().progress, None);
        }
        assert!(engine.is_running());

        // Only a manual stop returns to idle.
        let summary = engine.stop(t0 + secs(121));
        assert!(summary.is_some_and(|s| !s.auto_stopped));
        assert!(!engine.is_running());
    }

    #[test]
    fn test_stop_cancels_all_deadlines() {
        let mut engine = engine(
            TechniqueId::Simple,
            SessionDuration::Finite(secs(30)),
        );
        let t0 = Instant::now();
        engine.start(t0);
        engine.stop(t0 + Duration::from_millis(10));

        assert_eq!(engine.view().instruction, READY_LABEL);

        // Simulate well past the original phase duration and the watchdog:
        // nothing fires, the label never changes.
        for s in [4u64, 10, 30, 60] {
            assert!(engine.tick(t0 + secs(s)).is_empty());
            assert_eq!(engine.view().instruction, READY_LABEL);
        }
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let mut engine = engine(TechniqueId::Simple, SessionDuration::Unbounded);
        let t0 = Instant::now();
        assert!(engine.stop(t0).is_none());
        assert!(engine.stop(t0 + secs(1)).is_none());
        assert_eq!(engine.view().instruction, READY_LABEL);
    }

    #[test]
    fn test_double_start_is_noop() {
        let mut engine = engine(TechniqueId::Simple, SessionDuration::Unbounded);
        let t0 = Instant::now();
        assert!(engine.start(t0));
        assert!(!engine.start(t0 + secs(1)));

        // The phase deadline was not re-armed by the second start: the
        // transition still happens 4s after the first start.
        let events = engine.tick(t0 + secs(4));
        assert_eq!(labels(&events), ["Breathe Out"]);
    }

    #[test]
    fn test_sound_disabled_never_emits() {
        let mut cue = MockCueEmitter::new();
        cue.expect_emit().times(0);
        let mut engine = SessionEngine::new(
            TechniqueId::Simple,
            SessionDuration::Unbounded,
            false,
            Box::new(cue),
        );

        let t0 = Instant::now();
        engine.start(t0);
        // A full cycle and then some.
        for s in 1..=12 {
            engine.tick(t0 + secs(s));
        }
        engine.stop(t0 + secs(12));
    }

    #[test]
    fn test_sound_enabled_emits_once_per_phase() {
        let mut cue = MockCueEmitter::new();
        // Phase 0 at start, then transitions at 4s and 10s.
        cue.expect_emit().times(3).return_const(());
        let mut engine = SessionEngine::new(
            TechniqueId::Simple,
            SessionDuration::Unbounded,
            true,
            Box::new(cue),
        );

        let t0 = Instant::now();
        engine.start(t0);
        engine.tick(t0 + secs(4));
        engine.tick(t0 + secs(10));
        engine.stop(t0 + secs(11));
    }

    #[test]
    fn test_settings_inert_while_running() {
        let mut engine = engine(TechniqueId::Simple, SessionDuration::Unbounded);
        let t0 = Instant::now();
        engine.start(t0);

        assert!(!engine.set_technique(TechniqueId::Box));
        assert!(!engine.set_duration(SessionDuration::Finite(secs(30))));
        assert!(!engine.set_sound_enabled(true));
        assert_eq!(engine.technique(), TechniqueId::Simple);
        assert_eq!(engine.duration(), SessionDuration::Unbounded);
        assert!(!engine.sound_enabled());

        engine.stop(t0 + secs(1));
        assert!(engine.set_technique(TechniqueId::Box));
        assert!(engine.set_duration(SessionDuration::Finite(secs(30))));
        assert!(engine.set_sound_enabled(true));
    }

    #[test]
    fn test_summary_counts_phases() {
        let mut engine = engine(TechniqueId::Simple, SessionDuration::Unbounded);
        let t0 = Instant::now();
        engine.start(t0);
        engine.tick(t0 + secs(4));
        engine.tick(t0 + secs(10));

        let summary = engine.stop(t0 + secs(12));
        let summary = summary.unwrap();
        assert_eq!(summary.technique, TechniqueId::Simple);
        assert_eq!(summary.elapsed_secs, 12);
        assert_eq!(summary.phases_completed, 3);
        assert!(!summary.auto_stopped);
        assert_eq!(engine.last_summary(), Some(&summary));
    }
}
