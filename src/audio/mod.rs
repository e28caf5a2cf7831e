//! Audio cue playback.
//!
//! Phase transitions are marked with a short sine tone. Playback is strictly
//! best-effort: a missing or broken audio device must never interrupt the
//! session, so failures are logged and swallowed.

pub mod tone;

pub use tone::ToneCue;

/// Emits the phase-transition cue.
///
/// `emit` is fire-and-forget: implementations must not panic and have no
/// error to return. The emitter owns its audio handle for its lifetime and
/// releases it on drop.
#[cfg_attr(test, mockall::automock)]
pub trait CueEmitter {
    /// Play one short cue tone.
    fn emit(&mut self);
}

/// Cue emitter that does nothing.
///
/// Used when no audio device is available or sound is disabled up front.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl CueEmitter for SilentCue {
    fn emit(&mut self) {}
}
