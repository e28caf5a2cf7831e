//! Command implementations for respira.

mod completions;
mod config;
mod start;
mod techniques;

pub use completions::completions;
pub use config::config;
pub use start::start;
pub use techniques::techniques;

use tracing::warn;

use crate::audio::{CueEmitter, SilentCue, ToneCue};
use crate::cli::args::SessionArgs;
use crate::config::Config;
use crate::core::SessionDuration;
use crate::session::TechniqueId;

/// Fully resolved session settings: CLI arguments override the config file,
/// which overrides built-in defaults.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub technique: TechniqueId,
    pub duration: SessionDuration,
    pub sound: bool,
}

impl SessionSettings {
    /// Merge command-line arguments over config-file defaults.
    #[must_use]
    pub fn resolve(args: &SessionArgs, config: &Config) -> Self {
        let sound = if args.no_sound {
            false
        } else if args.sound {
            true
        } else {
            config.session.sound
        };

        Self {
            technique: args.technique.unwrap_or(config.session.technique),
            duration: args
                .duration
                .map_or(config.session.duration, SessionDuration::from),
            sound,
        }
    }
}

/// Build the cue emitter for a session.
///
/// Sound disabled, or no usable output device, yields the silent emitter;
/// audio problems never prevent a session from starting.
#[must_use]
pub fn build_cue(sound: bool, config: &Config) -> Box<dyn CueEmitter> {
    if !sound {
        return Box::new(SilentCue);
    }
    match ToneCue::new(
        config.audio.frequency_hz,
        config.audio.length_ms,
        config.audio.gain,
    ) {
        Ok(cue) => Box::new(cue),
        Err(e) => {
            warn!("audio unavailable, continuing without sound: {e}");
            Box::new(SilentCue)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_cli_args() {
        let mut config = Config::default();
        config.session.technique = TechniqueId::Box;
        config.session.sound = true;

        let args = SessionArgs {
            technique: Some(TechniqueId::FourSevenEight),
            duration: None,
            sound: false,
            no_sound: true,
        };

        let settings = SessionSettings::resolve(&args, &config);
        assert_eq!(settings.technique, TechniqueId::FourSevenEight);
        assert_eq!(settings.duration, config.session.duration);
        assert!(!settings.sound);
    }

    #[test]
    fn test_resolve_falls_back_to_config() {
        let mut config = Config::default();
        config.session.technique = TechniqueId::Box;
        config.session.duration = SessionDuration::Unbounded;
        config.session.sound = false;

        let settings = SessionSettings::resolve(&SessionArgs::default(), &config);
        assert_eq!(settings.technique, TechniqueId::Box);
        assert_eq!(settings.duration, SessionDuration::Unbounded);
        assert!(!settings.sound);
    }

    #[test]
    fn test_build_cue_silent_when_sound_off() {
        // Must not touch any audio device when sound is disabled.
        let cue = build_cue(false, &Config::default());
        drop(cue);
    }
}
