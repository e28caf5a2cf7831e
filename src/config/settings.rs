//! Configuration settings for respira.
//!
//! Settings are loaded from `~/.respira/config.yaml`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::audio::tone;
use crate::config::Paths;
use crate::core::SessionDuration;
use crate::error::RespiraError;
use crate::session::TechniqueId;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default session settings.
    pub session: SessionConfig,
    /// Cue tone settings.
    pub audio: AudioConfig,
}

/// Default session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Technique selected when none is given on the command line.
    #[serde(default = "default_technique")]
    pub technique: TechniqueId,
    /// Session length, e.g. "30s", "2m", or "open".
    #[serde(default = "default_duration")]
    pub duration: SessionDuration,
    /// Play the cue tone at phase transitions.
    #[serde(default = "default_true")]
    pub sound: bool,
}

/// Cue tone settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Tone frequency in Hz.
    #[serde(default = "default_frequency")]
    pub frequency_hz: f64,
    /// Tone length in milliseconds.
    #[serde(default = "default_tone_length")]
    pub length_ms: u64,
    /// Tone gain in `0.0..=1.0`.
    #[serde(default = "default_gain")]
    pub gain: f32,
}

// Default value functions for serde
const fn default_technique() -> TechniqueId {
    TechniqueId::Simple
}

const fn default_duration() -> SessionDuration {
    SessionDuration::Finite(Duration::from_secs(30))
}

const fn default_true() -> bool {
    true
}

const fn default_frequency() -> f64 {
    tone::DEFAULT_FREQUENCY_HZ
}

const fn default_tone_length() -> u64 {
    tone::DEFAULT_LENGTH_MS
}

const fn default_gain() -> f32 {
    tone::DEFAULT_GAIN
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            technique: default_technique(),
            duration: default_duration(),
            sound: default_true(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            frequency_hz: default_frequency(),
            length_ms: default_tone_length(),
            gain: default_gain(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, RespiraError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, RespiraError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            RespiraError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            RespiraError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> Result<(), RespiraError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), RespiraError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| RespiraError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            RespiraError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}
