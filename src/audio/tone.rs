//! Sine tone playback through the default output device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use tracing::{debug, warn};

use crate::audio::CueEmitter;
use crate::error::RespiraError;

/// Default cue pitch: C5.
pub const DEFAULT_FREQUENCY_HZ: f64 = 523.25;
/// Default cue length.
pub const DEFAULT_LENGTH_MS: u64 = 100;
/// Default cue gain. Kept low so the tone stays unobtrusive.
pub const DEFAULT_GAIN: f32 = 0.2;

/// Plays a short sine burst on the default audio output.
///
/// Owns the output device handle for its lifetime. Each `emit` builds a
/// fresh one-shot stream; dropping the previous stream (or the whole emitter)
/// tears playback down.
pub struct ToneCue {
    device: cpal::Device,
    config: StreamConfig,
    sample_format: SampleFormat,
    frequency_hz: f64,
    length_ms: u64,
    gain: f32,
    // Holds the most recent tone so it keeps playing after emit returns.
    stream: Option<cpal::Stream>,
}

impl ToneCue {
    /// Open the default output device.
    ///
    /// # Errors
    ///
    /// Returns [`RespiraError::Audio`] if there is no output device or its
    /// configuration cannot be read.
    pub fn new(frequency_hz: f64, length_ms: u64, gain: f32) -> Result<Self, RespiraError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| RespiraError::Audio("No default output device available".to_string()))?;
        let default_config = device
            .default_output_config()
            .map_err(|e| RespiraError::Audio(format!("Failed to read output config: {e}")))?;
        let sample_format = default_config.sample_format();
        let config: StreamConfig = default_config.into();

        debug!(
            ?sample_format,
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            "opened audio output for cue playback"
        );

        Ok(Self {
            device,
            config,
            sample_format,
            frequency_hz,
            length_ms,
            gain,
            stream: None,
        })
    }

    /// Open the default output device with the standard cue parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RespiraError::Audio`] if the device cannot be opened.
    pub fn with_defaults() -> Result<Self, RespiraError> {
        Self::new(DEFAULT_FREQUENCY_HZ, DEFAULT_LENGTH_MS, DEFAULT_GAIN)
    }

    fn build_stream(&self) -> Result<cpal::Stream, RespiraError> {
        let sample_rate = f64::from(self.config.sample_rate.0);
        let channels = usize::from(self.config.channels.max(1));
        let total_frames = (sample_rate * self.length_ms as f64 / 1000.0) as u64;
        let step = 2.0 * std::f64::consts::PI * self.frequency_hz / sample_rate;
        let gain = f64::from(self.gain);

        // Frame counter lives in the callback closure; the stream outputs
        // silence once the burst length is reached.
        let mut frame: u64 = 0;
        let mut next_sample = move || -> f32 {
            let value = if frame < total_frames {
                (frame as f64 * step).sin() * gain
            } else {
                0.0
            };
            frame += 1;
            value as f32
        };

        let err_fn = |err| debug!("audio stream error: {err}");

        let stream = match self.sample_format {
            SampleFormat::F32 => self.device.build_output_stream(
                &self.config,
                move |data: &mut [f32], _| {
                    for frame in data.chunks_mut(channels) {
                        let value = next_sample();
                        for sample in frame {
                            *sample = value;
                        }
                    }
                },
                err_fn,
                None,
            ),
            SampleFormat::I16 => self.device.build_output_stream(
                &self.config,
                move |data: &mut [i16], _| {
                    for frame in data.chunks_mut(channels) {
                        let value = (next_sample() * 32_767.0) as i16;
                        for sample in frame {
                            *sample = value;
                        }
                    }
                },
                err_fn,
                None,
            ),
            SampleFormat::U16 => self.device.build_output_stream(
                &self.config,
                move |data: &mut [u16], _| {
                    for frame in data.chunks_mut(channels) {
                        let value = ((next_sample() + 1.0) * 32_767.5) as u16;
                        for sample in frame {
                            *sample = value;
                        }
                    }
                },
                err_fn,
                None,
            ),
            other => {
                return Err(RespiraError::Audio(format!(
                    "Unsupported sample format: {other:?}"
                )))
            }
        };

        stream.map_err(|e| RespiraError::Audio(format!("Failed to build output stream: {e}")))
    }
}

impl CueEmitter for ToneCue {
    fn emit(&mut self) {
        // Replacing the previous stream drops it, which stops any tone still
        // sounding. All failures are logged and swallowed.
        match self.build_stream() {
            Ok(stream) => {
                if let Err(e) = stream.play() {
                    warn!("cue playback failed: {e}");
                    return;
                }
                self.stream = Some(stream);
            }
            Err(e) => warn!("cue unavailable: {e}"),
        }
    }
}
