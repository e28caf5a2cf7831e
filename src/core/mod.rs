//! Shared core types for respira.

pub mod duration;

pub use duration::{format_duration, format_duration_mmss, parse_duration, SessionDuration};
