//! Session duration handling.
//!
//! Provides the finite/unbounded session length setting and duration
//! parsing/formatting.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long a breathing session runs.
///
/// A session is either bounded by a fixed length, after which it stops
/// automatically, or open-ended and runs until manually stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SessionDuration {
    /// Stop automatically after this long.
    Finite(Duration),
    /// Run until manually stopped.
    Unbounded,
}

impl SessionDuration {
    /// Seconds for a finite duration, `None` when unbounded.
    #[must_use]
    pub const fn seconds(&self) -> Option<u64> {
        match self {
            Self::Finite(d) => Some(d.as_secs()),
            Self::Unbounded => None,
        }
    }

    /// Whether this duration stops the session on its own.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }
}

impl fmt::Display for SessionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(d) => write!(f, "{}", format_duration(*d)),
            Self::Unbounded => write!(f, "until stopped"),
        }
    }
}

impl TryFrom<String> for SessionDuration {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        parse_session_duration(&s).ok_or_else(|| format!("Invalid session duration: {s}"))
    }
}

impl From<SessionDuration> for String {
    fn from(d: SessionDuration) -> Self {
        match d {
            SessionDuration::Finite(dur) => {
                let secs = dur.as_secs();
                if secs % 60 == 0 {
                    format!("{}m", secs / 60)
                } else {
                    format!("{secs}s")
                }
            }
            SessionDuration::Unbounded => "open".to_string(),
        }
    }
}

/// Parse a session duration string like "30s", "2m", "1h30m", or "open".
#[must_use]
pub fn parse_session_duration(s: &str) -> Option<SessionDuration> {
    match s.trim().to_lowercase().as_str() {
        "open" | "unbounded" | "until-stopped" | "forever" => Some(SessionDuration::Unbounded),
        other => parse_duration(other).map(SessionDuration::Finite),
    }
}

/// Parse a duration string like "30s", "2m", "1h30m".
///
/// Bare numbers are treated as seconds; breathing sessions are short.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Ok(seconds) = s.parse::<u64>() {
        if seconds == 0 {
            return None;
        }
        return Some(Duration::from_secs(seconds));
    }

    let mut total_seconds: u64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if !current_num.is_empty() {
            let num: u64 = current_num.parse().ok()?;
            current_num.clear();

            match c {
                'h' => total_seconds += num * 3600,
                'm' => total_seconds += num * 60,
                's' => total_seconds += num,
                _ => return None,
            }
        } else {
            return None;
        }
    }

    // Trailing number without a unit: seconds
    if !current_num.is_empty() {
        let num: u64 = current_num.parse().ok()?;
        total_seconds += num;
    }

    if total_seconds > 0 {
        Some(Duration::from_secs(total_seconds))
    } else {
        None
    }
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_seconds = d.as_secs();

    if total_seconds < 60 {
        return format!(
            "{} second{}",
            total_seconds,
            if total_seconds == 1 { "" } else { "s" }
        );
    }

    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;

    if seconds > 0 {
        format!(
            "{} minute{}, {} second{}",
            minutes,
            if minutes == 1 { "" } else { "s" },
            seconds,
            if seconds == 1 { "" } else { "s" }
        )
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}

/// Format a duration as MM:SS.
#[must_use]
pub fn format_duration_mmss(d: Duration) -> String {
    let total_seconds = d.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}
