//! Output formatting for respira.
//!
//! This module provides formatters for displaying catalog and session data
//! in pretty (colored) or JSON form.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::RespiraError;
use crate::session::{SessionSummary, Technique};

pub use json::*;
pub use pretty::*;

/// Format the technique catalog based on output format.
///
/// # Errors
///
/// Returns `RespiraError::Parse` if JSON serialization fails.
pub fn format_techniques(
    techniques: &[&Technique],
    format: OutputFormat,
) -> Result<String, RespiraError> {
    match format {
        OutputFormat::Pretty => Ok(format_techniques_pretty(techniques)),
        OutputFormat::Json => format_techniques_json(techniques),
    }
}

/// Format a finished-session summary based on output format.
///
/// # Errors
///
/// Returns `RespiraError::Parse` if JSON serialization fails.
pub fn format_summary(
    summary: &SessionSummary,
    format: OutputFormat,
) -> Result<String, RespiraError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => to_json(summary),
    }
}
