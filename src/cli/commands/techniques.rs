//! Technique catalog listing.

use crate::cli::args::OutputFormat;
use crate::error::RespiraError;
use crate::output::format_techniques;
use crate::session::all_techniques;

/// Execute the techniques command.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn techniques(format: OutputFormat) -> Result<String, RespiraError> {
    format_techniques(&all_techniques(), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_techniques_pretty() {
        let output = techniques(OutputFormat::Pretty).unwrap();
        assert!(output.contains("Simple"));
        assert!(output.contains("Box Breathing"));
        assert!(output.contains("4-7-8"));
    }

    #[test]
    fn test_techniques_json() {
        let output = techniques(OutputFormat::Json).unwrap();
        assert!(output.contains("\"count\": 3"));
    }
}
