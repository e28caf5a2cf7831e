//! JSON output formatting for respira.

use serde::Serialize;
use serde_json::json;

use crate::error::RespiraError;
use crate::session::Technique;

/// Format the technique catalog as JSON.
///
/// # Errors
///
/// Returns `RespiraError::Parse` if JSON serialization fails.
pub fn format_techniques_json(techniques: &[&Technique]) -> Result<String, RespiraError> {
    let output = json!({
        "count": techniques.len(),
        "items": techniques
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type.
///
/// # Errors
///
/// Returns `RespiraError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, RespiraError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::all_techniques;

    #[test]
    fn test_format_techniques_json() {
        let techniques = all_techniques();
        let result = format_techniques_json(&techniques).unwrap();

        assert!(result.contains("\"count\": 3"));
        assert!(result.contains("\"name\": \"Box Breathing\""));
        assert!(result.contains("\"label\": \"Breathe In\""));
        assert!(result.contains("\"id\": \"4-7-8\""));
    }

    #[test]
    fn test_to_json_generic() {
        let summary = crate::session::SessionSummary {
            technique: crate::session::TechniqueId::Simple,
            elapsed_secs: 30,
            phases_completed: 4,
            auto_stopped: true,
        };
        let result = to_json(&summary).unwrap();

        assert!(result.contains("\"technique\": \"simple\""));
        assert!(result.contains("\"elapsed_secs\": 30"));
        assert!(result.contains("\"auto_stopped\": true"));
    }
}
