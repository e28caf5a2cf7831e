//! Pretty (colored, human-readable) output formatting for respira.

use colored::Colorize;

use crate::core::format_duration;
use crate::session::{SessionSummary, Technique};

/// Format the technique catalog for humans.
#[must_use]
pub fn format_techniques_pretty(techniques: &[&Technique]) -> String {
    let mut output = Vec::new();
    output.push("Breathing Techniques".bold().to_string());
    output.push("─".repeat(48));

    for technique in techniques {
        output.push(String::new());
        let cycle = format_duration(technique.cycle_duration());
        output.push(format!(
            "{} {}",
            technique.name.cyan().bold(),
            format!("({cycle} per cycle)").dimmed()
        ));
        output.push(format!("  {}", technique.description));

        let steps = technique
            .phases
            .iter()
            .map(|p| format!("{} {}s", p.label, p.seconds))
            .collect::<Vec<_>>()
            .join(" → ");
        output.push(format!("  {}", steps.dimmed()));
    }

    output.join("\n")
}

/// Format a finished-session summary for humans.
#[must_use]
pub fn format_summary_pretty(summary: &SessionSummary) -> String {
    let technique = summary.technique.technique();
    let elapsed = format_duration(std::time::Duration::from_secs(summary.elapsed_secs));
    let ending = if summary.auto_stopped {
        "completed"
    } else {
        "stopped"
    };

    let mut output = Vec::new();
    output.push(format!("Session {}", ending.green()));
    output.push(format!("  Technique: {}", technique.name));
    output.push(format!("  Time:      {elapsed}"));
    output.push(format!("  Phases:    {}", summary.phases_completed));
    output.join("\n")
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = (progress.clamp(0.0, 1.0) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{all_techniques, TechniqueId};

    #[test]
    fn test_format_techniques_pretty() {
        let result = format_techniques_pretty(&all_techniques());

        assert!(result.contains("Box Breathing"));
        assert!(result.contains("Inhale for 4, hold for 7, exhale for 8."));
        assert!(result.contains("Breathe In 4s"));
    }

    #[test]
    fn test_format_summary_pretty() {
        let summary = SessionSummary {
            technique: TechniqueId::FourSevenEight,
            elapsed_secs: 120,
            phases_completed: 19,
            auto_stopped: true,
        };
        let result = format_summary_pretty(&summary);

        assert!(result.contains("completed"));
        assert!(result.contains("4-7-8"));
        assert!(result.contains("2 minutes"));
        assert!(result.contains("19"));
    }

    #[test]
    fn test_render_progress_bar() {
        let bar = render_progress_bar(0.5, 10);
        assert!(bar.contains("█████"));
        assert!(bar.contains("░░░░░"));

        // Clamped outside 0..1
        assert_eq!(render_progress_bar(2.0, 4), "[████]");
        assert_eq!(render_progress_bar(-1.0, 4), "[░░░░]");
    }
}
