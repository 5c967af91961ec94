//! Console output formatter for pipeline results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use eskai_domain::{
    AgentStatus, AlignmentStatus, ObjectiveOutcome, ResultEnvelope, SystemStatus,
};

/// Formats pipeline results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format any envelope shape
    pub fn format(envelope: &ResultEnvelope) -> String {
        match envelope {
            ResultEnvelope::Chat {
                response,
                processing_time,
                ..
            } => format!(
                "{}\n{}\n",
                response,
                format!("({processing_time:.1}s)").dimmed()
            ),
            ResultEnvelope::Objective(outcome) => Self::format_objective(outcome),
            ResultEnvelope::Error {
                execution_id,
                error,
                processing_time,
                ..
            } => format!(
                "{} {}\n{}\n",
                "Error:".red().bold(),
                error,
                format!("{execution_id} ({processing_time:.1}s)").dimmed()
            ),
        }
    }

    fn format_objective(outcome: &ObjectiveOutcome) -> String {
        let mut output = String::new();
        let result = &outcome.final_result;

        output.push_str(&Self::header("ESKAI Result"));
        output.push('\n');

        output.push_str(&Self::section_header("Objectives"));
        for objective in &outcome.objectives.primary_objectives {
            output.push_str(&format!("  * {}\n", objective));
        }

        output.push_str(&Self::section_header("Result"));
        output.push_str(&format!("\n{}\n", result.synthesized_text));

        let alignment = &result.objective_alignment;
        if !alignment.objectives_assessment.is_empty() {
            output.push_str(&Self::section_header("Objective Alignment"));
            for assessment in &alignment.objectives_assessment {
                let marker = match assessment.status {
                    AlignmentStatus::Addressed => "v".green(),
                    AlignmentStatus::Partial => "~".yellow(),
                };
                output.push_str(&format!(
                    "  {} {} {}\n",
                    marker,
                    assessment.objective,
                    format!("({:.0}%)", assessment.alignment_score * 100.0).dimmed()
                ));
            }
        }

        let failed: Vec<_> = outcome
            .execution_results
            .records
            .iter()
            .filter(|r| !r.is_completed())
            .collect();
        if !failed.is_empty() {
            output.push_str(&Self::section_header("Failed Agents"));
            for record in failed {
                let label = match record.status {
                    AgentStatus::TimedOut => "timed out".yellow(),
                    _ => "failed".red(),
                };
                output.push_str(&format!(
                    "  {} {} {}\n",
                    "x".red(),
                    record.agent_id,
                    label
                ));
                if let Some(error) = &record.error {
                    output.push_str(&Self::indent(error, "      "));
                    output.push('\n');
                }
            }
        }

        let summary = &result.execution_summary;
        output.push_str(&format!(
            "\n{} {}/{} agents ({:.0}%) | {} {:.0}% | {} {:.1}s\n",
            "Agents:".cyan().bold(),
            summary.successful_agents,
            summary.total_agents,
            summary.success_rate * 100.0,
            "Completeness:".cyan().bold(),
            result.completeness_score * 100.0,
            "Time:".cyan().bold(),
            outcome.processing_time
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(envelope: &ResultEnvelope) -> String {
        serde_json::to_string_pretty(envelope).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_status(status: &SystemStatus) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} ({})\n",
            "ESKAI".cyan().bold(),
            status.version,
            status.status
        ));

        output.push_str(&Self::section_header("Backends"));
        for (name, health) in &status.backends {
            if health.available {
                output.push_str(&format!(
                    "  {} {} {}\n",
                    "v".green(),
                    name.bold(),
                    health.model.dimmed()
                ));
            } else {
                output.push_str(&format!(
                    "  {} {} {}: {}\n",
                    "x".red(),
                    name.bold(),
                    health.model.dimmed(),
                    health.error.as_deref().unwrap_or("unavailable")
                ));
            }
        }

        output.push_str(&Self::section_header("Configuration"));
        output.push_str(&format!(
            "  max_concurrent_agents: {}\n  enable_parallel_execution: {}\n  default_timeout: {}s\n",
            status.config.max_concurrent_agents,
            status.config.enable_parallel_execution,
            status.config.default_timeout
        ));

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, envelope: &ResultEnvelope) -> String {
        Self::format(envelope)
    }

    fn format_json(&self, envelope: &ResultEnvelope) -> String {
        Self::format_json(envelope)
    }

    fn format_status(&self, status: &SystemStatus) -> String {
        Self::format_status(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use eskai_domain::{BackendHealth, StatusConfig};

    #[test]
    fn test_format_chat() {
        let out = ConsoleFormatter::format(&ResultEnvelope::chat("eskai_1_0", "Hi there!", 0.4));
        assert!(out.contains("Hi there!"));
        assert!(out.contains("0.4s"));
    }

    #[test]
    fn test_format_error() {
        let out = ConsoleFormatter::format(&ResultEnvelope::error("eskai_1_0", "operation cancelled", 2.0));
        assert!(out.contains("Error:"));
        assert!(out.contains("operation cancelled"));
        assert!(out.contains("eskai_1_0"));
    }

    #[test]
    fn test_format_json_has_type_tag() {
        let json = ConsoleFormatter::format_json(&ResultEnvelope::chat("id", "hello", 0.0));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "chat");
        assert_eq!(value["response"], "hello");
    }

    #[test]
    fn test_format_status() {
        let mut backends = BTreeMap::new();
        backends.insert("openai".to_string(), BackendHealth::healthy("gpt-4"));
        backends.insert(
            "groq".to_string(),
            BackendHealth {
                available: false,
                model: "mixtral-8x7b-32768".to_string(),
                last_test: "failed".to_string(),
                error: Some("HTTP 401".to_string()),
            },
        );
        let status = SystemStatus {
            version: "0.2.0".to_string(),
            status: "operational".to_string(),
            backends,
            config: StatusConfig {
                max_concurrent_agents: 3,
                enable_parallel_execution: false,
                default_timeout: 3600,
            },
        };

        let out = ConsoleFormatter::format_status(&status);
        assert!(out.contains("operational"));
        assert!(out.contains("HTTP 401"));
        assert!(out.contains("default_timeout: 3600s"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
