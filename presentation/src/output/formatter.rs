//! Output formatter trait

use eskai_domain::{ResultEnvelope, SystemStatus};

/// Trait for formatting pipeline results
pub trait OutputFormatter {
    /// Human-readable rendering of any envelope shape
    fn format(&self, envelope: &ResultEnvelope) -> String;

    /// Format as JSON
    fn format_json(&self, envelope: &ResultEnvelope) -> String;

    /// Backend health and static configuration
    fn format_status(&self, status: &SystemStatus) -> String;
}
