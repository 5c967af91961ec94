//! Objective entities

use serde::{Deserialize, Serialize};

/// An expected outcome, either free text or a structured record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpectedOutcome {
    Record {
        outcome: String,
        measurable_criteria: String,
        timeline: String,
    },
    Text(String),
}

impl ExpectedOutcome {
    /// Text used for display and deduplication
    pub fn text(&self) -> &str {
        match self {
            ExpectedOutcome::Record { outcome, .. } => outcome,
            ExpectedOutcome::Text(text) => text,
        }
    }
}

/// Objectives extracted by a single backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveCandidate {
    pub source: String,
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub expected_outcomes: Vec<ExpectedOutcome>,
    pub constraints: Vec<String>,
}

impl ObjectiveCandidate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
            && self.secondary.is_empty()
            && self.expected_outcomes.is_empty()
            && self.constraints.is_empty()
    }
}

/// The structured objective set for one request.
///
/// Built once by the formulator, read-only for the rest of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveSet {
    pub primary_objectives: Vec<String>,
    pub secondary_objectives: Vec<String>,
    pub expected_outcomes: Vec<ExpectedOutcome>,
    pub constraints: Vec<String>,
    pub success_criteria: Vec<String>,
}

impl ObjectiveSet {
    pub fn primary_count(&self) -> usize {
        self.primary_objectives.len()
    }
}
