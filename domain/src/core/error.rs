//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while validating pipeline structures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Dependency cycle detected between steps: {}", .0.join(" -> "))]
    DependencyCycle(Vec<String>),

    #[error("Duplicate step id: {0}")]
    DuplicateStepId(String),

    #[error("Step {step} depends on unknown step {dependency}")]
    UnknownDependency { step: String, dependency: String },

    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),
}

impl DomainError {
    /// Check if this error describes an invalid plan graph
    pub fn is_plan_error(&self) -> bool {
        matches!(
            self,
            DomainError::DependencyCycle(_)
                | DomainError::DuplicateStepId(_)
                | DomainError::UnknownDependency { .. }
        )
    }
}

/// Structured output from a backend could not be parsed.
///
/// Callers recover from this by switching to a heuristic extraction,
/// so it never leaves the stage that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No JSON object found in response")]
    NoJson,

    #[error("Malformed JSON: {0}")]
    Malformed(String),

    #[error("Response contained no usable entries")]
    Empty,
}
