//! Intent assessment value objects

use serde::{Deserialize, Serialize};

/// Classified intent of a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Chat,
    Objective,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Chat => "chat",
            Intent::Objective => "objective",
        }
    }

    /// Lenient parse used on backend payloads; anything unknown is an objective.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "chat" => Intent::Chat,
            _ => Intent::Objective,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an assessment was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentMethod {
    /// Regex/heuristic scoring of the prompt text
    QuickPattern,
    /// Structured answer from a backend
    Backend,
    /// Keyword scan of an unparsable backend answer
    LexicalFallback,
    /// Vote over all of the above
    Consensus,
}

/// Result of classifying a prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub intent: Intent,
    /// Always within [0, 1]
    pub confidence: f64,
    pub reasoning: String,
    pub method: AssessmentMethod,
    /// Backend name, or "pattern" for the quick phase
    pub source: String,
    /// Votes that fed a consensus decision
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributions: Vec<Assessment>,
}

impl Assessment {
    pub fn new(
        intent: Intent,
        confidence: f64,
        reasoning: impl Into<String>,
        method: AssessmentMethod,
        source: impl Into<String>,
    ) -> Self {
        Self {
            intent,
            confidence: sanitize_confidence(confidence),
            reasoning: reasoning.into(),
            method,
            source: source.into(),
            contributions: Vec::new(),
        }
    }

    pub fn with_contributions(mut self, contributions: Vec<Assessment>) -> Self {
        self.contributions = contributions;
        self
    }

    pub fn is_chat(&self) -> bool {
        self.intent == Intent::Chat
    }
}

/// Clamp into [0, 1]; NaN becomes 0.
pub fn sanitize_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
