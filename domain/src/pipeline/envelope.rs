//! Result envelope returned by the pipeline
//!
//! Exactly one of three shapes, discriminated by a `type` field:
//! `chat`, `objective` or `error`.

use serde::{Deserialize, Serialize};

use crate::execution::ExecutionReport;
use crate::objective::ObjectiveSet;
use crate::plan::WorkPlan;
use crate::result::FinalResult;

/// Reply used when the chat backend call fails
pub const CHAT_FALLBACK_REPLY: &str =
    "Hello! I'm ESKAI, your AI assistant. How can I help you today?";

/// Everything produced by a full objective run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveOutcome {
    pub execution_id: String,
    pub final_result: FinalResult,
    pub objectives: ObjectiveSet,
    pub work_plan: WorkPlan,
    pub execution_results: ExecutionReport,
    /// Seconds
    pub processing_time: f64,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResultEnvelope {
    Chat {
        response: String,
        execution_id: String,
        processing_time: f64,
    },
    Objective(Box<ObjectiveOutcome>),
    Error {
        execution_id: String,
        error: String,
        processing_time: f64,
        success: bool,
    },
}

impl ResultEnvelope {
    pub fn chat(execution_id: impl Into<String>, response: impl Into<String>, processing_time: f64) -> Self {
        ResultEnvelope::Chat {
            response: response.into(),
            execution_id: execution_id.into(),
            processing_time,
        }
    }

    pub fn error(execution_id: impl Into<String>, error: impl Into<String>, processing_time: f64) -> Self {
        ResultEnvelope::Error {
            execution_id: execution_id.into(),
            error: error.into(),
            processing_time,
            success: false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ResultEnvelope::Chat { .. } => "chat",
            ResultEnvelope::Objective(_) => "objective",
            ResultEnvelope::Error { .. } => "error",
        }
    }

    pub fn execution_id(&self) -> &str {
        match self {
            ResultEnvelope::Chat { execution_id, .. } | ResultEnvelope::Error { execution_id, .. } => {
                execution_id
            }
            ResultEnvelope::Objective(outcome) => &outcome.execution_id,
        }
    }

    pub fn processing_time(&self) -> f64 {
        match self {
            ResultEnvelope::Chat { processing_time, .. }
            | ResultEnvelope::Error { processing_time, .. } => *processing_time,
            ResultEnvelope::Objective(outcome) => outcome.processing_time,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultEnvelope::Error { .. })
    }

    pub fn as_objective(&self) -> Option<&ObjectiveOutcome> {
        match self {
            ResultEnvelope::Objective(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ResultEnvelope::Error { error, .. } => Some(error),
            _ => None,
        }
    }
}
