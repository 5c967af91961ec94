//! Domain layer for eskai
//!
//! This crate contains the data model and the pure algorithms of the
//! six-stage pipeline. It performs no I/O; backends, tools and
//! configuration are reached through ports defined in the application layer.
//!
//! # Stages
//!
//! 1. **Assessment** ([`intent`], [`quorum`]): pattern scoring, then a
//!    majority vote over backend classifications
//! 2. **Objectives** ([`objective`]): parse, pool, deduplicate, guard, enhance
//! 3. **Work plan** ([`plan`]): one step per primary objective
//! 4. **Orchestration** ([`orchestration`]): steps to agents, topological order
//! 5. **Execution** ([`execution`]): per-agent records and run metrics
//! 6. **Rendering** ([`result`]): alignment and completeness scoring
//!
//! A `chat` assessment short-circuits stages 2 to 6.

pub mod backend;
pub mod core;
pub mod execution;
pub mod intent;
pub mod objective;
pub mod orchestration;
pub mod pipeline;
pub mod plan;
pub mod prompt;
pub mod quorum;
pub mod result;

// Re-export commonly used types
pub use backend::{BackendHealth, BackendProfile, Capability};
pub use core::error::{DomainError, ParseError};
pub use execution::{AgentRecord, AgentStatus, ExecutionReport, PerformanceMetrics, RunStatus};
pub use intent::{Assessment, AssessmentMethod, Intent, quick_pattern_assessment};
pub use objective::{ExpectedOutcome, ObjectiveCandidate, ObjectiveSet, formulate_objectives};
pub use orchestration::{
    AgentSpec, ExecutionMode, OrchestrationPlan, OrchestrationSettings, OutputFormat, Phase,
    ResourceLimits, RetryPolicy, build_orchestration_plan,
};
pub use pipeline::{
    CHAT_FALLBACK_REPLY, HistoryEntry, ObjectiveOutcome, ResultEnvelope, Stage, StatusConfig,
    SystemStatus,
};
pub use plan::{Step, StepType, WorkPlan, build_work_plan};
pub use prompt::PromptTemplate;
pub use quorum::{assess_backend_response, consensus_decision};
pub use result::{
    AlignmentStatus, ExecutionSummary, FinalResult, ObjectiveAlignment, SupportingEvidence,
};
