//! Progress notification port
//!
//! Defines the interface for reporting progress while the pipeline runs.

use eskai_domain::{AgentRecord, AgentSpec, Stage};

/// Callback for progress updates during a pipeline run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain logs, ...).
pub trait PipelineProgress: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: Stage);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: Stage);

    /// Called before an agent's first attempt
    fn on_agent_start(&self, _agent: &AgentSpec) {}

    /// Called once an agent reached a terminal state
    fn on_agent_complete(&self, _record: &AgentRecord) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl PipelineProgress for NoProgress {
    fn on_stage_start(&self, _stage: Stage) {}
    fn on_stage_complete(&self, _stage: Stage) {}
}
