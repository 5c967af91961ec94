//! Process Prompt use case: the full pipeline.
//!
//! Runs the six stages in order under one wall-clock deadline. A `chat`
//! assessment short-circuits to a direct reply. Every outcome, including
//! internal failures and panics, is returned as a [`ResultEnvelope`].

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use eskai_domain::{
    CHAT_FALLBACK_REPLY, DomainError, ExecutionReport, FinalResult, HistoryEntry, ObjectiveOutcome,
    ObjectiveSet, PromptTemplate, ResultEnvelope, Stage, StatusConfig, SystemStatus, WorkPlan,
    build_work_plan,
};
use futures::FutureExt;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::{PipelineConfig, ProcessLimits};
use crate::pool::{BackendPool, PoolError};
use crate::ports::backend::GenerateOptions;
use crate::ports::history::{ExecutionHistory, NoHistory};
use crate::ports::progress::{NoProgress, PipelineProgress};
use crate::ports::tool::ToolError;
use crate::tools::ToolTable;
use crate::use_cases::assess_intent::AssessIntentUseCase;
use crate::use_cases::execute_agents::ExecuteAgentsUseCase;
use crate::use_cases::formulate_objectives::FormulateObjectivesUseCase;
use crate::use_cases::orchestrate_agents::OrchestrateAgentsUseCase;
use crate::use_cases::render_result::RenderResultUseCase;

static EXECUTION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Deadline used when the requested budget overflows the clock
const FAR_FUTURE: std::time::Duration = std::time::Duration::from_secs(86_400 * 365);

/// Errors that abort a pipeline run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("No backend available")]
    NoBackendAvailable,

    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error("Invalid plan: {0}")]
    InvalidPlan(#[from] DomainError),

    #[error("Invalid tool binding: {0}")]
    InvalidTool(#[from] ToolError),

    #[error("pipeline deadline exceeded during {0}")]
    DeadlineExceeded(Stage),

    #[error("operation cancelled")]
    Cancelled,

    #[error("Pipeline failure: {0}")]
    Fatal(String),
}

impl From<PoolError> for PipelineError {
    fn from(e: PoolError) -> Self {
        match e {
            PoolError::NoBackendAvailable => PipelineError::NoBackendAvailable,
        }
    }
}

enum RunOutcome {
    Chat(String),
    Objective {
        objectives: ObjectiveSet,
        work_plan: WorkPlan,
        report: ExecutionReport,
        final_result: FinalResult,
    },
}

/// The six-stage pipeline.
///
/// Built once and shared; concurrent runs only read the pool, the tool
/// table and the configuration.
pub struct Pipeline {
    pool: Arc<BackendPool>,
    config: PipelineConfig,
    history: Arc<dyn ExecutionHistory>,
    assess: AssessIntentUseCase,
    formulate: FormulateObjectivesUseCase,
    orchestrate: OrchestrateAgentsUseCase,
    execute: ExecuteAgentsUseCase,
    render: RenderResultUseCase,
}

impl Pipeline {
    pub fn new(pool: Arc<BackendPool>, tools: Arc<ToolTable>, config: PipelineConfig) -> Self {
        let params = config.execution.clone();
        Self {
            assess: AssessIntentUseCase::new(Arc::clone(&pool)),
            formulate: FormulateObjectivesUseCase::new(Arc::clone(&pool)),
            orchestrate: OrchestrateAgentsUseCase::new(
                Arc::clone(&pool),
                Arc::clone(&tools),
                params.clone(),
            ),
            execute: ExecuteAgentsUseCase::new(Arc::clone(&pool), tools, params),
            render: RenderResultUseCase::new(Arc::clone(&pool)),
            pool,
            config,
            history: Arc::new(NoHistory),
        }
    }

    pub fn with_history(mut self, history: Arc<dyn ExecutionHistory>) -> Self {
        self.history = history;
        self
    }

    pub fn pool(&self) -> &BackendPool {
        &self.pool
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run a prompt with default (no-op) progress
    pub async fn process(&self, prompt: &str, limits: ProcessLimits) -> ResultEnvelope {
        self.process_with_progress(prompt, limits, &NoProgress).await
    }

    /// Run a prompt with progress callbacks. Never fails.
    pub async fn process_with_progress(
        &self,
        prompt: &str,
        limits: ProcessLimits,
        progress: &dyn PipelineProgress,
    ) -> ResultEnvelope {
        let execution_id = next_execution_id();
        let started = std::time::Instant::now();
        info!(execution_id = %execution_id, "Processing prompt");

        let run = AssertUnwindSafe(self.run(prompt, &limits, progress))
            .catch_unwind()
            .await;
        let processing_time = started.elapsed().as_secs_f64();

        let envelope = match run {
            Ok(Ok(RunOutcome::Chat(response))) => {
                ResultEnvelope::chat(&execution_id, response, processing_time)
            }
            Ok(Ok(RunOutcome::Objective {
                objectives,
                work_plan,
                report,
                final_result,
            })) => ResultEnvelope::Objective(Box::new(ObjectiveOutcome {
                execution_id: execution_id.clone(),
                final_result,
                objectives,
                work_plan,
                execution_results: report,
                processing_time,
                success: true,
            })),
            Ok(Err(e)) => {
                error!(execution_id = %execution_id, error = %e, "Pipeline failed");
                ResultEnvelope::error(&execution_id, e.to_string(), processing_time)
            }
            Err(panic) => {
                let e = PipelineError::Fatal(panic_message(&*panic));
                error!(execution_id = %execution_id, error = %e, "Pipeline panicked");
                ResultEnvelope::error(&execution_id, e.to_string(), processing_time)
            }
        };

        info!(
            execution_id = %execution_id,
            kind = envelope.kind(),
            processing_time,
            "Processing finished"
        );
        self.history.record(HistoryEntry {
            execution_id,
            prompt: prompt.to_string(),
            kind: envelope.kind().to_string(),
            success: !envelope.is_error(),
            processing_time,
            recorded_at: Utc::now(),
        });
        envelope
    }

    async fn run(
        &self,
        prompt: &str,
        limits: &ProcessLimits,
        progress: &dyn PipelineProgress,
    ) -> Result<RunOutcome, PipelineError> {
        if prompt.trim().is_empty() {
            return Err(PipelineError::InvalidPrompt("prompt is empty".to_string()));
        }

        let budget = limits
            .max_execution_time
            .unwrap_or(self.config.execution.default_timeout);
        let now = Instant::now();
        let deadline = now
            .checked_add(budget)
            .unwrap_or_else(|| now + FAR_FUTURE);
        let cancel = limits.cancellation.clone().unwrap_or_default();
        let limits = ProcessLimits {
            enable_internet: limits.enable_internet && self.config.enable_internet,
            enable_code_execution: limits.enable_code_execution
                && self.config.enable_code_execution,
            ..limits.clone()
        };
        let ctx = StageContext {
            deadline,
            cancel: &cancel,
            progress,
        };

        let assessment = ctx
            .run(
                Stage::Assessment,
                self.assess.execute(prompt, limits.context.as_deref()),
            )
            .await?;

        if assessment.is_chat() {
            debug!(confidence = assessment.confidence, "Chat intent, replying directly");
            let reply = ctx.run(Stage::Rendering, self.chat_reply(prompt)).await?;
            return Ok(RunOutcome::Chat(reply));
        }

        let objectives = ctx
            .run(Stage::Objectives, self.formulate.execute(prompt))
            .await?;
        let work_plan = ctx
            .run(Stage::WorkPlan, async { build_work_plan(&objectives) })
            .await?;
        let orchestration = ctx
            .run(Stage::Orchestration, async {
                self.orchestrate.execute(&work_plan, &limits)
            })
            .await??;
        let report = ctx
            .run(
                Stage::Execution,
                self.execute.execute(&orchestration, progress),
            )
            .await?;
        let final_result = ctx
            .run(Stage::Rendering, self.render.execute(&report, &objectives))
            .await?;

        Ok(RunOutcome::Objective {
            objectives,
            work_plan,
            report,
            final_result,
        })
    }

    /// First backend in priority order that answers; fixed text when none does
    async fn chat_reply(&self, prompt: &str) -> String {
        match self
            .pool
            .generate_with_failover(&PromptTemplate::chat_reply(prompt), &GenerateOptions::new())
            .await
        {
            Ok((_, reply)) if !reply.trim().is_empty() => reply,
            Ok((backend, _)) => {
                warn!(backend = %backend, "Chat reply was empty");
                CHAT_FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Chat reply failed on every backend");
                CHAT_FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Backend health and static configuration; no side effects
    pub async fn status(&self) -> SystemStatus {
        let execution = &self.config.execution;
        SystemStatus {
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "operational".to_string(),
            backends: self.pool.status(execution.probe_timeout).await,
            config: StatusConfig {
                max_concurrent_agents: execution.max_concurrent_agents,
                enable_parallel_execution: execution.enable_parallel_execution,
                default_timeout: execution.default_timeout.as_secs(),
            },
        }
    }

    /// Past runs, most recent first
    pub fn execution_history(&self, limit: usize) -> Vec<HistoryEntry> {
        self.history.recent(limit)
    }
}

/// Deadline, cancellation and progress shared by every stage of a run
struct StageContext<'a> {
    deadline: Instant,
    cancel: &'a CancellationToken,
    progress: &'a dyn PipelineProgress,
}

impl StageContext<'_> {
    async fn run<T>(&self, stage: Stage, work: impl Future<Output = T>) -> Result<T, PipelineError> {
        if self.cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        self.progress.on_stage_start(stage);
        debug!(stage = %stage, "Stage started");

        let outcome = tokio::select! {
            _ = self.cancel.cancelled() => None,
            result = tokio::time::timeout_at(self.deadline, work) => Some(result),
        };

        match outcome {
            None => Err(PipelineError::Cancelled),
            Some(Err(_)) => Err(PipelineError::DeadlineExceeded(stage)),
            Some(Ok(value)) => {
                self.progress.on_stage_complete(stage);
                Ok(value)
            }
        }
    }
}

/// `eskai_<unix millis>_<counter>`, unique within the process
fn next_execution_id() -> String {
    let counter = EXECUTION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("eskai_{}_{}", Utc::now().timestamp_millis(), counter)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("internal panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("internal panic: {s}")
    } else {
        "internal panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_ids_unique() {
        let a = next_execution_id();
        let b = next_execution_id();
        assert_ne!(a, b);
        assert!(a.starts_with("eskai_"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PipelineError::DeadlineExceeded(Stage::Execution).to_string(),
            "pipeline deadline exceeded during execution"
        );
        assert_eq!(PipelineError::Cancelled.to_string(), "operation cancelled");
        assert_eq!(
            PipelineError::from(PoolError::NoBackendAvailable),
            PipelineError::NoBackendAvailable
        );
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(&*payload), "internal panic: boom");
    }
}
