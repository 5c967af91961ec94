//! Execute Agents use case (stage 5)
//!
//! Runs every agent of an orchestration plan, phase by phase. A failing or
//! slow agent never aborts the run: it ends `failed` or `timed_out` and the
//! next agent starts.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, LazyLock};
use std::time::Instant;

use chrono::Utc;
use eskai_domain::{
    AgentRecord, AgentSpec, ExecutionMode, ExecutionReport, OrchestrationPlan, Phase,
};
use futures::FutureExt;
use regex::Regex;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::ExecutionParams;
use crate::pool::BackendPool;
use crate::ports::backend::{Backend, BackendError, GenerateOptions};
use crate::ports::progress::PipelineProgress;
use crate::tools::ToolTable;

/// Token budget for one agent answer
pub const AGENT_MAX_TOKENS: u32 = 1000;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"')]+"#).expect("url regex is valid"));
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("number regex is valid"));

/// Minimum count of numbers in a task before the analysis tool is consulted
const MIN_SERIES_LEN: usize = 3;

/// Errors that end a single agent
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("{0}")]
    Backend(#[from] BackendError),

    #[error("agent timed out after {0}s")]
    TimedOut(u64),
}

/// Use case for running an orchestration plan
pub struct ExecuteAgentsUseCase {
    pool: Arc<BackendPool>,
    tools: Arc<ToolTable>,
    params: ExecutionParams,
}

impl ExecuteAgentsUseCase {
    pub fn new(pool: Arc<BackendPool>, tools: Arc<ToolTable>, params: ExecutionParams) -> Self {
        Self {
            pool,
            tools,
            params,
        }
    }

    /// Run all agents and report.
    ///
    /// Records come back in execution order. The run is `completed` once
    /// every agent is terminal, whatever the individual outcomes.
    pub async fn execute(
        &self,
        plan: &OrchestrationPlan,
        progress: &dyn PipelineProgress,
    ) -> ExecutionReport {
        let mut report = ExecutionReport::start(Utc::now());
        info!(
            execution_id = %report.execution_id,
            agents = plan.agents.len(),
            "Starting agent execution"
        );

        let mut finished: HashMap<String, AgentRecord> = HashMap::with_capacity(plan.agents.len());
        for phase in &plan.phases {
            let members = phase_members(plan, phase);
            let parallel = self.params.enable_parallel_execution
                && phase.mode == ExecutionMode::Parallel
                && members.len() > 1;

            debug!(phase = %phase.id, members = members.len(), parallel, "Running phase");
            let records = if parallel {
                self.run_parallel(&members, progress).await
            } else {
                self.run_sequential(&members, progress).await
            };
            for record in records {
                finished.insert(record.agent_id.clone(), record);
            }
        }

        // Agents outside every phase still run, after the phases
        let stragglers: Vec<AgentSpec> = plan
            .ordered_agents()
            .filter(|a| !finished.contains_key(&a.id))
            .cloned()
            .collect();
        for record in self.run_sequential(&stragglers, progress).await {
            finished.insert(record.agent_id.clone(), record);
        }

        let records = plan
            .execution_order
            .iter()
            .filter_map(|id| finished.remove(id))
            .collect();
        report.finish(records, Utc::now());

        info!(
            execution_id = %report.execution_id,
            successful = report.metrics.successful_agents,
            total = report.metrics.total_agents,
            duration = report.total_duration,
            "Execution completed"
        );
        report
    }

    async fn run_sequential(
        &self,
        agents: &[AgentSpec],
        progress: &dyn PipelineProgress,
    ) -> Vec<AgentRecord> {
        let mut records = Vec::with_capacity(agents.len());
        for agent in agents {
            progress.on_agent_start(agent);
            let record = match self.backend_for(agent) {
                Some(backend) => {
                    let run = run_agent(backend, Arc::clone(&self.tools), agent.clone());
                    match AssertUnwindSafe(run).catch_unwind().await {
                        Ok(record) => record,
                        Err(_) => {
                            warn!(agent_id = %agent.id, "Agent task panicked");
                            aborted(agent)
                        }
                    }
                }
                None => unavailable(agent),
            };
            progress.on_agent_complete(&record);
            records.push(record);
        }
        records
    }

    async fn run_parallel(
        &self,
        agents: &[AgentSpec],
        progress: &dyn PipelineProgress,
    ) -> Vec<AgentRecord> {
        let semaphore = Arc::new(Semaphore::new(self.params.max_concurrent_agents.max(1)));
        let mut join_set = JoinSet::new();
        let mut records = Vec::with_capacity(agents.len());

        for agent in agents {
            progress.on_agent_start(agent);
            let Some(backend) = self.backend_for(agent) else {
                let record = unavailable(agent);
                progress.on_agent_complete(&record);
                records.push(record);
                continue;
            };
            let semaphore = Arc::clone(&semaphore);
            let tools = Arc::clone(&self.tools);
            let agent = agent.clone();
            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                run_agent(backend, tools, agent).await
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(record) => {
                    progress.on_agent_complete(&record);
                    records.push(record);
                }
                Err(e) => warn!("Task join error: {}", e),
            }
        }

        // A panicked task leaves no record behind
        for agent in agents {
            if !records.iter().any(|r| r.agent_id == agent.id) {
                let record = aborted(agent);
                progress.on_agent_complete(&record);
                records.push(record);
            }
        }
        records
    }

    fn backend_for(&self, agent: &AgentSpec) -> Option<Arc<dyn Backend>> {
        self.pool
            .get(&agent.backend)
            .or_else(|| self.pool.primary().ok())
    }
}

fn phase_members(plan: &OrchestrationPlan, phase: &Phase) -> Vec<AgentSpec> {
    plan.ordered_agents()
        .filter(|a| phase.agents.contains(&a.id))
        .cloned()
        .collect()
}

fn aborted(agent: &AgentSpec) -> AgentRecord {
    let mut record = AgentRecord::pending(&agent.id, &agent.backend);
    record.fail("agent task aborted", std::time::Duration::ZERO);
    record
}

fn unavailable(agent: &AgentSpec) -> AgentRecord {
    let mut record = AgentRecord::pending(&agent.id, &agent.backend);
    record.fail(
        AgentError::Backend(BackendError::NotConfigured(agent.backend.clone())).to_string(),
        std::time::Duration::ZERO,
    );
    record
}

/// Run one agent to a terminal state under its hard timeout.
async fn run_agent(backend: Arc<dyn Backend>, tools: Arc<ToolTable>, agent: AgentSpec) -> AgentRecord {
    let mut record = AgentRecord::pending(&agent.id, backend.name());
    record.start();
    info!(agent_id = %agent.id, backend = backend.name(), "Executing agent");

    let started = Instant::now();
    let limit = agent.timeout();
    let mut attempts = 0u32;
    let mut tools_used = Vec::new();

    let outcome = tokio::time::timeout(
        limit,
        attempt_agent(&*backend, &tools, &agent, &mut attempts, &mut tools_used),
    )
    .await;
    let elapsed = started.elapsed();

    record.attempts = attempts;
    record.tools_used = tools_used;
    match outcome {
        Ok(Ok(output)) => {
            info!(agent_id = %agent.id, duration = elapsed.as_secs_f64(), "Agent completed");
            record.complete(output, elapsed);
        }
        Ok(Err(e)) => {
            warn!(agent_id = %agent.id, error = %e, "Agent failed");
            record.fail(e.to_string(), elapsed);
        }
        Err(_) => {
            warn!(agent_id = %agent.id, timeout_secs = limit.as_secs(), "Agent timed out");
            record.time_out(limit, elapsed);
        }
    }
    record
}

async fn attempt_agent(
    backend: &dyn Backend,
    tools: &ToolTable,
    agent: &AgentSpec,
    attempts: &mut u32,
    tools_used: &mut Vec<String>,
) -> Result<String, AgentError> {
    let prompt = with_tool_context(tools, agent, tools_used).await;
    let options = GenerateOptions::new()
        .with_max_tokens(AGENT_MAX_TOKENS)
        .with_system(agent.system_prompt.clone());
    let policy = agent.retry_policy;

    loop {
        *attempts += 1;
        match backend.generate(&prompt, &options).await {
            Ok(output) => return Ok(output),
            Err(e) if e.is_retryable() && *attempts < policy.max_attempts => {
                debug!(
                    agent_id = %agent.id,
                    attempt = *attempts,
                    error = %e,
                    "Agent attempt failed, retrying"
                );
                tokio::time::sleep(policy.delay()).await;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Enrich the task with tool output the agent is allowed to gather.
///
/// URLs in the task are fetched with `internet/fetch`; a numeric series is
/// summarised with `analysis/describe`. Tool failures are logged and the
/// task proceeds without that context.
async fn with_tool_context(
    tools: &ToolTable,
    agent: &AgentSpec,
    tools_used: &mut Vec<String>,
) -> String {
    let mut prompt = agent.input_prompt.clone();
    let allowed = |name: &str| agent.tools.iter().any(|t| t == name);

    if allowed("internet") {
        let urls: Vec<String> = URL
            .find_iter(&agent.input_prompt)
            .map(|m| m.as_str().to_string())
            .collect();
        for url in urls {
            match tools.invoke("internet", "fetch", &json!({ "url": url.as_str() })).await {
                Ok(value) => {
                    let text = value.get("content").and_then(Value::as_str).unwrap_or_default();
                    prompt.push_str(&format!("\n\nFetched content from {url}:\n{text}"));
                    record_tool(tools_used, "internet");
                }
                Err(e) => warn!(agent_id = %agent.id, url = %url, error = %e, "Fetch failed"),
            }
        }
    }

    if allowed("analysis") {
        let series: Vec<f64> = NUMBER
            .find_iter(&agent.input_prompt)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();
        if series.len() >= MIN_SERIES_LEN {
            match tools
                .invoke("analysis", "describe", &json!({ "data": series }))
                .await
            {
                Ok(summary) => {
                    prompt.push_str(&format!("\n\nStatistics of the figures above: {summary}"));
                    record_tool(tools_used, "analysis");
                }
                Err(e) => warn!(agent_id = %agent.id, error = %e, "Analysis failed"),
            }
        }
    }

    prompt
}

fn record_tool(tools_used: &mut Vec<String>, name: &str) {
    if !tools_used.iter().any(|t| t == name) {
        tools_used.push(name.to_string());
    }
}
