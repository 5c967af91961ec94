//! Execution entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::metrics::PerformanceMetrics;

/// Lifecycle of a single agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
    TimedOut,
}

impl AgentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AgentStatus::Completed | AgentStatus::Failed | AgentStatus::TimedOut
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Pending => "pending",
            AgentStatus::Running => "running",
            AgentStatus::Completed => "completed",
            AgentStatus::Failed => "failed",
            AgentStatus::TimedOut => "timed_out",
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub agent_id: String,
    pub status: AgentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock seconds
    pub duration: f64,
    #[serde(default)]
    pub tools_used: Vec<String>,
    pub backend: String,
    pub attempts: u32,
}

impl AgentRecord {
    pub fn pending(agent_id: impl Into<String>, backend: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            status: AgentStatus::Pending,
            output: None,
            error: None,
            duration: 0.0,
            tools_used: Vec::new(),
            backend: backend.into(),
            attempts: 0,
        }
    }

    pub fn start(&mut self) {
        self.status = AgentStatus::Running;
    }

    pub fn complete(&mut self, output: impl Into<String>, duration: Duration) {
        self.status = AgentStatus::Completed;
        self.output = Some(output.into());
        self.error = None;
        self.duration = duration.as_secs_f64();
    }

    pub fn fail(&mut self, error: impl Into<String>, duration: Duration) {
        self.status = AgentStatus::Failed;
        self.error = Some(error.into());
        self.duration = duration.as_secs_f64();
    }

    pub fn time_out(&mut self, limit: Duration, duration: Duration) {
        self.status = AgentStatus::TimedOut;
        self.error = Some(format!("agent timed out after {}s", limit.as_secs()));
        self.duration = duration.as_secs_f64();
    }

    pub fn is_completed(&self) -> bool {
        self.status == AgentStatus::Completed
    }
}

/// Lifecycle of the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Completed,
}

/// Everything the engine reports about a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub execution_id: String,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Wall-clock seconds
    pub total_duration: f64,
    /// One record per agent, in execution order
    pub records: Vec<AgentRecord>,
    pub metrics: PerformanceMetrics,
}

impl ExecutionReport {
    pub fn start(started_at: DateTime<Utc>) -> Self {
        Self {
            execution_id: format!("exec_{}", started_at.timestamp()),
            status: RunStatus::Running,
            started_at,
            finished_at: None,
            total_duration: 0.0,
            records: Vec::new(),
            metrics: PerformanceMetrics::default(),
        }
    }

    /// Close the run. Individual failures do not prevent completion.
    pub fn finish(&mut self, records: Vec<AgentRecord>, finished_at: DateTime<Utc>) {
        self.metrics = PerformanceMetrics::from_records(&records);
        self.records = records;
        self.total_duration = (finished_at - self.started_at)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        self.finished_at = Some(finished_at);
        self.status = RunStatus::Completed;
    }

    pub fn completed_records(&self) -> impl Iterator<Item = &AgentRecord> {
        self.records.iter().filter(|r| r.is_completed())
    }

    pub fn record(&self, agent_id: &str) -> Option<&AgentRecord> {
        self.records.iter().find(|r| r.agent_id == agent_id)
    }
}
