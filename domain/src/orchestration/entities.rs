//! Orchestration entities

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::topology::DependencyNode;

/// How a failed backend call is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay_ms: delay.as_millis() as u64,
        }
    }

    /// A single attempt, no retries
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}

/// Expected shape of an agent's output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How members of a phase are run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
        }
    }
}

/// Executable binding of one plan step to a backend and policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Always `agent_<step id>`
    pub id: String,
    pub name: String,
    pub step_id: String,
    pub system_prompt: String,
    pub input_prompt: String,
    /// Backend name in the pool
    pub backend: String,
    pub tools: Vec<String>,
    /// Agent ids this agent waits for
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub timeout_secs: u64,
    pub retry_policy: RetryPolicy,
    pub output_format: OutputFormat,
}

impl AgentSpec {
    /// Deterministic agent id for a step
    pub fn id_for_step(step_id: &str) -> String {
        format!("agent_{step_id}")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DependencyNode for AgentSpec {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn node_dependencies(&self) -> &[String] {
        &self.dependencies
    }
}

/// A group of agents run together, after the phases it depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub id: String,
    pub agents: Vec<String>,
    pub mode: ExecutionMode,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Resource limits applied to the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    pub max_concurrent_agents: usize,
    pub parallel_execution: bool,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_concurrent_agents: 3,
            parallel_execution: false,
        }
    }
}

/// Output of the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationPlan {
    pub agents: Vec<AgentSpec>,
    /// Dependency-respecting agent order
    pub execution_order: Vec<String>,
    pub phases: Vec<Phase>,
    pub resource_limits: ResourceLimits,
}

impl OrchestrationPlan {
    pub fn agent(&self, id: &str) -> Option<&AgentSpec> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Agents in execution order
    pub fn ordered_agents(&self) -> impl Iterator<Item = &AgentSpec> {
        self.execution_order.iter().filter_map(|id| self.agent(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_never_zero_attempts() {
        let policy = RetryPolicy::new(0, Duration::from_millis(5));
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.delay(), Duration::from_millis(5));
    }

    #[test]
    fn test_agent_id_is_pure() {
        assert_eq!(AgentSpec::id_for_step("step_3"), "agent_step_3");
        assert_eq!(
            AgentSpec::id_for_step("step_3"),
            AgentSpec::id_for_step("step_3")
        );
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(ExecutionMode::Parallel).unwrap(),
            "parallel"
        );
    }
}
