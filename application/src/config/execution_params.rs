//! Execution parameters: pipeline run control.
//!
//! [`ExecutionParams`] groups the static parameters that control agent
//! execution and the overall run deadline. These are application-layer
//! concerns, loaded once from configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use eskai_domain::RetryPolicy;

/// Execution control parameters.
///
/// | Field | Used by |
/// |-------|---------|
/// | `max_concurrent_agents` | parallel phases, status |
/// | `enable_parallel_execution` | orchestrator phase modes, engine |
/// | `default_timeout` | pipeline deadline when the caller gives none |
/// | `agent_timeout` | hard per-agent cutoff |
/// | `retry_attempts`, `retry_delay` | per-agent retry policy |
/// | `probe_timeout` | backend liveness probes in `status` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    pub max_concurrent_agents: usize,
    pub enable_parallel_execution: bool,
    pub default_timeout: Duration,
    pub agent_timeout: Duration,
    /// Total attempts per agent, including the first
    pub retry_attempts: u32,
    pub retry_delay: Duration,
    pub probe_timeout: Duration,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_concurrent_agents: 3,
            enable_parallel_execution: false,
            default_timeout: Duration::from_secs(3600),
            agent_timeout: Duration::from_secs(1800),
            retry_attempts: 3,
            retry_delay: Duration::from_millis(1000),
            probe_timeout: Duration::from_secs(10),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_concurrent_agents(mut self, max: usize) -> Self {
        self.max_concurrent_agents = max.max(1);
        self
    }

    pub fn with_parallel_execution(mut self, enabled: bool) -> Self {
        self.enable_parallel_execution = enabled;
        self
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay = delay;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_attempts, self.retry_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ExecutionParams::default();
        assert_eq!(params.max_concurrent_agents, 3);
        assert!(!params.enable_parallel_execution);
        assert_eq!(params.default_timeout, Duration::from_secs(3600));
        assert_eq!(params.agent_timeout, Duration::from_secs(1800));
        assert_eq!(params.retry_policy().max_attempts, 3);
    }

    #[test]
    fn test_builder_methods() {
        let params = ExecutionParams::default()
            .with_max_concurrent_agents(0)
            .with_parallel_execution(true)
            .with_retry(1, Duration::ZERO);
        assert_eq!(params.max_concurrent_agents, 1);
        assert!(params.enable_parallel_execution);
        assert_eq!(params.retry_policy(), RetryPolicy::none());
    }
}
