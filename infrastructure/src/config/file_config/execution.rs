//! Execution configuration from TOML (`[execution]` section)

use eskai_application::ExecutionParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw execution configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    pub max_concurrent_agents: usize,
    pub enable_parallel_execution: bool,
    /// Whole-run budget
    pub timeout_seconds: u64,
    /// Hard cutoff per agent
    pub agent_timeout_seconds: u64,
    /// Total attempts per agent, including the first
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    /// Liveness probe budget used by `status`
    pub probe_timeout_seconds: u64,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            max_concurrent_agents: 3,
            enable_parallel_execution: false,
            timeout_seconds: 3600,
            agent_timeout_seconds: 1800,
            retry_attempts: 3,
            retry_delay_ms: 1000,
            probe_timeout_seconds: 10,
        }
    }
}

impl FileExecutionConfig {
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_concurrent_agents(self.max_concurrent_agents)
            .with_parallel_execution(self.enable_parallel_execution)
            .with_default_timeout(Duration::from_secs(self.timeout_seconds))
            .with_agent_timeout(Duration::from_secs(self.agent_timeout_seconds.max(1)))
            .with_retry(
                self.retry_attempts.max(1),
                Duration::from_millis(self.retry_delay_ms),
            )
            .with_probe_timeout(Duration::from_secs(self.probe_timeout_seconds.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_execution_params() {
        assert_eq!(
            FileExecutionConfig::default().to_execution_params(),
            ExecutionParams::default()
        );
    }

    #[test]
    fn test_conversion() {
        let config = FileExecutionConfig {
            max_concurrent_agents: 8,
            enable_parallel_execution: true,
            timeout_seconds: 120,
            agent_timeout_seconds: 0,
            retry_attempts: 0,
            retry_delay_ms: 250,
            probe_timeout_seconds: 3,
        };
        let params = config.to_execution_params();
        assert_eq!(params.max_concurrent_agents, 8);
        assert!(params.enable_parallel_execution);
        assert_eq!(params.default_timeout, Duration::from_secs(120));
        assert_eq!(params.agent_timeout, Duration::from_secs(1));
        assert_eq!(params.retry_attempts, 1);
        assert_eq!(params.retry_delay, Duration::from_millis(250));
    }
}
