//! Run-level performance metrics

use serde::{Deserialize, Serialize};

use super::entities::{AgentRecord, AgentStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_agents: usize,
    pub successful_agents: usize,
    pub failed_agents: usize,
    pub timed_out_agents: usize,
    /// completed / total, 0 for an empty run
    pub success_rate: f64,
    /// Mean seconds per agent, 0 for an empty run
    pub average_agent_duration: f64,
}

impl PerformanceMetrics {
    pub fn from_records(records: &[AgentRecord]) -> Self {
        let total_agents = records.len();
        let count = |status: AgentStatus| records.iter().filter(|r| r.status == status).count();
        let successful_agents = count(AgentStatus::Completed);

        let (success_rate, average_agent_duration) = if total_agents == 0 {
            (0.0, 0.0)
        } else {
            let total_duration: f64 = records.iter().map(|r| r.duration).sum();
            (
                successful_agents as f64 / total_agents as f64,
                total_duration / total_agents as f64,
            )
        };

        Self {
            total_agents,
            successful_agents,
            failed_agents: count(AgentStatus::Failed),
            timed_out_agents: count(AgentStatus::TimedOut),
            success_rate,
            average_agent_duration,
        }
    }
}
