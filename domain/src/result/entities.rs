//! Final result entities

use serde::{Deserialize, Serialize};

use crate::execution::{AgentRecord, ExecutionReport};

/// Whether an objective is covered by the synthesized text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentStatus {
    Addressed,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveAssessment {
    pub objective: String,
    pub alignment_score: f64,
    pub status: AlignmentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveAlignment {
    /// Mean of per-objective scores, 0 without objectives
    pub overall_alignment_score: f64,
    pub objectives_assessment: Vec<ObjectiveAssessment>,
    pub fully_addressed: usize,
    pub total_objectives: usize,
}

/// Output of a completed agent used in the synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportingEvidence {
    pub agent_id: String,
    pub output: String,
    #[serde(default)]
    pub tools_used: Vec<String>,
}

impl SupportingEvidence {
    /// Evidence for a record, if the agent completed with output
    pub fn from_record(record: &AgentRecord) -> Option<Self> {
        if !record.is_completed() {
            return None;
        }
        record.output.as_ref().map(|output| Self {
            agent_id: record.agent_id.clone(),
            output: output.clone(),
            tools_used: record.tools_used.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub total_agents: usize,
    pub successful_agents: usize,
    pub total_duration: f64,
    pub success_rate: f64,
    pub average_agent_duration: f64,
}

impl ExecutionSummary {
    pub fn from_report(report: &ExecutionReport) -> Self {
        Self {
            total_agents: report.metrics.total_agents,
            successful_agents: report.metrics.successful_agents,
            total_duration: report.total_duration,
            success_rate: report.metrics.success_rate,
            average_agent_duration: report.metrics.average_agent_duration,
        }
    }
}

/// The rendered answer for an objective request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalResult {
    #[serde(rename = "final_result")]
    pub synthesized_text: String,
    pub objective_alignment: ObjectiveAlignment,
    /// Always within [0, 1]
    pub completeness_score: f64,
    pub supporting_evidence: Vec<SupportingEvidence>,
    pub execution_summary: ExecutionSummary,
}
