//! Render Result use case (stage 6)

use std::sync::Arc;

use eskai_domain::result::{
    NO_RESULTS_MESSAGE, completeness_score, fallback_synthesis, validate_alignment,
};
use eskai_domain::{ExecutionReport, ExecutionSummary, FinalResult, ObjectiveSet, SupportingEvidence};
use tracing::{debug, info, warn};

use crate::pool::BackendPool;

/// Use case for synthesizing agent outputs into the final answer
pub struct RenderResultUseCase {
    pool: Arc<BackendPool>,
}

impl RenderResultUseCase {
    pub fn new(pool: Arc<BackendPool>) -> Self {
        Self { pool }
    }

    /// Synthesize and score. Never fails.
    pub async fn execute(&self, report: &ExecutionReport, objectives: &ObjectiveSet) -> FinalResult {
        let evidence: Vec<SupportingEvidence> = report
            .completed_records()
            .filter_map(SupportingEvidence::from_record)
            .collect();

        let synthesized_text = if evidence.is_empty() {
            NO_RESULTS_MESSAGE.to_string()
        } else {
            self.synthesize(&evidence, objectives).await
        };

        let objective_alignment =
            validate_alignment(&synthesized_text, &objectives.primary_objectives);
        let completeness = completeness_score(&evidence, objectives.primary_count());

        info!(
            completeness,
            alignment = objective_alignment.overall_alignment_score,
            "Final result rendered"
        );

        FinalResult {
            synthesized_text,
            objective_alignment,
            completeness_score: completeness,
            supporting_evidence: evidence,
            execution_summary: ExecutionSummary::from_report(report),
        }
    }

    /// Backends are tried in priority order; the lexical fallback runs only
    /// when none returns usable text.
    async fn synthesize(&self, evidence: &[SupportingEvidence], objectives: &ObjectiveSet) -> String {
        let outputs: Vec<String> = evidence.iter().map(|e| e.output.clone()).collect();

        for backend in self.pool.ordered() {
            match backend
                .synthesize(&outputs, &objectives.primary_objectives)
                .await
            {
                Ok(text) if !text.trim().is_empty() => {
                    debug!(backend = backend.name(), "Synthesis answered");
                    return text;
                }
                Ok(_) => warn!(backend = backend.name(), "Synthesis returned empty text"),
                Err(e) => warn!(backend = backend.name(), error = %e, "Synthesis failed"),
            }
        }

        warn!("No backend synthesized, using fallback");
        fallback_synthesis(evidence, &objectives.primary_objectives)
    }
}
