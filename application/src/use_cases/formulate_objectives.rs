//! Formulate Objectives use case (stage 2)

use std::sync::Arc;

use eskai_domain::objective::parse_candidate;
use eskai_domain::{Capability, ObjectiveCandidate, ObjectiveSet, formulate_objectives};
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::pool::BackendPool;

/// Use case for turning a prompt into a structured objective set
pub struct FormulateObjectivesUseCase {
    pool: Arc<BackendPool>,
}

impl FormulateObjectivesUseCase {
    pub fn new(pool: Arc<BackendPool>) -> Self {
        Self { pool }
    }

    /// Extract with every backend, then pool and deduplicate.
    ///
    /// Never fails: the result always holds at least one primary objective.
    pub async fn execute(&self, prompt: &str) -> ObjectiveSet {
        let candidates = self.collect_candidates(prompt).await;
        let objectives = formulate_objectives(&candidates, prompt);
        info!(
            candidates = candidates.len(),
            primary = objectives.primary_objectives.len(),
            secondary = objectives.secondary_objectives.len(),
            "Objectives formulated"
        );
        objectives
    }

    async fn collect_candidates(&self, prompt: &str) -> Vec<ObjectiveCandidate> {
        let mut join_set = JoinSet::new();

        for (index, backend) in self
            .pool
            .with_capability(Capability::Extract)
            .into_iter()
            .enumerate()
        {
            let prompt = prompt.to_string();
            join_set.spawn(async move {
                let result = backend.extract_objectives(&prompt).await;
                (index, backend.name().to_string(), result)
            });
        }

        let mut candidates = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, name, Ok(response))) => {
                    candidates.push((index, parse_candidate(&response, prompt, &name)));
                }
                Ok((_, name, Err(e))) => {
                    warn!(backend = %name, error = %e, "Objective extraction failed");
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        candidates.sort_by_key(|(index, _)| *index);
        candidates.into_iter().map(|(_, c)| c).collect()
    }
}
