//! Assess Intent use case (stage 1)
//!
//! Pattern phase first; only an uncertain pattern result goes to the
//! backend vote.

use std::sync::Arc;

use eskai_domain::intent::QUICK_DECISION_THRESHOLD;
use eskai_domain::quorum::{assess_backend_response, consensus_decision};
use eskai_domain::{Assessment, Capability, quick_pattern_assessment};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::pool::BackendPool;

/// Use case for classifying a prompt as chat or objective
pub struct AssessIntentUseCase {
    pool: Arc<BackendPool>,
}

impl AssessIntentUseCase {
    pub fn new(pool: Arc<BackendPool>) -> Self {
        Self { pool }
    }

    /// Classify a prompt. Never fails: backend errors only remove votes.
    pub async fn execute(&self, prompt: &str, context: Option<&str>) -> Assessment {
        let quick = quick_pattern_assessment(prompt);
        if quick.confidence > QUICK_DECISION_THRESHOLD {
            info!(
                intent = %quick.intent,
                confidence = quick.confidence,
                "Quick pattern decision"
            );
            return quick;
        }

        let votes = self.collect_backend_votes(prompt, context).await;
        debug!(votes = votes.len(), "Collected backend assessments");

        let decision = consensus_decision(votes, quick);
        info!(
            intent = %decision.intent,
            confidence = decision.confidence,
            voters = decision.contributions.len(),
            "Consensus decision"
        );
        decision
    }

    /// Ask every classify-capable backend in parallel.
    ///
    /// Votes come back in pool order regardless of completion order.
    async fn collect_backend_votes(&self, prompt: &str, context: Option<&str>) -> Vec<Assessment> {
        let mut join_set = JoinSet::new();

        for (index, backend) in self
            .pool
            .with_capability(Capability::Classify)
            .into_iter()
            .enumerate()
        {
            let prompt = prompt.to_string();
            let context = context.map(str::to_string);
            join_set.spawn(async move {
                let result = backend.classify_intent(&prompt, context.as_deref()).await;
                (index, backend.name().to_string(), result)
            });
        }

        let mut votes = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, name, Ok(response))) => {
                    votes.push((index, assess_backend_response(&response, &name)));
                }
                Ok((_, name, Err(e))) => {
                    warn!(backend = %name, error = %e, "Intent classification failed, skipping vote");
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        votes.sort_by_key(|(index, _)| *index);
        votes.into_iter().map(|(_, vote)| vote).collect()
    }
}
