//! Vote tallying for intent consensus
//!
//! Each contributing assessment casts one vote for its intent, weighted by
//! its confidence for tie-breaking.

use crate::intent::{Assessment, Intent};
use serde::{Deserialize, Serialize};

/// Aggregated votes for the two intents
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteTally {
    pub chat_votes: usize,
    pub objective_votes: usize,
    pub chat_confidence: f64,
    pub objective_confidence: f64,
}

impl VoteTally {
    /// Tally a set of assessments
    pub fn from_assessments<'a>(assessments: impl IntoIterator<Item = &'a Assessment>) -> Self {
        assessments
            .into_iter()
            .fold(Self::default(), |mut tally, a| {
                match a.intent {
                    Intent::Chat => {
                        tally.chat_votes += 1;
                        tally.chat_confidence += a.confidence;
                    }
                    Intent::Objective => {
                        tally.objective_votes += 1;
                        tally.objective_confidence += a.confidence;
                    }
                }
                tally
            })
    }

    pub fn total_votes(&self) -> usize {
        self.chat_votes + self.objective_votes
    }

    /// Intent holding a strict majority of votes, if any
    pub fn majority(&self) -> Option<Intent> {
        use std::cmp::Ordering;
        match self.chat_votes.cmp(&self.objective_votes) {
            Ordering::Greater => Some(Intent::Chat),
            Ordering::Less => Some(Intent::Objective),
            Ordering::Equal => None,
        }
    }

    /// Summed confidence behind an intent
    pub fn confidence_for(&self, intent: Intent) -> f64 {
        match intent {
            Intent::Chat => self.chat_confidence,
            Intent::Objective => self.objective_confidence,
        }
    }

    /// Generate a visual vote summary (e.g., "[CCO]")
    pub fn vote_summary(assessments: &[Assessment]) -> String {
        let mut summary = String::from("[");
        for a in assessments {
            summary.push(if a.is_chat() { 'C' } else { 'O' });
        }
        summary.push(']');
        summary
    }
}
