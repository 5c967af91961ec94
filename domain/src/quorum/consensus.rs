//! Consensus decision over intent assessments
//!
//! The pattern-phase assessment always votes alongside every backend that
//! answered. A strict majority decides the intent; a tie falls back to the
//! larger summed confidence and caps the resulting confidence lower to
//! reflect the disagreement.

use super::vote::VoteTally;
use crate::intent::{Assessment, AssessmentMethod, Intent};

/// Confidence ceiling for a majority decision
pub const MAJORITY_CONFIDENCE_CAP: f64 = 0.95;

/// Confidence ceiling when the vote was tied
pub const TIE_CONFIDENCE_CAP: f64 = 0.8;

/// Combine backend assessments with the quick assessment into one decision.
///
/// Winning confidence is the summed confidence of the winning votes divided
/// by the number of voters, capped at [`MAJORITY_CONFIDENCE_CAP`] or
/// [`TIE_CONFIDENCE_CAP`].
pub fn consensus_decision(backend_votes: Vec<Assessment>, quick: Assessment) -> Assessment {
    let mut voters = backend_votes;
    voters.push(quick);

    let tally = VoteTally::from_assessments(&voters);
    let total = tally.total_votes() as f64;

    let (intent, cap) = match tally.majority() {
        Some(intent) => (intent, MAJORITY_CONFIDENCE_CAP),
        None if tally.chat_confidence > tally.objective_confidence => {
            (Intent::Chat, TIE_CONFIDENCE_CAP)
        }
        None => (Intent::Objective, TIE_CONFIDENCE_CAP),
    };
    let confidence = (tally.confidence_for(intent) / total).min(cap);

    let breakdown = voters
        .iter()
        .map(|a| format!("{}: {}", a.source, a.intent))
        .collect::<Vec<_>>()
        .join(", ");

    Assessment::new(
        intent,
        confidence,
        format!(
            "Consensus from {} assessments {}: {}",
            voters.len(),
            VoteTally::vote_summary(&voters),
            breakdown
        ),
        AssessmentMethod::Consensus,
        "consensus",
    )
    .with_contributions(voters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::quick_pattern_assessment;

    fn backend(source: &str, intent: Intent, confidence: f64) -> Assessment {
        Assessment::new(intent, confidence, "", AssessmentMethod::Backend, source)
    }

    #[test]
    fn test_majority_wins() {
        let quick = backend("pattern", Intent::Chat, 0.7);
        let result = consensus_decision(
            vec![
                backend("openai", Intent::Objective, 0.9),
                backend("groq", Intent::Objective, 0.8),
            ],
            quick,
        );
        assert_eq!(result.intent, Intent::Objective);
        assert!((result.confidence - 1.7 / 3.0).abs() < 1e-9);
        assert_eq!(result.method, AssessmentMethod::Consensus);
        assert_eq!(result.contributions.len(), 3);
    }

    #[test]
    fn test_majority_confidence_capped() {
        let result = consensus_decision(
            vec![
                backend("openai", Intent::Chat, 1.0),
                backend("groq", Intent::Chat, 1.0),
            ],
            backend("pattern", Intent::Chat, 1.0),
        );
        assert_eq!(result.confidence, MAJORITY_CONFIDENCE_CAP);
    }

    #[test]
    fn test_tie_broken_by_confidence() {
        let result = consensus_decision(
            vec![backend("openai", Intent::Chat, 0.9)],
            backend("pattern", Intent::Objective, 0.3),
        );
        assert_eq!(result.intent, Intent::Chat);
        assert!((result.confidence - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_tie_confidence_capped_lower() {
        let result = consensus_decision(
            vec![
                backend("openai", Intent::Chat, 1.0),
                backend("groq", Intent::Chat, 1.0),
                backend("gemini", Intent::Objective, 0.1),
            ],
            backend("pattern", Intent::Objective, 0.1),
        );
        assert_eq!(result.intent, Intent::Chat);
        assert!((result.confidence - 0.5).abs() < 1e-9);

        let result = consensus_decision(
            vec![backend("openai", Intent::Chat, 1.0)],
            backend("pattern", Intent::Objective, 0.0),
        );
        // 1.0 / 2 voters = 0.5 stays under the tie cap
        assert!(result.confidence <= TIE_CONFIDENCE_CAP);
    }

    #[test]
    fn test_equal_tie_defaults_to_objective() {
        let result = consensus_decision(
            vec![backend("openai", Intent::Chat, 0.6)],
            backend("pattern", Intent::Objective, 0.6),
        );
        assert_eq!(result.intent, Intent::Objective);
    }

    #[test]
    fn test_pattern_only_vote() {
        let quick = quick_pattern_assessment("What is the capital of Peru?");
        let result = consensus_decision(Vec::new(), quick);
        assert_eq!(result.intent, Intent::Objective);
        assert_eq!(result.contributions.len(), 1);
        assert!((0.0..=1.0).contains(&result.confidence));
    }

    #[test]
    fn test_reasoning_lists_sources() {
        let result = consensus_decision(
            vec![backend("openai", Intent::Objective, 0.9)],
            backend("pattern", Intent::Objective, 0.7),
        );
        assert!(result.reasoning.contains("openai: objective"));
        assert!(result.reasoning.contains("pattern: objective"));
        assert!(result.reasoning.starts_with("Consensus from 2 assessments"));
    }
}
