//! Lexical alignment and completeness scoring

use super::entities::{AlignmentStatus, ObjectiveAlignment, ObjectiveAssessment, SupportingEvidence};
use crate::core::string::tokens;

/// Objectives scoring above this are `addressed`, otherwise `partial`
pub const ADDRESSED_THRESHOLD: f64 = 0.3;
/// Final text when no agent completed
pub const NO_RESULTS_MESSAGE: &str = "No results were generated due to execution failures.";

const AGENT_WEIGHT: f64 = 0.6;
const LENGTH_WEIGHT: f64 = 0.4;
const LENGTH_NORMALIZER: f64 = 1000.0;

/// Share of an objective's words that occur in `text`, case-insensitively.
///
/// A word counts when it is a substring of the lower-cased text.
pub fn alignment_score(objective: &str, text: &str) -> f64 {
    let words = tokens(objective);
    if words.is_empty() {
        return 0.0;
    }
    let haystack = text.to_lowercase();
    let found = words.iter().filter(|w| haystack.contains(w.as_str())).count();
    found as f64 / words.len() as f64
}

/// Score every primary objective against the synthesized text
pub fn validate_alignment(text: &str, objectives: &[String]) -> ObjectiveAlignment {
    let objectives_assessment: Vec<ObjectiveAssessment> = objectives
        .iter()
        .map(|objective| {
            let score = alignment_score(objective, text);
            ObjectiveAssessment {
                objective: objective.clone(),
                alignment_score: score,
                status: if score > ADDRESSED_THRESHOLD {
                    AlignmentStatus::Addressed
                } else {
                    AlignmentStatus::Partial
                },
            }
        })
        .collect();

    let overall_alignment_score = if objectives_assessment.is_empty() {
        0.0
    } else {
        objectives_assessment
            .iter()
            .map(|a| a.alignment_score)
            .sum::<f64>()
            / objectives_assessment.len() as f64
    };

    ObjectiveAlignment {
        overall_alignment_score,
        fully_addressed: objectives_assessment
            .iter()
            .filter(|a| a.status == AlignmentStatus::Addressed)
            .count(),
        total_objectives: objectives.len(),
        objectives_assessment,
    }
}

/// `0.6 * completed / max(objectives, 1) + 0.4 * min(1, output_len / 1000)`,
/// clamped to [0, 1].
pub fn completeness_score(evidence: &[SupportingEvidence], primary_objective_count: usize) -> f64 {
    if evidence.is_empty() {
        return 0.0;
    }
    let agent_factor = evidence.len() as f64 / primary_objective_count.max(1) as f64;
    let output_len: usize = evidence.iter().map(|e| e.output.chars().count()).sum();
    let length_factor = (output_len as f64 / LENGTH_NORMALIZER).min(1.0);
    (AGENT_WEIGHT * agent_factor + LENGTH_WEIGHT * length_factor).clamp(0.0, 1.0)
}

/// Deterministic concatenation used when backend synthesis fails
pub fn fallback_synthesis(evidence: &[SupportingEvidence], objectives: &[String]) -> String {
    if evidence.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }

    let mut summary = format!(
        "Summary based on {} agent executions:\n\n",
        evidence.len()
    );
    for (i, item) in evidence.iter().enumerate() {
        summary.push_str(&format!("Result {}: {}\n\n", i + 1, item.output));
    }
    summary.push_str(&format!("Objectives addressed: {}", objectives.join(", ")));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence(outputs: &[&str]) -> Vec<SupportingEvidence> {
        outputs
            .iter()
            .enumerate()
            .map(|(i, o)| SupportingEvidence {
                agent_id: format!("agent_step_{}", i + 1),
                output: o.to_string(),
                tools_used: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn test_alignment_score() {
        assert_eq!(alignment_score("Research Solar market", "the SOLAR market is big"), 2.0 / 3.0);
        assert_eq!(alignment_score("", "anything"), 0.0);
        assert_eq!(alignment_score("x y", ""), 0.0);
    }

    #[test]
    fn test_alignment_substring_match() {
        // "plan" occurs inside "planning"
        assert_eq!(alignment_score("plan", "careful planning"), 1.0);
    }

    #[test]
    fn test_validate_alignment_statuses() {
        let objectives = vec![
            "Research solar market".to_string(),
            "Hire quantum engineers".to_string(),
        ];
        let alignment = validate_alignment("Solar market research shows growth", &objectives);
        assert_eq!(alignment.total_objectives, 2);
        assert_eq!(alignment.fully_addressed, 1);
        assert_eq!(alignment.objectives_assessment[0].status, AlignmentStatus::Addressed);
        assert_eq!(alignment.objectives_assessment[1].status, AlignmentStatus::Partial);
        assert!((alignment.overall_alignment_score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_validate_alignment_no_objectives() {
        let alignment = validate_alignment("text", &[]);
        assert_eq!(alignment.overall_alignment_score, 0.0);
        assert_eq!(alignment.total_objectives, 0);
    }

    #[test]
    fn test_completeness_zero_without_evidence() {
        assert_eq!(completeness_score(&[], 3), 0.0);
    }

    #[test]
    fn test_completeness_formula() {
        // 1 of 2 objectives, 500 chars: 0.6 * 0.5 + 0.4 * 0.5
        let score = completeness_score(&evidence(&["x".repeat(500).as_str()]), 2);
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_completeness_clamped() {
        let score = completeness_score(&evidence(&["x".repeat(5000).as_str(), "y", "z"]), 0);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_fallback_synthesis() {
        let objectives = vec!["A".to_string(), "B".to_string()];
        let text = fallback_synthesis(&evidence(&["first", "second"]), &objectives);
        assert!(text.starts_with("Summary based on 2 agent executions"));
        assert!(text.contains("Result 2: second"));
        assert!(text.ends_with("Objectives addressed: A, B"));
        assert_eq!(fallback_synthesis(&[], &objectives), NO_RESULTS_MESSAGE);
    }
}
