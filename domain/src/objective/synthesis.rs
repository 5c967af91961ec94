//! Objective synthesis across backends

use super::dedup::{deduplicate, deduplicate_by};
use super::entities::{ExpectedOutcome, ObjectiveCandidate, ObjectiveSet};
use crate::core::string::prefix_chars;

/// Maximum primary objectives kept after deduplication
pub const MAX_PRIMARY_OBJECTIVES: usize = 5;
/// Maximum secondary objectives kept after deduplication
pub const MAX_SECONDARY_OBJECTIVES: usize = 3;

const GUARD_PROMPT_CHARS: usize = 100;

/// Pool, deduplicate and cap the candidates of every backend.
///
/// No candidates yields an empty set; [`ensure_primary`] fills it from the
/// prompt.
pub fn synthesize_candidates(candidates: &[ObjectiveCandidate]) -> ObjectiveSet {
    let mut primary_objectives = deduplicate(pooled(candidates, |c| c.primary.as_slice()));
    primary_objectives.truncate(MAX_PRIMARY_OBJECTIVES);

    let mut secondary_objectives = deduplicate(pooled(candidates, |c| c.secondary.as_slice()));
    secondary_objectives.truncate(MAX_SECONDARY_OBJECTIVES);

    let expected_outcomes = deduplicate_by(
        candidates
            .iter()
            .flat_map(|c| c.expected_outcomes.iter().cloned())
            .collect(),
        ExpectedOutcome::text,
    );

    ObjectiveSet {
        primary_objectives,
        secondary_objectives,
        expected_outcomes,
        constraints: deduplicate(pooled(candidates, |c| c.constraints.as_slice())),
        success_criteria: Vec::new(),
    }
}

fn pooled<F>(candidates: &[ObjectiveCandidate], pick: F) -> Vec<String>
where
    F: Fn(&ObjectiveCandidate) -> &[String],
{
    candidates
        .iter()
        .flat_map(|c| pick(c).iter().cloned())
        .collect()
}

/// Guarantee at least one primary objective derived from the prompt.
pub fn ensure_primary(set: &mut ObjectiveSet, prompt: &str) {
    if !set.primary_objectives.is_empty() {
        return;
    }
    let prompt = prompt.trim();
    let head = prefix_chars(prompt, GUARD_PROMPT_CHARS);
    let ellipsis = if head.len() < prompt.len() { "..." } else { "" };
    set.primary_objectives
        .push(format!("Address the user's request: {head}{ellipsis}"));
}

/// Fill success criteria and, if missing, expected outcomes.
pub fn enhance(set: &mut ObjectiveSet) {
    set.success_criteria = set
        .primary_objectives
        .iter()
        .map(|obj| format!("Successfully complete: {obj}"))
        .collect();

    if set.expected_outcomes.is_empty() {
        set.expected_outcomes = set
            .primary_objectives
            .iter()
            .map(|obj| ExpectedOutcome::Record {
                outcome: format!("Completion of {obj}"),
                measurable_criteria: "Task completed successfully".to_string(),
                timeline: "As soon as possible".to_string(),
            })
            .collect();
    }
}

/// Full formulation: synthesize, guard, enhance.
pub fn formulate_objectives(candidates: &[ObjectiveCandidate], prompt: &str) -> ObjectiveSet {
    let mut set = synthesize_candidates(candidates);
    ensure_primary(&mut set, prompt);
    enhance(&mut set);
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(source: &str, primary: &[&str]) -> ObjectiveCandidate {
        ObjectiveCandidate {
            source: source.to_string(),
            primary: primary.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_candidates_falls_back_to_prompt() {
        assert!(synthesize_candidates(&[]).primary_objectives.is_empty());

        let set = formulate_objectives(&[], "Build a 5-year financial roadmap for a solar startup");
        assert_eq!(
            set.primary_objectives,
            vec!["Address the user's request: Build a 5-year financial roadmap for a solar startup"]
        );
        assert_eq!(
            set.success_criteria,
            vec![
                "Successfully complete: Address the user's request: Build a 5-year financial roadmap for a solar startup"
            ]
        );
    }

    #[test]
    fn test_pools_and_dedups_across_backends() {
        let set = synthesize_candidates(&[
            candidate("openai", &["Research the solar market", "Estimate costs"]),
            candidate("groq", &["research the solar market", "Find investors"]),
        ]);
        assert_eq!(
            set.primary_objectives,
            vec!["Research the solar market", "Estimate costs", "Find investors"]
        );
    }

    #[test]
    fn test_caps() {
        let mut a = candidate("openai", &["p1 alpha", "p2 beta", "p3 gamma", "p4 delta"]);
        a.secondary = ["s1 one", "s2 two", "s3 three", "s4 four"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let b = candidate("groq", &["p5 epsilon", "p6 zeta"]);
        let set = synthesize_candidates(&[a, b]);
        assert_eq!(set.primary_objectives.len(), MAX_PRIMARY_OBJECTIVES);
        assert_eq!(set.secondary_objectives.len(), MAX_SECONDARY_OBJECTIVES);
        assert_eq!(set.primary_objectives[4], "p5 epsilon");
    }

    #[test]
    fn test_guard_when_candidates_have_no_primary() {
        let mut c = ObjectiveCandidate::new("openai");
        c.constraints.push("No budget".into());
        let set = formulate_objectives(&[c], "Plan my week");
        assert_eq!(
            set.primary_objectives,
            vec!["Address the user's request: Plan my week"]
        );
        assert_eq!(set.constraints, vec!["No budget"]);
    }

    #[test]
    fn test_guard_truncates_long_prompt() {
        let prompt = "word ".repeat(40);
        let set = formulate_objectives(&[ObjectiveCandidate::new("x")], &prompt);
        let objective = &set.primary_objectives[0];
        assert!(objective.ends_with("..."));
        assert!(objective.starts_with("Address the user's request: word"));
    }

    #[test]
    fn test_enhance_fills_criteria_and_outcomes() {
        let set = formulate_objectives(&[candidate("openai", &["Ship v1"])], "Ship it");
        assert_eq!(set.success_criteria, vec!["Successfully complete: Ship v1"]);
        assert_eq!(set.expected_outcomes.len(), 1);
        assert_eq!(set.expected_outcomes[0].text(), "Completion of Ship v1");
    }

    #[test]
    fn test_enhance_keeps_existing_outcomes() {
        let mut c = candidate("openai", &["Ship v1"]);
        c.expected_outcomes.push(ExpectedOutcome::Text("Release notes".into()));
        let set = formulate_objectives(&[c], "Ship it");
        assert_eq!(
            set.expected_outcomes,
            vec![ExpectedOutcome::Text("Release notes".into())]
        );
    }
}
