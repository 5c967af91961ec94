//! Objective extraction parsing
//!
//! Structured JSON first; when that fails, any bullet or ordinal line
//! in the raw text becomes a primary objective.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::entities::{ExpectedOutcome, ObjectiveCandidate};
use crate::core::error::ParseError;
use crate::core::string::{outer_json_object, prefix_chars};

/// Characters of the prompt kept in the synthetic fallback objective
pub const FALLBACK_PROMPT_CHARS: usize = 100;
/// Bullets beyond this count are treated as secondary objectives
pub const BULLET_PRIMARY_LIMIT: usize = 3;

static BULLET_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-*•]\s+|\d+[.)]\s*)(.+)$").expect("bullet regex is valid")
});

/// Parse a structured objective payload.
///
/// List entries may be plain strings or objects carrying the text under
/// `objective`, `description`, `text` or `outcome`.
pub fn parse_objective_response(
    response: &str,
    source: &str,
) -> Result<ObjectiveCandidate, ParseError> {
    let json_str = outer_json_object(response).ok_or(ParseError::NoJson)?;
    let parsed: Value =
        serde_json::from_str(json_str).map_err(|e| ParseError::Malformed(e.to_string()))?;
    let Some(obj) = parsed.as_object() else {
        return Err(ParseError::Malformed("expected a JSON object".to_string()));
    };

    let text_list = |key: &str| -> Vec<String> {
        obj.get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(entry_text).collect())
            .unwrap_or_default()
    };

    let expected_outcomes = obj
        .get("expected_outcomes")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(outcome_entry).collect())
        .unwrap_or_default();

    Ok(ObjectiveCandidate {
        source: source.to_string(),
        primary: text_list("primary_objectives"),
        secondary: text_list("secondary_objectives"),
        expected_outcomes,
        constraints: text_list("constraints"),
    })
}

fn entry_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => ["objective", "description", "text", "outcome"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))?,
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn outcome_entry(value: &Value) -> Option<ExpectedOutcome> {
    match value {
        Value::Object(map) => {
            let outcome = entry_text(value)?;
            let field = |k: &str| {
                map.get(k)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            Some(ExpectedOutcome::Record {
                outcome,
                measurable_criteria: field("measurable_criteria"),
                timeline: field("timeline"),
            })
        }
        _ => entry_text(value).map(ExpectedOutcome::Text),
    }
}

/// Bullet-line fallback.
///
/// Every line starting with `-`, `*` or `•` plus whitespace, or with an
/// ordinal (`1.`, `2)`), is an objective; the first [`BULLET_PRIMARY_LIMIT`] are primary and the
/// rest secondary. If none are found, a single synthetic objective is
/// built from the prompt.
pub fn extract_bullet_objectives(response: &str, prompt: &str, source: &str) -> ObjectiveCandidate {
    let mut primary: Vec<String> = response
        .lines()
        .filter_map(|line| {
            BULLET_LINE
                .captures(line.trim())
                .map(|caps| caps[1].trim().to_string())
        })
        .filter(|text| !text.is_empty())
        .collect();

    if primary.is_empty() {
        primary.push(format!(
            "Analyze and respond to: {}",
            prefix_chars(prompt.trim(), FALLBACK_PROMPT_CHARS)
        ));
    }

    let secondary = if primary.len() > BULLET_PRIMARY_LIMIT {
        primary.split_off(BULLET_PRIMARY_LIMIT)
    } else {
        Vec::new()
    };

    ObjectiveCandidate {
        source: source.to_string(),
        primary,
        secondary,
        ..Default::default()
    }
}

/// Parse one backend's extraction, never failing.
pub fn parse_candidate(response: &str, prompt: &str, source: &str) -> ObjectiveCandidate {
    parse_objective_response(response, source)
        .unwrap_or_else(|_| extract_bullet_objectives(response, prompt, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_structured() {
        let response = r#"Here you go:
{
  "primary_objectives": ["Research market", {"objective": "Estimate revenue"}],
  "secondary_objectives": ["Find investors"],
  "expected_outcomes": ["A report", {"outcome": "Forecast", "measurable_criteria": "3 scenarios", "timeline": "1 week"}],
  "constraints": ["No paid data"]
}"#;
        let c = parse_objective_response(response, "openai").unwrap();
        assert_eq!(c.source, "openai");
        assert_eq!(c.primary, vec!["Research market", "Estimate revenue"]);
        assert_eq!(c.secondary, vec!["Find investors"]);
        assert_eq!(c.expected_outcomes.len(), 2);
        assert_eq!(c.expected_outcomes[0], ExpectedOutcome::Text("A report".into()));
        assert!(matches!(
            &c.expected_outcomes[1],
            ExpectedOutcome::Record { timeline, .. } if timeline == "1 week"
        ));
        assert_eq!(c.constraints, vec!["No paid data"]);
    }

    #[test]
    fn test_parse_missing_lists_default_empty() {
        let c = parse_objective_response(r#"{"primary_objectives": ["Only this"]}"#, "groq")
            .unwrap();
        assert_eq!(c.primary, vec!["Only this"]);
        assert!(c.secondary.is_empty());
        assert!(c.expected_outcomes.is_empty());
    }

    #[test]
    fn test_parse_skips_blank_entries() {
        let c = parse_objective_response(r#"{"primary_objectives": ["", "  ", 3, "Real"]}"#, "x")
            .unwrap();
        assert_eq!(c.primary, vec!["Real"]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_objective_response("no json", "x"),
            Err(ParseError::NoJson)
        );
        assert!(matches!(
            parse_objective_response("{primary: nope}", "x"),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_bullet_fallback() {
        let response = "Objectives:\n- Research market\n* Build model\n1. Write report\n2) Review\nplain line";
        let c = extract_bullet_objectives(response, "prompt", "gemini");
        assert_eq!(c.primary, vec!["Research market", "Build model", "Write report"]);
        assert_eq!(c.secondary, vec!["Review"]);
    }

    #[test]
    fn test_rules_and_emphasis_are_not_bullets() {
        let response = "Plan\n---\n***\n**Bold heading**\n-Tight dash\n• Research market";
        let c = extract_bullet_objectives(response, "prompt", "gemini");
        assert_eq!(c.primary, vec!["Research market"]);
        assert!(c.secondary.is_empty());
    }

    #[test]
    fn test_bullet_fallback_synthetic() {
        let prompt = "x".repeat(150);
        let c = extract_bullet_objectives("nothing useful", &prompt, "openai");
        assert_eq!(c.primary.len(), 1);
        assert_eq!(
            c.primary[0],
            format!("Analyze and respond to: {}", "x".repeat(100))
        );
    }

    #[test]
    fn test_parse_candidate_falls_back() {
        let c = parse_candidate("- Do the thing", "Do it", "openai");
        assert_eq!(c.primary, vec!["Do the thing"]);
    }
}
