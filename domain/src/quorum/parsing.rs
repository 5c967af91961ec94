//! Backend response parsing for intent consensus.
//!
//! Backends are asked for `{"intent", "confidence", "reasoning"}` but are
//! free to wrap it in prose, drop fields, or ignore the format entirely.
//! These functions are pure text handling; no I/O.

use crate::core::error::ParseError;
use crate::core::string::outer_json_object;
use crate::intent::{Assessment, AssessmentMethod, Intent};

/// Confidence assigned to a keyword-scan fallback
pub const LEXICAL_FALLBACK_CONFIDENCE: f64 = 0.6;

/// Parse a structured intent payload.
///
/// Missing fields default to `objective` / `0.5` / "Backend assessment".
pub fn parse_intent_response(response: &str, source: &str) -> Result<Assessment, ParseError> {
    let json_str = outer_json_object(response).ok_or(ParseError::NoJson)?;
    let parsed: serde_json::Value =
        serde_json::from_str(json_str).map_err(|e| ParseError::Malformed(e.to_string()))?;
    if !parsed.is_object() {
        return Err(ParseError::Malformed("expected a JSON object".to_string()));
    }

    let intent = parsed
        .get("intent")
        .and_then(|v| v.as_str())
        .map(Intent::from_label)
        .unwrap_or(Intent::Objective);
    let confidence = match parsed.get("confidence") {
        None => 0.5,
        Some(v) => v
            .as_f64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
            .ok_or_else(|| ParseError::Malformed(format!("confidence is not a number: {v}")))?,
    };
    let reasoning = parsed
        .get("reasoning")
        .and_then(|v| v.as_str())
        .unwrap_or("Backend assessment");

    Ok(Assessment::new(
        intent,
        confidence,
        reasoning,
        AssessmentMethod::Backend,
        source,
    ))
}

/// Keyword scan used when the payload is not parseable.
///
/// Only an answer that mentions "chat" without "objective" counts as chat.
pub fn lexical_intent_fallback(response: &str, source: &str) -> Assessment {
    let lower = response.to_lowercase();
    let intent = if lower.contains("chat") && !lower.contains("objective") {
        Intent::Chat
    } else {
        Intent::Objective
    };
    Assessment::new(
        intent,
        LEXICAL_FALLBACK_CONFIDENCE,
        "Fallback parsing",
        AssessmentMethod::LexicalFallback,
        source,
    )
}

/// Parse a backend answer, falling back to the keyword scan on any parse error.
pub fn assess_backend_response(response: &str, source: &str) -> Assessment {
    parse_intent_response(response, source)
        .unwrap_or_else(|_| lexical_intent_fallback(response, source))
}
