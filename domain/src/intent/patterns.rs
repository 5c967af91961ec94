//! Pattern phase of intent classification.
//!
//! Scores the prompt against greeting/pleasantry patterns and action/task
//! patterns, then nudges the scores with length and structure heuristics.
//! Pure function; no backend involved.

use super::assessment::{Assessment, AssessmentMethod, Intent};
use regex::Regex;
use std::sync::LazyLock;

/// A quick assessment strictly above this confidence skips the backend vote.
pub const QUICK_DECISION_THRESHOLD: f64 = 0.8;

/// Source label used for the pattern phase in consensus votes.
pub const PATTERN_SOURCE: &str = "pattern";

static CHAT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\b(hello|hi|hey|good morning|good afternoon|good evening)\b",
        r"\b(how are you|what's up|how's it going)\b",
        r"\b(thanks|thank you|bye|goodbye|see you)\b",
        r"\b(nice|great|awesome|cool|interesting)\b$",
        r"^\s*(yes|no|ok|okay|sure|alright)\s*$",
    ])
});

static OBJECTIVE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\b(create|build|make|develop|design|implement)\b",
        r"\b(analyze|research|investigate|study|examine)\b",
        r"\b(solve|fix|resolve|address|handle)\b",
        r"\b(generate|produce|write|compose|draft)\b",
        r"\b(plan|strategy|approach|method|solution)\b",
        r"\b(help me|can you|please|i need)\b.*\b(with|to|for)\b",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    // Literal patterns above; a failure here is a programming error caught by tests.
    patterns
        .iter()
        .filter_map(|p| Regex::new(&format!("(?i){p}")).ok())
        .collect()
}

/// Pattern/heuristic scores for a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternScores {
    pub chat: u32,
    pub objective: u32,
}

/// Count pattern hits and apply the length/structure heuristics.
pub fn score_prompt(prompt: &str) -> PatternScores {
    let normalized = prompt.trim().to_lowercase();

    let mut chat = CHAT_PATTERNS
        .iter()
        .filter(|re| re.is_match(&normalized))
        .count() as u32;
    let mut objective = OBJECTIVE_PATTERNS
        .iter()
        .filter(|re| re.is_match(&normalized))
        .count() as u32;

    let word_count = prompt.split_whitespace().count();
    let has_question_mark = prompt.contains('?');
    let complex_structure = prompt.split('.').count() > 2 || prompt.split(',').count() > 3;

    if word_count > 20 || complex_structure {
        objective += 1;
    }
    if word_count < 5 && !has_question_mark {
        chat += 1;
    }

    PatternScores { chat, objective }
}

/// Classify a prompt with patterns only.
///
/// No hits at all defaults to `objective` at confidence 0.3, so an
/// unrecognisable prompt always goes on to the backend vote.
pub fn quick_pattern_assessment(prompt: &str) -> Assessment {
    let scores = score_prompt(prompt);
    let total = scores.chat + scores.objective;

    let (intent, confidence) = if total == 0 {
        (Intent::Objective, 0.3)
    } else if scores.chat > scores.objective {
        let lead = f64::from(scores.chat - scores.objective);
        (Intent::Chat, (0.5 + lead * 0.2).min(0.9))
    } else {
        let lead = f64::from(scores.objective - scores.chat);
        (Intent::Objective, (0.5 + lead * 0.2).min(0.9))
    };

    Assessment::new(
        intent,
        confidence,
        format!(
            "Pattern matching - chat: {}, objective: {}",
            scores.chat, scores.objective
        ),
        AssessmentMethod::QuickPattern,
        PATTERN_SOURCE,
    )
}
