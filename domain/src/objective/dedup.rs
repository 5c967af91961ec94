//! Objective deduplication
//!
//! Two objectives are the same if, after lower-casing and trimming, one
//! contains the other or their word sets overlap with Jaccard similarity
//! above [`SIMILARITY_THRESHOLD`]. The first-seen form is kept, so the
//! operation is order-preserving and idempotent.

use std::collections::HashSet;

/// Jaccard similarity above which two objectives are merged
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Token-set Jaccard similarity of two strings
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    if words_a.is_empty() && words_b.is_empty() {
        return 1.0;
    }
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    intersection as f64 / union as f64
}

/// Whether two objectives should be merged
pub fn is_similar(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    a.contains(&b) || b.contains(&a) || jaccard_similarity(&a, &b) > SIMILARITY_THRESHOLD
}

/// Deduplicate items by a text key, keeping first occurrences
pub fn deduplicate_by<T>(items: Vec<T>, key: impl Fn(&T) -> &str) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.iter().any(|kept| is_similar(key(kept), key(&item))) {
            unique.push(item);
        }
    }
    unique
}

/// Deduplicate a list of objective strings
pub fn deduplicate(objectives: Vec<String>) -> Vec<String> {
    deduplicate_by(objectives, |s| s.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_jaccard() {
        assert_eq!(jaccard_similarity("a b c", "a b c"), 1.0);
        assert_eq!(jaccard_similarity("a b", "c d"), 0.0);
        assert!((jaccard_similarity("a b c", "a b d") - 0.5).abs() < 1e-9);
        assert_eq!(jaccard_similarity("", ""), 1.0);
        assert_eq!(jaccard_similarity("a", ""), 0.0);
    }

    #[test]
    fn test_substring_is_duplicate() {
        let result = deduplicate(strings(&[
            "Build a financial roadmap",
            "build a financial roadmap for the startup",
        ]));
        assert_eq!(result, strings(&["Build a financial roadmap"]));
    }

    #[test]
    fn test_reordered_words_are_duplicates() {
        // identical word sets: similarity 1.0
        let result = deduplicate(strings(&[
            "analyze market size and competitors",
            "competitors and market size analyze",
        ]));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_distinct_objectives_kept_in_order() {
        let input = strings(&[
            "Research solar market",
            "Project five year revenue",
            "Identify funding sources",
        ]);
        assert_eq!(deduplicate(input.clone()), input);
    }

    #[test]
    fn test_idempotent() {
        let input = strings(&[
            "Research solar market",
            "research solar market trends",
            "Estimate costs",
            "Estimate costs and margins per year",
            "Draft the roadmap",
        ]);
        let once = deduplicate(input);
        let twice = deduplicate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_similar_pair_survives() {
        let once = deduplicate(strings(&[
            "a b c d e f g h i j",
            "a b c d e f g h i k",
            "x y z",
            "X Y Z",
        ]));
        for (i, a) in once.iter().enumerate() {
            for b in once.iter().skip(i + 1) {
                assert!(!is_similar(a, b));
            }
        }
    }
}
