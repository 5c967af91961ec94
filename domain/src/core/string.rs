//! String utilities for the domain layer.

/// Cut `s` to at most `max_bytes` bytes on a character boundary, no marker.
pub fn truncate_bytes(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// First `n` characters of `s` (not bytes).
pub fn prefix_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Lower-cased whitespace tokens.
pub fn tokens(s: &str) -> Vec<String> {
    s.split_whitespace().map(|w| w.to_lowercase()).collect()
}

/// Slice spanning the first `{` to the last `}` of the text, if any.
///
/// Backends routinely wrap their JSON in prose or markdown fences; this
/// recovers the outermost object without caring about the surroundings.
pub fn outer_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_bytes_boundary() {
        assert_eq!(truncate_bytes("hello world", 5), "hello");
        assert_eq!(truncate_bytes("hi", 10), "hi");
        // 'é' is two bytes; never split it
        assert_eq!(truncate_bytes("é", 1), "");
    }

    #[test]
    fn test_prefix_chars_multibyte() {
        assert_eq!(prefix_chars("あのね", 2), "あの");
        assert_eq!(prefix_chars("short", 100), "short");
        assert_eq!(prefix_chars("", 3), "");
    }

    #[test]
    fn test_tokens_lowercase() {
        assert_eq!(tokens("Build  a Roadmap"), vec!["build", "a", "roadmap"]);
        assert!(tokens("   ").is_empty());
    }

    #[test]
    fn test_outer_json_object() {
        let text = "Sure! ```json\n{\"intent\": \"chat\"}\n``` done";
        assert_eq!(outer_json_object(text), Some("{\"intent\": \"chat\"}"));
        assert_eq!(outer_json_object("no braces"), None);
        assert_eq!(outer_json_object("} backwards {"), None);
    }
}
