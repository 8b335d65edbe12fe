//! Retrieval constants and helpers shared by the search endpoint and the
//! prompt builder.
//!
//! This module lives in `core` (zero internal deps) so both the API layer and
//! the repository layer agree on limits and escaping rules.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Default number of keyword-search results (`k` query parameter).
pub const DEFAULT_SEARCH_LIMIT: i64 = 5;

/// Maximum number of keyword-search results per request.
pub const MAX_SEARCH_LIMIT: i64 = 50;

/// Maximum number of snippets folded into the system prompt.
pub const MAX_PROMPT_SNIPPETS: usize = 5;

/// Snippet preview length (characters) used in the prompt's sources block.
pub const SNIPPET_PREVIEW_CHARS: usize = 160;

/// Clamp a requested result count into `1..=MAX_SEARCH_LIMIT`, falling back
/// to [`DEFAULT_SEARCH_LIMIT`] for missing or non-positive values.
pub fn clamp_search_limit(k: Option<i64>) -> i64 {
    match k {
        Some(k) if k > 0 => k.min(MAX_SEARCH_LIMIT),
        _ => DEFAULT_SEARCH_LIMIT,
    }
}

// ---------------------------------------------------------------------------
// Snippets
// ---------------------------------------------------------------------------

/// A retrieved snippet used to ground the persona's replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagSnippet {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

// ---------------------------------------------------------------------------
// String helpers
// ---------------------------------------------------------------------------

/// Truncate a string to at most `max_chars` characters.
///
/// Operates on character boundaries, never bytes, so multi-byte UTF-8 input
/// cannot be split mid-codepoint.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Escape ILIKE pattern metacharacters (`\`, `%`, `_`) in user input so the
/// query matches them literally.
pub fn escape_like_pattern(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- clamp_search_limit --------------------------------------------------

    #[test]
    fn missing_limit_uses_default() {
        assert_eq!(clamp_search_limit(None), DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn zero_and_negative_limits_use_default() {
        assert_eq!(clamp_search_limit(Some(0)), DEFAULT_SEARCH_LIMIT);
        assert_eq!(clamp_search_limit(Some(-3)), DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn in_range_limit_is_kept() {
        assert_eq!(clamp_search_limit(Some(12)), 12);
    }

    #[test]
    fn oversized_limit_is_capped() {
        assert_eq!(clamp_search_limit(Some(500)), MAX_SEARCH_LIMIT);
    }

    // -- truncate_chars ------------------------------------------------------

    #[test]
    fn short_string_is_unchanged() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn long_string_is_cut_at_char_count() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn multibyte_input_is_not_split_mid_codepoint() {
        // Each 'é' is two bytes; a byte-based slice at 3 would panic.
        assert_eq!(truncate_chars("ééé", 2), "éé");
    }

    // -- escape_like_pattern -------------------------------------------------

    #[test]
    fn plain_input_is_unchanged() {
        assert_eq!(escape_like_pattern("charlie"), "charlie");
    }

    #[test]
    fn metacharacters_are_escaped() {
        assert_eq!(escape_like_pattern("100%_\\"), "100\\%\\_\\\\");
    }
}
