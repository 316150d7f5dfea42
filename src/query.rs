//! Query normalization: tokenize, lowercase, strip punctuation.
//!
//! Scoring is a bag-of-words model, but term order is preserved here so
//! snippet extraction can prefer phrase-adjacent windows.

use std::collections::BTreeSet;

/// A query after normalization. Immutable once built.
#[derive(Debug, Clone)]
pub struct NormalizedQuery {
    /// The raw query as received, trimmed.
    pub raw: String,
    /// Ordered, lowercased terms with surrounding punctuation stripped.
    /// May contain duplicates.
    pub terms: Vec<String>,
}

impl NormalizedQuery {
    /// Normalize a raw query string.
    ///
    /// Splits on whitespace, lowercases, strips leading/trailing
    /// punctuation per token, and discards tokens that end up empty.
    /// Callers are expected to reject empty/whitespace-only input before
    /// reaching this point; an empty term list is still representable.
    pub fn new(raw: &str) -> Self {
        let terms = raw
            .split_whitespace()
            .map(normalize_token)
            .filter(|t| !t.is_empty())
            .collect();
        Self {
            raw: raw.trim().to_owned(),
            terms,
        }
    }

    /// The set of distinct terms, for the term-score denominator.
    ///
    /// Ordered, so reductions over query terms sum in a fixed order and
    /// stay bit-identical across calls.
    pub fn distinct_terms(&self) -> BTreeSet<&str> {
        self.terms.iter().map(String::as_str).collect()
    }

    /// True when normalization produced no usable terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Tokenize free text with the same rules as query normalization, so
/// document terms and query terms live in one vocabulary.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize_token)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Lowercase a token and strip leading/trailing non-alphanumeric characters.
///
/// Interior punctuation is kept ("node.js", "o'reilly") since splitting
/// compounds would change what the fetcher and scorer see as a term.
fn normalize_token(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}
