//! Spelling suggestion via Damerau-Levenshtein distance against a fixed
//! vocabulary.
//!
//! The suggestion is advisory only: it is surfaced to the caller and never
//! substituted into the query that gets scored. Tokens are corrected
//! independently; a suggestion is produced only when at least one token
//! changes.

use crate::query::NormalizedQuery;
use strsim::damerau_levenshtein;

/// Maximum edit distance accepted for a correction.
const MAX_DISTANCE: usize = 2;

/// Tokens shorter than this are never corrected — too many false positives.
const MIN_TOKEN_LEN: usize = 4;

/// Fixed vocabulary, ordered by descending expected frequency. Earlier
/// entries win distance ties.
const VOCABULARY: &[&str] = &[
    "search",
    "what",
    "best",
    "free",
    "online",
    "download",
    "review",
    "price",
    "near",
    "open",
    "time",
    "machine",
    "learning",
    "deep",
    "neural",
    "network",
    "model",
    "data",
    "science",
    "artificial",
    "intelligence",
    "reinforcement",
    "supervised",
    "algorithm",
    "python",
    "javascript",
    "nodejs",
    "rust",
    "programming",
    "language",
    "tutorial",
    "example",
    "application",
    "advantage",
    "difference",
    "between",
    "versus",
    "compare",
    "install",
    "error",
    "guide",
    "quick",
    "start",
    "documentation",
    "library",
    "framework",
    "database",
    "server",
    "client",
    "history",
    "weather",
    "definition",
    "meaning",
    "benefits",
    "performance",
    "security",
];

/// Suggest a corrected form of the whole query, or `None` when every token
/// is either too short, already known, or has no close vocabulary match.
pub fn suggest(query: &NormalizedQuery) -> Option<String> {
    let mut corrected = Vec::with_capacity(query.terms.len());
    let mut changed = false;

    for term in &query.terms {
        match correct_token(term) {
            Some(replacement) => {
                tracing::trace!(term, replacement, "spelling correction");
                corrected.push(replacement);
                changed = true;
            }
            None => corrected.push(term.as_str()),
        }
    }

    if changed {
        Some(corrected.join(" "))
    } else {
        None
    }
}

/// Find the closest vocabulary word for a single token.
///
/// Returns `None` when the token is too short, is an exact vocabulary
/// word, contains digits, or no candidate is within [`MAX_DISTANCE`].
/// Ties on distance are broken by vocabulary (frequency) order.
fn correct_token(token: &str) -> Option<&'static str> {
    if token.chars().count() < MIN_TOKEN_LEN || token.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if VOCABULARY.contains(&token) {
        return None;
    }

    let mut best: Option<(&'static str, usize)> = None;
    for &word in VOCABULARY {
        let distance = damerau_levenshtein(token, word);
        if distance <= MAX_DISTANCE && best.map_or(true, |(_, d)| distance < d) {
            best = Some((word, distance));
            if distance == 1 {
                break;
            }
        }
    }
    best.map(|(word, _)| word)
}
