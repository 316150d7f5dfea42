//! Query-aware snippet extraction.
//!
//! Produces a short excerpt of the extracted text centred on the first
//! matched query term, preferring to end on a sentence boundary. Falls
//! back to the leading text when no term matches, and to the
//! retriever-provided snippet when there is no text at all.

use crate::query::NormalizedQuery;

/// Target snippet length in characters.
pub const MAX_SNIPPET_CHARS: usize = 300;

/// Characters of context kept before the first matched term.
const LEAD_CONTEXT_CHARS: usize = 100;

/// Build a display snippet for a document.
pub fn build_snippet(text: &str, query: &NormalizedQuery, fallback: &str) -> String {
    if text.is_empty() {
        return fallback.to_owned();
    }

    let start = first_match_offset(text, query)
        .map(|offset| window_start(text, offset))
        .unwrap_or(0);

    let window = take_chars(&text[start..], MAX_SNIPPET_CHARS);
    let mut snippet = trim_to_sentence(window).to_owned();

    if start > 0 {
        snippet.insert(0, '…');
    }
    if start + window.len() < text.len() && !ends_with_sentence_punctuation(&snippet) {
        snippet = snippet.trim_end().to_owned();
        snippet.push('…');
    }
    snippet
}

/// Byte offset of the first word matching any query term, scanning in
/// text order so the earliest occurrence of any term wins.
fn first_match_offset(text: &str, query: &NormalizedQuery) -> Option<usize> {
    let terms = query.distinct_terms();
    if terms.is_empty() {
        return None;
    }
    let base = text.as_ptr() as usize;
    for word in text.split_whitespace() {
        let normalized = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if terms.contains(normalized.as_str()) {
            return Some(word.as_ptr() as usize - base);
        }
    }
    None
}

/// Move the window start back for context, snapping to a word boundary.
fn window_start(text: &str, match_offset: usize) -> usize {
    let mut start = match_offset;
    let mut walked = 0;
    while start > 0 && walked < LEAD_CONTEXT_CHARS {
        start -= 1;
        while start > 0 && !text.is_char_boundary(start) {
            start -= 1;
        }
        walked += 1;
    }
    // Snap forward past the partial word we landed in.
    if start > 0 {
        match text[start..].find(char::is_whitespace) {
            Some(ws) => {
                let space = start + ws;
                let width = text[space..].chars().next().map_or(1, char::len_utf8);
                space + width
            }
            None => start,
        }
    } else {
        0
    }
}

/// Up to `max_chars` characters, cut at a char boundary.
fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// When the window was cut mid-text, prefer ending at the last sentence
/// boundary past the halfway point.
fn trim_to_sentence(window: &str) -> &str {
    if window.chars().count() < MAX_SNIPPET_CHARS {
        return window;
    }
    let last_boundary = window
        .rfind(['.', '!', '?'])
        .filter(|&pos| pos > window.len() / 2);
    match last_boundary {
        Some(pos) => &window[..=pos],
        None => window,
    }
}

fn ends_with_sentence_punctuation(text: &str) -> bool {
    matches!(text.chars().last(), Some('.' | '!' | '?'))
}
