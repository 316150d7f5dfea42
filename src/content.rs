//! HTML content extraction — visible text and title, boilerplate stripped.
//!
//! Turns a fetched page body into the text the scorer vectorizes. Script,
//! style, and navigation chrome are removed before parsing; the main
//! content area is preferred over the raw body.

use crate::error::{Result, SearchError};
use scraper::{Html, Selector};

/// Cap on extracted text length. Pages beyond this do not add useful
/// ranking signal, they only slow down vectorization.
pub const MAX_TEXT_CHARS: usize = 100_000;

/// Title and readable text pulled out of one page.
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// Contents of the `<title>` element, possibly empty.
    pub title: String,
    /// Cleaned visible text, whitespace-collapsed, length-capped.
    pub text: String,
}

/// Extract the title and readable text from raw HTML.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] when the page yields no visible text
/// at all (callers treat this the same as a fetch failure).
pub fn extract_page(html: &str) -> Result<ExtractedPage> {
    let cleaned = strip_excluded_tags(html);
    let document = Html::parse_document(&cleaned);

    let title = select_title(&document);
    let text = collapse_whitespace(&select_main_text(&document));
    if text.is_empty() {
        return Err(SearchError::Parse("no extractable content found".into()));
    }

    Ok(ExtractedPage {
        title,
        text: truncate_at_char_boundary(&text, MAX_TEXT_CHARS),
    })
}

fn select_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
        .trim()
        .to_owned()
}

/// Text of the main content area, trying content-specific selectors in
/// priority order before falling back to `<body>`.
fn select_main_text(document: &Html) -> String {
    for selector_str in ["article", "main", "[role=\"main\"]", "body"] {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text: String = element.text().collect::<Vec<_>>().join(" ");
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return trimmed.to_owned();
            }
        }
    }
    String::new()
}

/// Tags removed together with their content before parsing.
const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "noscript", "svg", "iframe",
];

fn strip_excluded_tags(html: &str) -> String {
    let mut result = html.to_owned();
    for tag in EXCLUDED_TAGS {
        result = strip_tag(&result, tag);
    }
    result
}

/// Remove every `<tag>…</tag>` block, case-insensitively.
fn strip_tag(html: &str, tag: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let lower = html.to_lowercase();
    let open_tag = format!("<{tag}");
    let close_tag = format!("</{tag}>");

    let mut pos = 0;
    loop {
        let start = match lower[pos..].find(&open_tag) {
            Some(offset) => pos + offset,
            None => {
                result.push_str(&html[pos..]);
                break;
            }
        };

        // Make sure this is the target tag and not a longer name sharing
        // the prefix (e.g. <navigate> for <nav>).
        let after_tag = start + open_tag.len();
        if after_tag < lower.len() {
            let next_byte = lower.as_bytes()[after_tag];
            if !matches!(next_byte, b' ' | b'>' | b'/' | b'\n' | b'\r' | b'\t') {
                result.push_str(&html[pos..after_tag]);
                pos = after_tag;
                continue;
            }
        }

        result.push_str(&html[pos..start]);

        let end = match lower[start..].find(&close_tag) {
            Some(offset) => start + offset + close_tag.len(),
            None => {
                // Unclosed tag: drop just the opening tag itself.
                match lower[start..].find('>') {
                    Some(offset) => start + offset + 1,
                    None => html.len(),
                }
            }
        };

        pos = end;
    }

    result
}

/// Collapse runs of whitespace to single spaces and trim each line.
fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(ch);
            prev_was_space = false;
        }
    }

    result.trim().to_owned()
}

fn truncate_at_char_boundary(text: &str, max_chars: usize) -> String {
    if text.len() <= max_chars {
        return text.to_owned();
    }
    let mut end = max_chars;
    while !text.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    text[..end].to_owned()
}
