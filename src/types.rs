//! Core types: candidates, documents, scored results, and the response payload.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Which score drives the final ordering of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    /// Weighted blend of cosine and TF-IDF term score (the default).
    Combined,
    /// Cosine similarity between query and document TF-IDF vectors.
    Cosine,
    /// Average TF-IDF weight of query terms present in the document.
    Tfidf,
}

impl RankingMode {
    /// Returns the wire-format name of this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Combined => "combined",
            Self::Cosine => "cosine",
            Self::Tfidf => "tfidf",
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A candidate URL produced by the retriever, not yet fetched.
///
/// `rank` is the 0-based position in the retriever's ordering; it is the
/// tie-break key throughout the pipeline, so output stays deterministic.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Target URL to fetch.
    pub url: String,
    /// Title as reported by the retriever (may be empty).
    pub title: String,
    /// Snippet as reported by the retriever (may be empty).
    pub snippet: String,
    /// 0-based retrieval position.
    pub rank: usize,
}

/// A fetched (or failed) candidate with its extracted text.
///
/// Lives only for the duration of one request: the full `text` is consumed
/// by the scorer and never serialized.
#[derive(Debug, Clone)]
pub struct Document {
    pub url: String,
    pub title: String,
    /// Snippet carried from the retriever; replaced by a query-aware
    /// excerpt during result assembly when full text is available.
    pub snippet: String,
    /// Extracted page text. Empty when `unavailable` is true.
    pub text: String,
    /// True when the fetch or extraction failed (network error, non-2xx,
    /// timeout, unparseable content, or deadline expiry).
    pub unavailable: bool,
    /// Retrieval position of the originating candidate.
    pub rank: usize,
}

impl Document {
    /// Build the degraded form of a candidate whose fetch failed.
    ///
    /// Falls back to the retriever-provided title/snippet, and to the URL
    /// itself when the retriever gave no title.
    pub fn unavailable(candidate: &Candidate) -> Self {
        let title = if candidate.title.is_empty() {
            candidate.url.clone()
        } else {
            candidate.title.clone()
        };
        Self {
            url: candidate.url.clone(),
            title,
            snippet: candidate.snippet.clone(),
            text: String::new(),
            unavailable: true,
            rank: candidate.rank,
        }
    }
}

/// A ranked result with its three scores, ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    pub title: String,
    pub url: String,
    /// Host of `url`, or the full URL string when it cannot be parsed.
    pub domain: String,
    pub snippet: String,
    /// Cosine similarity in `[0, 1]`; 0 when no terms overlap.
    pub cosine_score: f64,
    /// Scaled average TF-IDF of matched query terms, in `[0, 1]`.
    pub tfidf_term_score: f64,
    /// `alpha * cosine_score + (1 - alpha) * tfidf_term_score`.
    pub combined_score: f64,
    /// Present and true when the page could not be fetched or extracted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_unavailable: Option<bool>,
}

/// The complete response for one search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Echo of the raw query.
    pub query: String,
    /// Opaque natural-language answer from the answer generator, when it
    /// completed within its budget.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_answer: Option<String>,
    /// Advisory correction; never substituted automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelling_suggestion: Option<String>,
    /// True exactly when the successfully fetched corpus was empty.
    pub no_results: bool,
    /// Ranked results, at most `num_results` long.
    pub results: Vec<ScoredResult>,
}

/// Derive a display domain from a URL, falling back to the raw string.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
