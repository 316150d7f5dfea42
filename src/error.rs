//! Error types for the ranking core.
//!
//! Per-page fetch failures are never surfaced as errors — they degrade the
//! affected result to `preview_unavailable` instead. Errors here are reserved
//! for conditions that prevent the pipeline from producing a response at all.

/// Errors that can occur while serving a search request.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The candidate retriever collaborator was unreachable or returned
    /// an unusable response. Fatal: without candidates there is nothing
    /// to fetch or score.
    #[error("retriever failed: {0}")]
    Retriever(String),

    /// An HTTP request failed (client construction, connection, non-2xx).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse an HTML response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for ranking-core results.
pub type Result<T> = std::result::Result<T, SearchError>;
