//! # chatrank-core
//!
//! Embedded web search with vector-space ranking.
//!
//! This crate retrieves candidate pages for a query, fetches and extracts
//! their main text concurrently, scores each page against the query with
//! TF-IDF cosine similarity blended with a per-term TF-IDF average, and
//! returns a ranked, truncated result list — no API keys, no external
//! ranking service, no persistent index.
//!
//! ## Design
//!
//! - Scrapes DuckDuckGo for candidates using CSS selectors on HTML responses
//! - Fetches candidate pages concurrently with a bounded fan-out and a
//!   hard per-request deadline; pages that fail or time out degrade to
//!   zero-scored placeholders instead of failing the request
//! - Scores over the per-request corpus only; repeated scoring of the
//!   same inputs is bit-identical
//! - Optional AI answer generation runs concurrently on its own budget
//!   and never delays or fails ranking
//! - In-memory LRU page cache with configurable TTL
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners — this is a library, not a server
//! - Search queries are logged only at debug level
//! - Page text is extracted from HTML, never executed or rendered

pub mod answer;
pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod fetch;
pub mod http;
pub mod pipeline;
pub mod query;
pub mod retriever;
pub mod retrievers;
pub mod spelling;
pub mod types;

pub use answer::{AnswerGenerator, NoAnswerGenerator};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use fetch::{HttpPageFetcher, PageFetcher};
pub use pipeline::search::run_search;
pub use retriever::Retriever;
pub use retrievers::duckduckgo::DuckDuckGoRetriever;
pub use types::{Candidate, Document, RankingMode, ScoredResult, SearchResponse};

/// Search the web and rank the results for `query`.
///
/// Retrieves candidates from DuckDuckGo, fetches up to
/// `config.candidate_limit()` pages concurrently, scores them with the
/// configured ranking mode, and returns up to `config.num_results`
/// results. No AI answer is generated; use [`run_search`] with your own
/// [`AnswerGenerator`] for that.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for invalid configuration or an
/// empty query, and [`SearchError::Retriever`] if the candidate source
/// is unreachable. Individual page failures degrade to zero-scored
/// placeholder results and do not fail the search.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> chatrank_core::Result<()> {
/// let config = chatrank_core::SearchConfig::default();
/// let response = chatrank_core::search("rust programming", &config).await?;
/// for result in &response.results {
///     println!("{:.4} {}: {}", result.combined_score, result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Result<SearchResponse> {
    config.validate()?;
    let fetcher = HttpPageFetcher::new(config)?;
    run_search(query, config, &DuckDuckGoRetriever, &fetcher, &NoAnswerGenerator).await
}

/// Search with default configuration.
///
/// Convenience wrapper around [`search`] using [`SearchConfig::default()`].
///
/// # Errors
///
/// Same as [`search`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> chatrank_core::Result<()> {
/// let response = chatrank_core::search_default("weather today").await?;
/// println!("{} results", response.results.len());
/// # Ok(())
/// # }
/// ```
pub async fn search_default(query: &str) -> Result<SearchResponse> {
    search(query, &SearchConfig::default()).await
}
