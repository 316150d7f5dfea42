//! Concurrent page fetching with per-page timeouts and deadline degradation.
//!
//! Every candidate settles as a [`Document`]: success carries extracted
//! text, any failure (network error, non-2xx, timeout, unparseable
//! content, deadline expiry) carries the `unavailable` flag instead.
//! A failed page never aborts the batch.

use crate::cache;
use crate::config::SearchConfig;
use crate::content::{extract_page, ExtractedPage};
use crate::error::{Result, SearchError};
use crate::types::{Candidate, Document};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tokio::time::Instant;

/// An HTTP fetch collaborator: `url → (title, extracted text)` or failure.
pub trait PageFetcher: Send + Sync {
    /// Fetch a page and extract its title and readable text.
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<ExtractedPage>> + Send;
}

/// Production fetcher: shared reqwest client, HTML extraction, and the
/// page-content cache.
pub struct HttpPageFetcher {
    client: reqwest::Client,
    cache_ttl_seconds: u64,
}

impl HttpPageFetcher {
    /// Build a fetcher from the request configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self> {
        Ok(Self {
            client: crate::http::build_client(config)?,
            cache_ttl_seconds: config.cache_ttl_seconds,
        })
    }
}

impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<ExtractedPage> {
        if let Some(cached) = cache::get(url, self.cache_ttl_seconds).await {
            tracing::trace!(url, "page cache hit");
            return Ok(cached);
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("fetch HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("fetch body read failed: {e}")))?;

        let page = extract_page(&html)?;
        cache::insert(url, page.clone(), self.cache_ttl_seconds).await;
        Ok(page)
    }
}

/// Fetch all candidates concurrently and settle each into a [`Document`].
///
/// Runs at most `config.fetch_concurrency` fetches in flight, each under
/// the per-page timeout. The stage completes when every fetch has settled
/// or when `deadline` is reached, whichever is first; candidates not yet
/// settled at the deadline come back as unavailable documents. Output is
/// in candidate order regardless of completion order.
pub async fn fetch_all<F: PageFetcher>(
    candidates: &[Candidate],
    fetcher: &F,
    config: &SearchConfig,
    deadline: Instant,
) -> Vec<Document> {
    // Every slot starts as the degraded document; settled fetches
    // overwrite theirs. Whatever the deadline leaves untouched is
    // already in its final unavailable form.
    let mut documents: Vec<Document> = candidates.iter().map(Document::unavailable).collect();

    let page_timeout = Duration::from_millis(config.page_timeout_ms);
    let mut settled = stream::iter(candidates.iter().enumerate().map(|(index, candidate)| {
        let url = candidate.url.clone();
        async move {
            let outcome = tokio::time::timeout(page_timeout, fetcher.fetch(&url)).await;
            (index, outcome)
        }
    }))
    .buffer_unordered(config.fetch_concurrency);

    let drain = async {
        while let Some((index, outcome)) = settled.next().await {
            let candidate = &candidates[index];
            match outcome {
                Ok(Ok(page)) => {
                    documents[index] = document_from_page(candidate, page);
                }
                Ok(Err(err)) => {
                    tracing::debug!(url = %candidate.url, error = %err, "page fetch failed");
                }
                Err(_) => {
                    tracing::debug!(url = %candidate.url, "page fetch timed out");
                }
            }
        }
    };

    if tokio::time::timeout_at(deadline, drain).await.is_err() {
        tracing::warn!("request deadline reached, abandoning unsettled fetches");
    }

    documents
}

fn document_from_page(candidate: &Candidate, page: ExtractedPage) -> Document {
    let title = if !page.title.is_empty() {
        page.title
    } else if !candidate.title.is_empty() {
        candidate.title.clone()
    } else {
        candidate.url.clone()
    };

    Document {
        url: candidate.url.clone(),
        title,
        snippet: candidate.snippet.clone(),
        text: page.text,
        unavailable: false,
        rank: candidate.rank,
    }
}
