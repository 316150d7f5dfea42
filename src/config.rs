//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls result count, ranking mode, score blending,
//! fetch concurrency, and the request's time budgets. The per-page timeout
//! must stay strictly below the overall budget so a single slow page can
//! never consume the whole request.

use crate::error::SearchError;
use crate::types::RankingMode;

/// Configuration for one search request.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of ranked results to return.
    pub num_results: usize,
    /// Which score orders the final result list.
    pub ranking: RankingMode,
    /// Blend weight for the combined score. Clamped to `[0, 1]` at use,
    /// never rejected.
    pub alpha: f64,
    /// Candidate oversampling factor: the retriever is asked for
    /// `num_results * oversample_factor` URLs to absorb fetch failures.
    pub oversample_factor: usize,
    /// Maximum number of page fetches in flight at once.
    pub fetch_concurrency: usize,
    /// Per-page fetch timeout in milliseconds. Must be strictly smaller
    /// than `request_budget_ms`.
    pub page_timeout_ms: u64,
    /// Overall request deadline in milliseconds. On expiry, unsettled
    /// fetches are abandoned and scoring proceeds with what exists.
    pub request_budget_ms: u64,
    /// Separate budget for the optional answer generator.
    pub answer_budget_ms: u64,
    /// TTL for cached page content in seconds. 0 disables the cache.
    pub cache_ttl_seconds: u64,
    /// Whether to request safe-search filtering from the retriever.
    pub safe_search: bool,
    /// Custom User-Agent string. If `None`, rotates through a built-in
    /// list of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            num_results: 5,
            ranking: RankingMode::Combined,
            alpha: 0.6,
            oversample_factor: 3,
            fetch_concurrency: 8,
            page_timeout_ms: 3_000,
            request_budget_ms: 60_000,
            answer_budget_ms: 15_000,
            cache_ttl_seconds: 600,
            safe_search: true,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Upper bound on the candidate list requested from the retriever.
    pub fn candidate_limit(&self) -> usize {
        self.num_results.saturating_mul(self.oversample_factor)
    }

    /// The blend weight clamped into `[0, 1]`.
    pub fn clamped_alpha(&self) -> f64 {
        self.alpha.clamp(0.0, 1.0)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `num_results` must be greater than 0
    /// - `oversample_factor` must be greater than 0
    /// - `fetch_concurrency` must be greater than 0
    /// - `page_timeout_ms` must be greater than 0 and strictly smaller
    ///   than `request_budget_ms`
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.num_results == 0 {
            return Err(SearchError::Config(
                "num_results must be greater than 0".into(),
            ));
        }
        if self.oversample_factor == 0 {
            return Err(SearchError::Config(
                "oversample_factor must be greater than 0".into(),
            ));
        }
        if self.fetch_concurrency == 0 {
            return Err(SearchError::Config(
                "fetch_concurrency must be greater than 0".into(),
            ));
        }
        if self.page_timeout_ms == 0 {
            return Err(SearchError::Config(
                "page_timeout_ms must be greater than 0".into(),
            ));
        }
        if self.page_timeout_ms >= self.request_budget_ms {
            return Err(SearchError::Config(
                "page_timeout_ms must be strictly smaller than request_budget_ms".into(),
            ));
        }
        Ok(())
    }
}
