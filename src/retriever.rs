//! Candidate retrieval: collaborator trait plus the ordering/dedup contract.
//!
//! The retrieval source (search API, seed list, local index) is external;
//! this module pins down its contract: deterministic ordering for a given
//! query, no duplicate URLs, and a bounded list size even when the source
//! returns more.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::pipeline::url_normalize::normalize_url;
use crate::query::NormalizedQuery;
use crate::types::Candidate;
use std::collections::HashSet;

/// A pluggable candidate source.
///
/// Implementors turn a normalized query into an ordered URL list. The
/// orchestrator applies dedup and bounding on top, so implementations only
/// need to produce a best-effort ordering.
///
/// All implementations must be `Send + Sync` so retrieval can run
/// concurrently with the answer generator.
pub trait Retriever: Send + Sync {
    /// Produce candidate URLs for a query, best first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Retriever`] (or `Http`/`Parse` for transport
    /// problems) when the source is unreachable. This is the one fatal
    /// failure in the pipeline.
    fn retrieve(
        &self,
        query: &NormalizedQuery,
        config: &SearchConfig,
    ) -> impl std::future::Future<Output = Result<Vec<Candidate>, SearchError>> + Send;
}

/// Enforce the retriever contract on a raw candidate list.
///
/// Keeps the first occurrence of each normalized URL, truncates to
/// `config.candidate_limit()`, and reassigns `rank` to the surviving
/// order. Source order is otherwise preserved, which is what makes the
/// downstream tie-break deterministic.
pub fn bound_candidates(raw: Vec<Candidate>, config: &SearchConfig) -> Vec<Candidate> {
    let limit = config.candidate_limit();
    let mut seen: HashSet<String> = HashSet::new();
    let mut bounded = Vec::with_capacity(limit.min(raw.len()));

    for mut candidate in raw {
        if bounded.len() >= limit {
            break;
        }
        if seen.insert(normalize_url(&candidate.url)) {
            candidate.rank = bounded.len();
            bounded.push(candidate);
        }
    }

    bounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RankingMode;

    fn candidate(url: &str) -> Candidate {
        Candidate {
            url: url.into(),
            title: format!("Title for {url}"),
            snippet: String::new(),
            rank: 0,
        }
    }

    fn config(num_results: usize, oversample: usize) -> SearchConfig {
        SearchConfig {
            num_results,
            oversample_factor: oversample,
            ranking: RankingMode::Combined,
            ..Default::default()
        }
    }

    #[test]
    fn unique_urls_pass_through_in_order() {
        let raw = vec![candidate("https://a.com"), candidate("https://b.com")];
        let bounded = bound_candidates(raw, &config(5, 3));
        assert_eq!(bounded.len(), 2);
        assert_eq!(bounded[0].url, "https://a.com");
        assert_eq!(bounded[1].url, "https://b.com");
    }

    #[test]
    fn duplicates_dropped_keeping_first() {
        let raw = vec![
            candidate("https://a.com/page"),
            candidate("https://b.com"),
            candidate("https://a.com/page"),
        ];
        let bounded = bound_candidates(raw, &config(5, 3));
        assert_eq!(bounded.len(), 2);
        assert_eq!(bounded[0].url, "https://a.com/page");
    }

    #[test]
    fn equivalent_urls_deduplicate() {
        let raw = vec![
            candidate("https://Example.COM/path/"),
            candidate("https://example.com/path?utm_source=x"),
        ];
        let bounded = bound_candidates(raw, &config(5, 3));
        assert_eq!(bounded.len(), 1);
    }

    #[test]
    fn list_bounded_to_oversampled_limit() {
        let raw: Vec<Candidate> = (0..50)
            .map(|i| candidate(&format!("https://site{i}.com")))
            .collect();
        let bounded = bound_candidates(raw, &config(5, 3));
        assert_eq!(bounded.len(), 15);
    }

    #[test]
    fn ranks_reassigned_after_dedup() {
        let raw = vec![
            candidate("https://a.com"),
            candidate("https://a.com"),
            candidate("https://b.com"),
        ];
        let bounded = bound_candidates(raw, &config(5, 3));
        assert_eq!(bounded[0].rank, 0);
        assert_eq!(bounded[1].rank, 1);
        assert_eq!(bounded[1].url, "https://b.com");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(bound_candidates(vec![], &config(5, 3)).is_empty());
    }
}
