//! Request orchestration: normalize → retrieve → fetch → score → rank.
//!
//! The answer generator runs concurrently with retrieval and fetching;
//! the response waits on ranking only. Scoring starts strictly after
//! every fetch has settled or the deadline has passed — partial corpora
//! are never scored mid-flight.

use crate::answer::{answer_within_budget, AnswerGenerator};
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::fetch::{fetch_all, PageFetcher};
use crate::query::NormalizedQuery;
use crate::retriever::{bound_candidates, Retriever};
use crate::spelling;
use crate::types::SearchResponse;
use std::time::Duration;
use tokio::time::Instant;

use super::rank::assemble_results;
use super::scoring::score_documents;

/// Serve one search request with explicit collaborators.
///
/// # Pipeline
///
/// 1. Normalize the query and compute the spelling suggestion
/// 2. Retrieve candidates (fatal on failure), dedup and bound them
/// 3. Fetch all candidates concurrently under the request deadline
/// 4. Join barrier: score the settled documents against the query
/// 5. Rank per the configured mode, truncate, assemble the response
///
/// The answer generator runs alongside steps 2-3 on its own budget and
/// is merged in if it finished; its failure never fails the request.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for invalid configuration or an
/// empty query, and [`SearchError::Retriever`] when the candidate
/// source is unreachable. Page-level failures are degraded, not raised.
pub async fn run_search<R, F, A>(
    raw_query: &str,
    config: &SearchConfig,
    retriever: &R,
    fetcher: &F,
    answerer: &A,
) -> Result<SearchResponse>
where
    R: Retriever,
    F: PageFetcher,
    A: AnswerGenerator,
{
    config.validate()?;

    let trimmed = raw_query.trim();
    if trimmed.is_empty() {
        return Err(SearchError::Config("query must not be empty".into()));
    }

    let deadline = Instant::now() + Duration::from_millis(config.request_budget_ms);
    let query = NormalizedQuery::new(trimmed);
    let spelling_suggestion = spelling::suggest(&query);

    let ranking_stage = async {
        let raw_candidates = retriever.retrieve(&query, config).await?;
        let candidates = bound_candidates(raw_candidates, config);
        tracing::debug!(count = candidates.len(), "candidates bounded");
        Ok::<_, SearchError>(fetch_all(&candidates, fetcher, config, deadline).await)
    };
    let answer_stage = answer_within_budget(answerer, trimmed, config.answer_budget_ms);

    let (documents, ai_answer) = tokio::join!(ranking_stage, answer_stage);
    let documents = documents?;

    let scores = score_documents(&query, &documents, config.clamped_alpha());
    let no_results = documents.iter().all(|d| d.unavailable);
    let results = assemble_results(&query, &documents, &scores, config);

    tracing::debug!(
        total = documents.len(),
        returned = results.len(),
        no_results,
        "search complete"
    );

    Ok(SearchResponse {
        query: trimmed.to_owned(),
        ai_answer,
        spelling_suggestion,
        no_results,
        results,
    })
}
