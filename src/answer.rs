//! Optional answer-generation collaborator.
//!
//! The answer generator is a black box `query → natural-language answer`
//! invoked concurrently with the ranking pipeline on its own budget.
//! Ranking is the primary contract: generator failure or timeout only
//! drops `ai_answer` from the response, it never fails the request.

use crate::error::SearchError;
use std::time::Duration;

/// A pluggable answer generator.
///
/// Returning `Ok(None)` means "no answer available" (for example the
/// generator is disabled); `Err` means the generator failed. Both are
/// non-fatal to the search request.
pub trait AnswerGenerator: Send + Sync {
    /// Produce a natural-language answer for the raw query.
    fn answer(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, SearchError>> + Send;
}

/// Generator used when answer generation is disabled.
pub struct NoAnswerGenerator;

impl AnswerGenerator for NoAnswerGenerator {
    async fn answer(&self, _query: &str) -> Result<Option<String>, SearchError> {
        Ok(None)
    }
}

/// Run the generator under its budget, collapsing timeout and failure
/// into `None`.
pub async fn answer_within_budget<A: AnswerGenerator>(
    generator: &A,
    query: &str,
    budget_ms: u64,
) -> Option<String> {
    let budget = Duration::from_millis(budget_ms);
    match tokio::time::timeout(budget, generator.answer(query)).await {
        Ok(Ok(answer)) => answer,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "answer generator failed");
            None
        }
        Err(_) => {
            tracing::warn!(budget_ms, "answer generator timed out");
            None
        }
    }
}
