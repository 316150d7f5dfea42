//! Ranking and result assembly.
//!
//! Selects the active metric for the caller's ranking mode, stable-sorts
//! descending with retrieval order as the tie-break, truncates to
//! `num_results`, and materialises the serializable result records.
//!
//! Inclusion policy: when the corpus is empty the result list is empty
//! (`no_results` covers it); otherwise unavailable documents appear as
//! zero-scored, flagged entries that count against `num_results` and sink
//! below every scored document.

use crate::config::SearchConfig;
use crate::query::NormalizedQuery;
use crate::types::{domain_of, Document, RankingMode, ScoredResult};

use super::scoring::DocumentScores;
use super::snippet::build_snippet;

/// Pure metric selector for a ranking mode. The mode set is closed, so
/// this is a match, not a trait hierarchy.
fn metric_for(mode: RankingMode) -> fn(&ScoredResult) -> f64 {
    match mode {
        RankingMode::Combined => |r| r.combined_score,
        RankingMode::Cosine => |r| r.cosine_score,
        RankingMode::Tfidf => |r| r.tfidf_term_score,
    }
}

/// Assemble, rank, and truncate the final result list.
///
/// `documents` and `scores` are parallel slices in candidate order.
/// Returns an empty list when no document was successfully fetched.
pub fn assemble_results(
    query: &NormalizedQuery,
    documents: &[Document],
    scores: &[DocumentScores],
    config: &SearchConfig,
) -> Vec<ScoredResult> {
    debug_assert_eq!(documents.len(), scores.len());

    if documents.iter().all(|d| d.unavailable) {
        return Vec::new();
    }

    let alpha = config.clamped_alpha();
    let mut ranked: Vec<(usize, ScoredResult)> = documents
        .iter()
        .zip(scores.iter())
        .map(|(doc, score)| (doc.rank, to_result(query, doc, score, alpha)))
        .collect();

    let metric = metric_for(config.ranking);
    ranked.sort_by(|(rank_a, a), (rank_b, b)| {
        metric(b)
            .partial_cmp(&metric(a))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| rank_a.cmp(rank_b))
    });

    ranked
        .into_iter()
        .take(config.num_results)
        .map(|(_, result)| result)
        .collect()
}

/// Materialise one result record with rounded scores.
///
/// `cosine_score` and `tfidf_term_score` are rounded to four decimals
/// first and the combined score is recomputed from the rounded values,
/// so the blend identity holds exactly on the wire.
fn to_result(
    query: &NormalizedQuery,
    doc: &Document,
    scores: &DocumentScores,
    alpha: f64,
) -> ScoredResult {
    let (cosine, tfidf_term, combined) = if doc.unavailable {
        (0.0, 0.0, 0.0)
    } else {
        let cosine = round4(scores.cosine);
        let tfidf_term = round4(scores.tfidf_term);
        (cosine, tfidf_term, alpha * cosine + (1.0 - alpha) * tfidf_term)
    };

    ScoredResult {
        title: doc.title.clone(),
        url: doc.url.clone(),
        domain: domain_of(&doc.url),
        snippet: build_snippet(&doc.text, query, &doc.snippet),
        cosine_score: cosine,
        tfidf_term_score: tfidf_term,
        combined_score: combined,
        preview_unavailable: doc.unavailable.then_some(true),
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
