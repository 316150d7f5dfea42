//! Vector-space scoring: request-local TF-IDF vectors, cosine similarity,
//! and the averaged query-term score.
//!
//! The corpus is exactly the successfully fetched documents of one
//! request. IDF uses `ln(N / (1 + df))`; the `+1` smoothing means terms
//! appearing in every document get a negative weight, which is accepted
//! and drives their scores toward zero instead of being special-cased.

use crate::query::{tokenize, NormalizedQuery};
use crate::types::Document;
use std::collections::{BTreeMap, HashMap, HashSet};

/// The three per-document scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentScores {
    pub cosine: f64,
    pub tfidf_term: f64,
    pub combined: f64,
}

impl DocumentScores {
    const ZERO: Self = Self {
        cosine: 0.0,
        tfidf_term: 0.0,
        combined: 0.0,
    };
}

/// A sparse term-weight vector.
///
/// Backed by a [`BTreeMap`] so summation order is fixed and repeated
/// scoring of identical inputs is bit-for-bit identical.
#[derive(Debug, Clone, Default)]
pub(crate) struct TermVector(BTreeMap<String, f64>);

impl TermVector {
    fn weight(&self, term: &str) -> f64 {
        self.0.get(term).copied().unwrap_or(0.0)
    }

    fn norm(&self) -> f64 {
        self.0.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    fn dot(&self, other: &Self) -> f64 {
        // Iterate the smaller vector.
        let (small, large) = if self.0.len() <= other.0.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .0
            .iter()
            .map(|(term, w)| w * large.weight(term))
            .sum()
    }

    fn from_counts(counts: &HashMap<&str, usize>, idf: &HashMap<&str, f64>, corpus_size: usize) -> Self {
        let fallback_idf = (corpus_size as f64).ln();
        Self(
            counts
                .iter()
                .map(|(term, count)| {
                    let weight = *count as f64 * idf.get(term).copied().unwrap_or(fallback_idf);
                    ((*term).to_owned(), weight)
                })
                .collect(),
        )
    }
}

/// Score every document against the query.
///
/// Returns one [`DocumentScores`] per input document, in input order.
/// Unavailable documents contribute nothing to the corpus statistics and
/// always score zero. `alpha` is assumed pre-clamped to `[0, 1]`.
pub fn score_documents(
    query: &NormalizedQuery,
    documents: &[Document],
    alpha: f64,
) -> Vec<DocumentScores> {
    let corpus: Vec<(usize, Vec<String>)> = documents
        .iter()
        .enumerate()
        .filter(|(_, d)| !d.unavailable)
        .map(|(i, d)| (i, tokenize(&d.text)))
        .collect();

    let mut scores = vec![DocumentScores::ZERO; documents.len()];
    if corpus.is_empty() || query.is_empty() {
        return scores;
    }

    let n = corpus.len();
    let idf = compute_idf(&corpus, n);

    // Query vector over the same IDF table. Query terms absent from the
    // corpus keep df = 0, i.e. idf = ln(N).
    let query_counts = term_counts(&query.terms);
    let query_vector = TermVector::from_counts(&query_counts, &idf, n);
    let query_norm = query_vector.norm();
    let distinct_query_terms = query.distinct_terms();

    let mut raw_term_scores = vec![0.0; documents.len()];
    let mut cosines = vec![0.0; documents.len()];

    for (index, terms) in &corpus {
        let counts = term_counts(terms);
        let vector = TermVector::from_counts(&counts, &idf, n);

        let doc_norm = vector.norm();
        cosines[*index] = if query_norm > 0.0 && doc_norm > 0.0 {
            (query_vector.dot(&vector) / (query_norm * doc_norm)).clamp(0.0, 1.0)
        } else {
            0.0
        };

        // Average TF-IDF of the distinct query terms present in this
        // document; an average so it stays comparable across query lengths.
        let matched_sum: f64 = distinct_query_terms
            .iter()
            .map(|term| vector.weight(term))
            .filter(|w| *w != 0.0)
            .sum();
        raw_term_scores[*index] = matched_sum / distinct_query_terms.len() as f64;
    }

    // Scale term scores into [0, 1] by the request's maximum. Zero stays
    // exactly zero, so no-overlap documents keep a hard 0.
    let max_raw = raw_term_scores.iter().cloned().fold(0.0_f64, f64::max);

    for (index, _) in &corpus {
        let tfidf_term = if max_raw > 0.0 {
            (raw_term_scores[*index] / max_raw).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let cosine = cosines[*index];
        scores[*index] = DocumentScores {
            cosine,
            tfidf_term,
            combined: alpha * cosine + (1.0 - alpha) * tfidf_term,
        };
    }

    scores
}

/// `idf(t) = ln(N / (1 + df(t)))` over the distinct terms of each document.
fn compute_idf<'a>(corpus: &'a [(usize, Vec<String>)], n: usize) -> HashMap<&'a str, f64> {
    let mut df: HashMap<&str, usize> = HashMap::new();
    for (_, terms) in corpus {
        let distinct: HashSet<&str> = terms.iter().map(String::as_str).collect();
        for term in distinct {
            *df.entry(term).or_insert(0) += 1;
        }
    }
    df.into_iter()
        .map(|(term, df)| (term, (n as f64 / (1.0 + df as f64)).ln()))
        .collect()
}

fn term_counts(terms: &[String]) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0) += 1;
    }
    counts
}
