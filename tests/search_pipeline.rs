//! Integration tests for the full search pipeline.
//!
//! These tests exercise normalize → retrieve → fetch → score → rank →
//! assemble end to end using synthetic collaborators (no network
//! calls). Live retrieval tests live next to the DuckDuckGo retriever
//! and are marked `#[ignore]`.

use chatrank_core::content::ExtractedPage;
use chatrank_core::query::NormalizedQuery;
use chatrank_core::{
    run_search, Candidate, NoAnswerGenerator, PageFetcher, RankingMode, Result, Retriever,
    SearchConfig, SearchResponse,
};
use std::collections::HashMap;

struct FixedRetriever {
    candidates: Vec<Candidate>,
}

impl FixedRetriever {
    fn new(urls: &[&str]) -> Self {
        let candidates = urls
            .iter()
            .enumerate()
            .map(|(rank, url)| Candidate {
                url: (*url).to_owned(),
                title: format!("Result {rank}"),
                snippet: format!("Retriever snippet {rank}"),
                rank,
            })
            .collect();
        Self { candidates }
    }
}

impl Retriever for FixedRetriever {
    async fn retrieve(
        &self,
        _query: &NormalizedQuery,
        _config: &SearchConfig,
    ) -> Result<Vec<Candidate>> {
        Ok(self.candidates.clone())
    }
}

struct MapFetcher {
    pages: HashMap<String, String>,
}

impl MapFetcher {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, text)| ((*url).to_owned(), (*text).to_owned()))
                .collect(),
        }
    }
}

impl PageFetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<ExtractedPage> {
        self.pages
            .get(url)
            .map(|text| ExtractedPage {
                title: format!("Page: {url}"),
                text: text.clone(),
            })
            .ok_or_else(|| chatrank_core::SearchError::Http("unreachable".into()))
    }
}

struct HangingFetcher;

impl PageFetcher for HangingFetcher {
    async fn fetch(&self, _url: &str) -> Result<ExtractedPage> {
        std::future::pending().await
    }
}

fn test_config() -> SearchConfig {
    SearchConfig {
        cache_ttl_seconds: 0,
        ..Default::default()
    }
}

fn three_doc_corpus() -> (FixedRetriever, MapFetcher) {
    let retriever = FixedRetriever::new(&["https://a.com", "https://b.com", "https://c.com"]);
    let fetcher = MapFetcher::new(&[
        (
            "https://a.com",
            "machine learning is a field of study concerned with learning from data \
             and learning representations",
        ),
        (
            "https://b.com",
            "an introduction to deep learning for beginners covering the basics \
             of supervised methods",
        ),
        (
            "https://c.com",
            "weekend gardening notes on soil preparation and seasonal planting",
        ),
    ]);
    (retriever, fetcher)
}

async fn run(config: &SearchConfig) -> SearchResponse {
    let (retriever, fetcher) = three_doc_corpus();
    run_search(
        "machine learning",
        config,
        &retriever,
        &fetcher,
        &NoAnswerGenerator,
    )
    .await
    .expect("search should succeed")
}

#[tokio::test]
async fn combined_score_is_the_alpha_blend_of_reported_components() {
    let config = test_config();
    let response = run(&config).await;
    assert!(!response.results.is_empty());

    for result in &response.results {
        let expected = 0.6 * result.cosine_score + 0.4 * result.tfidf_term_score;
        assert!(
            (result.combined_score - expected).abs() < 1e-9,
            "blend identity broken for {}: {} vs {}",
            result.url,
            result.combined_score,
            expected
        );
    }
}

#[tokio::test]
async fn all_scores_stay_within_unit_interval() {
    let response = run(&test_config()).await;
    for result in &response.results {
        assert!((0.0..=1.0).contains(&result.cosine_score), "{result:?}");
        assert!((0.0..=1.0).contains(&result.tfidf_term_score), "{result:?}");
        assert!((0.0..=1.0).contains(&result.combined_score), "{result:?}");
    }
}

#[tokio::test]
async fn no_overlap_page_scores_exactly_zero_and_ranks_last() {
    let response = run(&test_config()).await;
    let last = response.results.last().expect("results present");
    assert_eq!(last.url, "https://c.com");
    assert_eq!(last.cosine_score, 0.0);
    assert_eq!(last.tfidf_term_score, 0.0);
    assert_eq!(last.combined_score, 0.0);
}

#[tokio::test]
async fn repeated_searches_are_bit_identical() {
    let config = test_config();
    let first = run(&config).await;
    let second = run(&config).await;

    let first = serde_json::to_value(&first).expect("serialize");
    let second = serde_json::to_value(&second).expect("serialize");
    assert_eq!(first, second);
}

#[tokio::test]
async fn results_truncated_to_num_results() {
    let retriever = FixedRetriever::new(&[
        "https://one.com",
        "https://two.com",
        "https://three.com",
        "https://four.com",
    ]);
    let fetcher = MapFetcher::new(&[
        ("https://one.com", "alpha beta gamma"),
        ("https://two.com", "alpha beta delta"),
        ("https://three.com", "alpha epsilon"),
        ("https://four.com", "zeta eta theta"),
    ]);
    let config = SearchConfig {
        num_results: 2,
        ..test_config()
    };

    let response = run_search("alpha beta", &config, &retriever, &fetcher, &NoAnswerGenerator)
        .await
        .expect("search should succeed");
    assert_eq!(response.results.len(), 2);
}

#[tokio::test]
async fn ranking_follows_the_configured_mode() {
    for (mode, metric) in [
        (
            RankingMode::Cosine,
            (|r| r.cosine_score) as fn(&chatrank_core::ScoredResult) -> f64,
        ),
        (RankingMode::Tfidf, |r| r.tfidf_term_score),
        (RankingMode::Combined, |r| r.combined_score),
    ] {
        let config = SearchConfig {
            ranking: mode,
            ..test_config()
        };
        let response = run(&config).await;
        let metrics: Vec<f64> = response.results.iter().map(metric).collect();
        let mut sorted = metrics.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(metrics, sorted, "results not ordered by {mode} metric");
    }
}

#[tokio::test]
async fn alpha_extremes_collapse_the_blend() {
    let zero = run(&SearchConfig {
        alpha: 0.0,
        ..test_config()
    })
    .await;
    for result in &zero.results {
        assert_eq!(result.combined_score, result.tfidf_term_score);
    }

    let one = run(&SearchConfig {
        alpha: 1.0,
        ..test_config()
    })
    .await;
    for result in &one.results {
        assert_eq!(result.combined_score, result.cosine_score);
    }
}

#[tokio::test]
async fn out_of_range_alpha_is_clamped() {
    let high = run(&SearchConfig {
        alpha: 1.5,
        ..test_config()
    })
    .await;
    let pinned = run(&SearchConfig {
        alpha: 1.0,
        ..test_config()
    })
    .await;
    for (a, b) in high.results.iter().zip(pinned.results.iter()) {
        assert_eq!(a.combined_score, b.combined_score);
    }
}

#[tokio::test(start_paused = true)]
async fn every_page_timing_out_yields_no_results() {
    let retriever = FixedRetriever::new(&[
        "https://a.com",
        "https://b.com",
        "https://c.com",
        "https://d.com",
        "https://e.com",
    ]);
    let response = run_search(
        "anything at all",
        &test_config(),
        &retriever,
        &HangingFetcher,
        &NoAnswerGenerator,
    )
    .await
    .expect("degradation, not failure");

    assert!(response.no_results);
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn failed_page_counts_against_num_results_and_is_flagged() {
    let retriever =
        FixedRetriever::new(&["https://up1.com", "https://down.com", "https://up2.com"]);
    let fetcher = MapFetcher::new(&[
        ("https://up1.com", "rust async programming with tasks"),
        ("https://up2.com", "a rust cookbook of async recipes"),
    ]);
    let config = SearchConfig {
        num_results: 3,
        ..test_config()
    };

    let response = run_search("rust async", &config, &retriever, &fetcher, &NoAnswerGenerator)
        .await
        .expect("search should succeed");

    assert!(!response.no_results);
    assert_eq!(response.results.len(), 3);
    let last = response.results.last().expect("three results");
    assert_eq!(last.url, "https://down.com");
    assert_eq!(last.preview_unavailable, Some(true));
    assert_eq!(last.combined_score, 0.0);
    // Degraded results fall back to the retriever's snippet.
    assert_eq!(last.snippet, "Retriever snippet 1");
    assert!(response.results[..2]
        .iter()
        .all(|r| r.preview_unavailable.is_none()));
}

#[tokio::test]
async fn duplicate_candidate_urls_are_collapsed() {
    let retriever = FixedRetriever::new(&[
        "https://site.com/page",
        "https://site.com/page?utm_source=feed",
        "https://other.com/page",
    ]);
    let fetcher = MapFetcher::new(&[
        ("https://site.com/page", "shared topic text"),
        ("https://other.com/page", "shared topic text too"),
    ]);

    let response = run_search(
        "shared topic",
        &test_config(),
        &retriever,
        &fetcher,
        &NoAnswerGenerator,
    )
    .await
    .expect("search should succeed");

    assert_eq!(response.results.len(), 2);
    let urls: Vec<&str> = response.results.iter().map(|r| r.url.as_str()).collect();
    assert!(urls.contains(&"https://site.com/page"));
    assert!(urls.contains(&"https://other.com/page"));
}

#[tokio::test]
async fn misspelled_query_gets_a_suggestion_but_raw_scoring() {
    let retriever = FixedRetriever::new(&["https://a.com", "https://b.com", "https://c.com"]);
    let fetcher = MapFetcher::new(&[
        ("https://a.com", "qukc search tricks nobody mentions"),
        ("https://b.com", "quick search engines compared"),
        ("https://c.com", "unrelated cooking recipes"),
    ]);

    let response = run_search(
        "qukc search",
        &test_config(),
        &retriever,
        &fetcher,
        &NoAnswerGenerator,
    )
    .await
    .expect("search should succeed");

    assert_eq!(response.spelling_suggestion.as_deref(), Some("quick search"));
    assert_eq!(response.query, "qukc search");
    // Scoring uses the raw term "qukc"; only a.com contains it.
    assert_eq!(response.results[0].url, "https://a.com");
}

#[tokio::test]
async fn snippets_are_drawn_from_page_text_near_the_match() {
    let long_page = format!(
        "{} machine learning appears exactly here in the middle. {}",
        "padding words before the match repeated over and over and over again. ".repeat(5),
        "and trailing filler after it continues for a while longer. ".repeat(5)
    );
    let retriever = FixedRetriever::new(&["https://a.com", "https://b.com"]);
    let fetcher = MapFetcher::new(&[
        ("https://a.com", long_page.as_str()),
        ("https://b.com", "short unrelated note"),
    ]);

    let response = run_search(
        "machine learning",
        &test_config(),
        &retriever,
        &fetcher,
        &NoAnswerGenerator,
    )
    .await
    .expect("search should succeed");

    let top = &response.results[0];
    assert_eq!(top.url, "https://a.com");
    assert!(top.snippet.contains("machine learning"));
    assert!(top.snippet.chars().count() <= 302, "snippet too long");
}
