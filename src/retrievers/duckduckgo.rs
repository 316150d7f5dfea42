//! DuckDuckGo-backed candidate retriever.
//!
//! Uses the HTML-only endpoint at `https://html.duckduckgo.com/html/`,
//! which requires no JavaScript and tolerates automated requests. The
//! parsed result order is the retrieval priority handed to the fetcher.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::query::NormalizedQuery;
use crate::retriever::Retriever;
use crate::types::Candidate;
use scraper::{Html, Selector};
use url::Url;

/// Default retrieval collaborator, scraping DuckDuckGo's HTML results page.
pub struct DuckDuckGoRetriever;

impl DuckDuckGoRetriever {
    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`;
    /// the `uddg` query parameter carries the real target.
    fn extract_url(href: &str) -> Option<String> {
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }
}

impl Retriever for DuckDuckGoRetriever {
    async fn retrieve(
        &self,
        query: &NormalizedQuery,
        config: &SearchConfig,
    ) -> Result<Vec<Candidate>, SearchError> {
        tracing::trace!(query = %query.raw, "DuckDuckGo retrieval");

        let client = http::build_client(config)
            .map_err(|e| SearchError::Retriever(e.to_string()))?;

        let mut params = vec![("q", query.raw.as_str())];
        if config.safe_search {
            params.push(("kp", "1"));
        }

        let response = client
            .post("https://html.duckduckgo.com/html/")
            .form(&params)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| SearchError::Retriever(format!("DuckDuckGo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Retriever(format!("DuckDuckGo HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Retriever(format!("DuckDuckGo response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "DuckDuckGo response received");

        parse_result_page(&html, config.candidate_limit())
    }
}

/// Parse DuckDuckGo's HTML results page into ordered candidates.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_result_page(
    html: &str,
    limit: usize,
) -> Result<Vec<Candidate>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )
    .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut candidates = Vec::new();

    for element in document.select(&result_sel) {
        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let Some(href) = title_el.value().attr("href") else {
            continue;
        };
        let Some(url) = DuckDuckGoRetriever::extract_url(href) else {
            continue;
        };

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        candidates.push(Candidate {
            title,
            url,
            snippet,
            rank: candidates.len(),
        });

        if candidates.len() >= limit {
            break;
        }
    }

    tracing::debug!(count = candidates.len(), "DuckDuckGo candidates parsed");
    Ok(candidates)
}
