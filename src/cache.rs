//! In-memory TTL cache for fetched page content.
//!
//! Caches extracted title/text keyed by normalized URL so repeated queries
//! hitting the same pages skip the network. Ranking state is never cached:
//! corpus statistics are recomputed on every request. Uses [`moka`] for
//! async-friendly caching with automatic eviction.

use std::sync::OnceLock;
use std::time::Duration;

use moka::future::Cache;

use crate::content::ExtractedPage;
use crate::pipeline::url_normalize::normalize_url;

/// Maximum number of cached pages.
const MAX_CACHE_ENTRIES: u64 = 500;

/// Global process-wide page cache.
///
/// Lazily initialised on first access. TTL is set when first created
/// and cannot be changed after initialisation.
static CACHE: OnceLock<Cache<String, ExtractedPage>> = OnceLock::new();

fn get_or_init_cache(ttl_seconds: u64) -> &'static Cache<String, ExtractedPage> {
    CACHE.get_or_init(|| {
        Cache::builder()
            .max_capacity(MAX_CACHE_ENTRIES)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build()
    })
}

/// Look up cached content for a URL. Returns `None` on miss or when
/// caching is disabled (`ttl_seconds == 0`).
pub async fn get(url: &str, ttl_seconds: u64) -> Option<ExtractedPage> {
    if ttl_seconds == 0 {
        return None;
    }
    let cache = get_or_init_cache(ttl_seconds);
    cache.get(&normalize_url(url)).await
}

/// Insert extracted content for a URL. No-op when caching is disabled.
pub async fn insert(url: &str, page: ExtractedPage, ttl_seconds: u64) {
    if ttl_seconds == 0 {
        return;
    }
    let cache = get_or_init_cache(ttl_seconds);
    cache.insert(normalize_url(url), page).await;
}
