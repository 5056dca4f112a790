//! Search service - the public entry point
//!
//! Wires the HTTP clients to the aggregator:
//! 1. Validate the term and options
//! 2. Walk listing pages (filter + enrich) until satisfied, exhausted or out of time
//! 3. Trim to the requested window and attach the total when meaningful

use std::time::Duration;

use super::aggregator::SearchAggregator;
use super::assembler;
use super::detail::DetailClient;
use super::domain::{Query, SearchError, SearchOptions, SearchResult};
use super::listing::ListingClient;
use super::traits::{DetailApi, ListingApi};

/// Catalog root used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://www.goear.com";

/// Connection settings for the catalog
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Catalog root, e.g. `http://www.goear.com`
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Transport timeout for a single request
    pub request_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Service for searching the catalog
pub struct SearchService {
    base_url: String,
    listing: Box<dyn ListingApi>,
    detail: Box<dyn DetailApi>,
}

impl SearchService {
    /// Create a service talking to the real catalog
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SearchError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_clients(
            config.base_url.clone(),
            Box::new(ListingClient::new(http_client.clone(), config.base_url.clone())),
            Box::new(DetailClient::new(http_client, config.base_url)),
        ))
    }

    /// Create a service on top of arbitrary endpoint implementations
    pub fn with_clients(
        base_url: impl Into<String>,
        listing: Box<dyn ListingApi>,
        detail: Box<dyn DetailApi>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            listing,
            detail,
        }
    }

    /// `Referer` header value that returned links must be requested with.
    ///
    /// Without it the catalog serves a placeholder track instead of the real one.
    pub fn referer(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    /// Search the catalog for `term`.
    ///
    /// Returns at most `options.results_count` tracks. Running out of results or
    /// out of time yields a shorter (possibly empty) result, not an error. A
    /// failed page fetch fails the whole search.
    pub async fn search(
        &self,
        term: &str,
        options: SearchOptions,
    ) -> Result<SearchResult, SearchError> {
        let query = Query::new(term, options)?;
        let aggregator = SearchAggregator::new(self.listing.as_ref(), self.detail.as_ref());
        let collected = aggregator.collect(&query).await?;
        Ok(assembler::assemble(collected, query.options()))
    }
}

/// Quick helper to run a single search without keeping a service around
pub async fn search(term: &str, options: SearchOptions) -> Result<SearchResult, SearchError> {
    SearchService::new(SearchConfig::default())?
        .search(term, options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::domain::{ListingPage, Track};
    use crate::search::traits::mocks::{MockDetail, MockListing};
    use crate::search::listing::NATIVE_PAGE_SIZE;
    use crate::test_utils::{full_page, mock_page_with_qualities};

    fn service(listing: MockListing, detail: MockDetail) -> SearchService {
        SearchService::with_clients(DEFAULT_BASE_URL, Box::new(listing), Box::new(detail))
    }

    /// A catalog with `pages` full pages of mixed-bitrate rows
    fn catalog(pages: u32) -> SearchService {
        let pages = (1..=pages)
            .map(|p| ListingPage {
                total_count: Some(u64::from(pages) * NATIVE_PAGE_SIZE as u64),
                ..mock_page_with_qualities(p, &[320, 128, 192, 64, 256, 320, 96, 128, 192, 320])
            })
            .collect();
        service(MockListing::new(pages), MockDetail::new())
    }

    fn ids(tracks: &[Track]) -> Vec<String> {
        tracks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.base_url, "http://www.goear.com");
        assert!(config.user_agent.starts_with("goear-search/"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_referer() {
        let service = service(MockListing::empty(None), MockDetail::new());
        assert_eq!(service.referer(), "http://www.goear.com/");
    }

    #[tokio::test]
    async fn test_default_search() {
        let result = catalog(5)
            .search("The Police", SearchOptions::default())
            .await
            .unwrap();

        assert_eq!(result.tracks.len(), 10);
        assert_eq!(result.total_count, Some(50));
        assert!(
            result
                .tracks
                .iter()
                .all(|t| !t.artist.is_empty() && !t.link.is_empty())
        );
    }

    #[tokio::test]
    async fn test_unmatched_term() {
        let service = service(MockListing::empty(Some(0)), MockDetail::new());

        let result = service
            .search("123lkj123lkj", SearchOptions::default())
            .await
            .unwrap();

        assert!(result.tracks.is_empty());
        assert_eq!(result.total_count, Some(0));
    }

    #[tokio::test]
    async fn test_blank_term_rejected() {
        let result = catalog(1).search("", SearchOptions::default()).await;
        assert!(matches!(result, Err(SearchError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_min_quality() {
        let options = SearchOptions::default().with_min_quality(192);
        let result = catalog(10).search("U2", options).await.unwrap();

        assert_eq!(result.tracks.len(), 10);
        assert_eq!(result.total_count, None);
        assert!(result.tracks.iter().all(|t| t.quality >= 192));
    }

    #[tokio::test]
    async fn test_results_count() {
        let options = SearchOptions::default().with_results_count(50);
        let result = catalog(10).search("Eric Clapton", options).await.unwrap();
        assert_eq!(result.tracks.len(), 50);
    }

    #[tokio::test]
    async fn test_results_count_capped_by_availability() {
        let options = SearchOptions::default().with_results_count(50);
        let result = catalog(3).search("Eric Clapton", options).await.unwrap();
        assert_eq!(result.tracks.len(), 30);
    }

    #[tokio::test]
    async fn test_offset_window_continues_unshifted_sequence() {
        let catalog = catalog(10);

        let unshifted = catalog
            .search("Genesis", SearchOptions::default().with_results_count(20))
            .await
            .unwrap();
        let shifted = catalog
            .search(
                "Genesis",
                SearchOptions::default().with_offset(2).with_results_count(10),
            )
            .await
            .unwrap();

        assert_eq!(unshifted.tracks.len(), 20);
        assert_ne!(unshifted.tracks[0], shifted.tracks[0]);
        assert_eq!(unshifted.tracks[NATIVE_PAGE_SIZE], shifted.tracks[0]);
        assert_eq!(shifted.total_count, None);
    }

    #[tokio::test]
    async fn test_offset_windows_concatenate() {
        let catalog = catalog(6);

        let long = catalog
            .search("Genesis", SearchOptions::default().with_results_count(40))
            .await
            .unwrap();

        let mut stitched = Vec::new();
        for offset in 1..=4 {
            let window = catalog
                .search(
                    "Genesis",
                    SearchOptions::default().with_offset(offset).with_results_count(10),
                )
                .await
                .unwrap();
            stitched.extend(window.tracks);
        }

        assert_eq!(ids(&stitched), ids(&long.tracks));
    }

    #[tokio::test]
    async fn test_extended_info() {
        let listing = MockListing::new(vec![full_page(1, 128)]);
        let detail = MockDetail::new();
        let service = service(listing, detail);

        let options = SearchOptions::default().with_extended_info(true);
        let result = service.search("Seal", options).await.unwrap();

        assert_eq!(result.tracks.len(), 10);
        assert!(result.tracks.iter().all(|t| t.artist.starts_with("Artist ")));
    }

    #[tokio::test]
    async fn test_error_on_later_page() {
        let pages = (1..=10).map(|p| full_page(p, 128)).collect();
        let service = service(
            MockListing::new(pages).failing_at(2, 555),
            MockDetail::new(),
        );

        let options = SearchOptions::default().with_results_count(50);
        let err = service.search("Eric Clapton", options).await.unwrap_err();

        assert_eq!(err.to_string(), "HTTP error code: 555");
    }

    #[tokio::test]
    async fn test_error_on_first_page() {
        let service = service(MockListing::new(vec![]).failing_at(1, 503), MockDetail::new());

        let err = service
            .search("Eric Clapton", SearchOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "HTTP error code: 503");
    }

    #[tokio::test]
    async fn test_repeated_search_is_identical() {
        let catalog = catalog(8);
        let options = SearchOptions::default()
            .with_results_count(25)
            .with_min_quality(128);

        let first = catalog.search("Genesis", options.clone()).await.unwrap();
        let second = catalog.search("Genesis", options).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_strict_filter_with_timeout() {
        let pages = (1..=500)
            .map(|p| mock_page_with_qualities(p, &[128, 192, 320, 128, 64, 96, 128, 192, 256, 128]))
            .collect();
        let service = service(
            MockListing::new(pages).with_latency(Duration::from_millis(200)),
            MockDetail::new(),
        );

        let options = SearchOptions::default()
            .with_results_count(100)
            .with_min_quality(320)
            .with_timeout(Duration::from_millis(2500));

        let started = tokio::time::Instant::now();
        let result = service.search("Genesis Jesus", options).await.unwrap();

        assert!(!result.tracks.is_empty());
        assert!(result.tracks.len() < 100);
        assert!(result.tracks.iter().all(|t| t.quality >= 320));
        assert!(started.elapsed() >= Duration::from_millis(2500));
    }
}
