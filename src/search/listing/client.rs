//! Listing page HTTP client
//!
//! Fetches one native results page and hands the markup to the parser.
//! Failed requests are never retried here; the aggregator decides what a
//! failure means for the search as a whole.

use super::parser;
use crate::search::domain::{ListingPage, SearchError};

/// Build the URL of one listing page.
///
/// The term is percent-encoded as a single path segment (spaces become `%20`).
pub fn search_url(base_url: &str, term: &str, page: u32) -> String {
    format!(
        "{}/search/{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(term),
        page
    )
}

/// Listing endpoint client
pub struct ListingClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ListingClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Fetch and parse native page `page` of the results for `term`
    pub async fn fetch_page(&self, term: &str, page: u32) -> Result<ListingPage, SearchError> {
        let url = search_url(&self.base_url, term, page);
        tracing::debug!("Fetching listing page {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Listing page {} returned HTTP {}", url, status);
            return Err(SearchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        parser::parse_listing(&body)
    }
}
