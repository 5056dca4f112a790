//! Trait definitions for the remote catalog endpoints.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the HTTP clients, while tests substitute the
//! scripted implementations in [`mocks`].

use async_trait::async_trait;

use super::detail::DetailClient;
use super::domain::{ListingPage, SearchError, TrackDetail};
use super::listing::ListingClient;

/// Fetches one native listing page.
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// Fetch `page` (1-based) of the results for `term`.
    async fn fetch_page(&self, term: &str, page: u32) -> Result<ListingPage, SearchError>;
}

/// Resolves the fields a listing row may be missing.
#[async_trait]
pub trait DetailApi: Send + Sync {
    /// Look up a single track by its catalog ID.
    async fn fetch_detail(&self, id: &str) -> Result<TrackDetail, SearchError>;
}

#[async_trait]
impl ListingApi for ListingClient {
    async fn fetch_page(&self, term: &str, page: u32) -> Result<ListingPage, SearchError> {
        self.fetch_page(term, page).await
    }
}

#[async_trait]
impl DetailApi for DetailClient {
    async fn fetch_detail(&self, id: &str) -> Result<TrackDetail, SearchError> {
        self.fetch_detail(id).await
    }
}
