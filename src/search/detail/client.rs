//! Player feed HTTP client

use super::parser;
use crate::search::domain::{SearchError, TrackDetail};

/// Build the player feed URL for one track
pub fn detail_url(base_url: &str, id: &str) -> String {
    format!(
        "{}/tracker758.php?f={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}

/// Detail endpoint client
pub struct DetailClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl DetailClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Look up artist, title and playable link for one track
    pub async fn fetch_detail(&self, id: &str) -> Result<TrackDetail, SearchError> {
        let url = detail_url(&self.base_url, id);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        parser::parse_detail(&body)
    }
}
