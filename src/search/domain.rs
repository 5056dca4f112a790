//! Internal domain models for catalog search.
//!
//! These types are OUR types - they don't change when the catalog markup changes.
//! Listing HTML and detail XML get converted into these types by the parsers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Number of results returned when the caller doesn't ask for a specific count
pub const DEFAULT_RESULTS_COUNT: usize = 10;

/// Number of concurrent detail lookups per listing page
pub const DEFAULT_ENRICH_CONCURRENCY: usize = 4;

/// What to do when the detail lookup for a single item fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentFailurePolicy {
    /// Leave the item out of the results and keep going
    #[default]
    Drop,
    /// Fail the whole search
    Abort,
}

/// Per-call search options
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Minimum bitrate (kbps) a track must have to be returned
    pub min_quality: u32,
    /// How many tracks the caller wants
    pub results_count: usize,
    /// Native listing page to start from (0 and 1 both mean the first page)
    pub offset: u32,
    /// Always resolve artist/link through the detail endpoint
    pub extended_info: bool,
    /// Soft time budget; `None` means unbounded
    pub timeout: Option<Duration>,
    /// Max detail lookups in flight for one page
    pub enrich_concurrency: usize,
    /// Per-item detail failure handling
    pub enrichment_failure: EnrichmentFailurePolicy,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_quality: 0,
            results_count: DEFAULT_RESULTS_COUNT,
            offset: 0,
            extended_info: false,
            timeout: None,
            enrich_concurrency: DEFAULT_ENRICH_CONCURRENCY,
            enrichment_failure: EnrichmentFailurePolicy::Drop,
        }
    }
}

impl SearchOptions {
    pub fn with_min_quality(mut self, min_quality: u32) -> Self {
        self.min_quality = min_quality;
        self
    }

    pub fn with_results_count(mut self, results_count: usize) -> Self {
        self.results_count = results_count;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_extended_info(mut self, extended_info: bool) -> Self {
        self.extended_info = extended_info;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_enrichment_failure(mut self, policy: EnrichmentFailurePolicy) -> Self {
        self.enrichment_failure = policy;
        self
    }
}

/// A validated search request
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    term: String,
    options: SearchOptions,
}

impl Query {
    /// Validate a search term and options.
    ///
    /// Rejects blank terms and a zero enrichment concurrency before any request is made.
    pub fn new(term: impl Into<String>, options: SearchOptions) -> Result<Self, SearchError> {
        let term = term.into();
        if term.trim().is_empty() {
            return Err(SearchError::InvalidQuery("search term is empty".to_string()));
        }
        if options.enrich_concurrency == 0 {
            return Err(SearchError::InvalidQuery(
                "enrich_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(Self { term, options })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }
}

/// One entry as scraped from a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    /// Catalog track ID
    pub id: String,
    pub title: String,
    /// Bitrate in kbps
    pub quality: u32,
    /// Duration as printed on the listing (e.g. "3:45")
    pub duration: String,
    /// Artist, when the listing shows one
    pub artist: Option<String>,
    /// Playable link, when the listing shows one
    pub link: Option<String>,
}

impl RawItem {
    /// Whether the listing already gave us everything a [`Track`] needs
    pub fn is_complete(&self) -> bool {
        has_text(&self.artist) && has_text(&self.link)
    }
}

/// Fields resolved by the per-item detail endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackDetail {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
}

/// A track ready to hand back to the caller.
///
/// `artist` and `link` are always non-empty. Links only resolve to the intended
/// audio when requested with the catalog's `Referer` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub quality: u32,
    pub duration: String,
    pub artist: String,
    pub link: String,
}

impl Track {
    /// Build a track from a listing row plus optional detail data.
    ///
    /// Detail values win over listing values; listing values fill the gaps.
    /// Fails with [`SearchError::IncompleteItem`] if artist or link end up empty.
    pub fn resolve(item: RawItem, detail: Option<TrackDetail>) -> Result<Self, SearchError> {
        let detail = detail.unwrap_or_default();
        let artist = non_empty(detail.artist).or_else(|| non_empty(item.artist));
        let link = non_empty(detail.link).or_else(|| non_empty(item.link));

        let (Some(artist), Some(link)) = (artist, link) else {
            return Err(SearchError::IncompleteItem { id: item.id });
        };

        Ok(Self {
            title: non_empty(detail.title).unwrap_or(item.title),
            id: item.id,
            quality: item.quality,
            duration: item.duration,
            artist,
            link,
        })
    }
}

/// One parsed listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub items: Vec<RawItem>,
    /// Result count printed on the page, if any
    pub total_count: Option<u64>,
}

/// Final search payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub tracks: Vec<Track>,
    /// Only present when the source's own count is unambiguous for this query
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_count: Option<u64>,
}

/// Why the aggregator stopped collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Collected at least the requested number of tracks
    Satisfied,
    /// The source returned an empty page
    Exhausted,
    /// The time budget ran out first
    TimedOut,
}

/// Errors that can occur during a search
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP error code: {0}")]
    HttpStatus(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Track {id} has no artist or link")]
    IncompleteItem { id: String },

    #[error("Enrichment failed for track {id}: {source}")]
    Enrichment {
        id: String,
        #[source]
        source: Box<SearchError>,
    },
}

impl SearchError {
    /// Remote status code, for errors caused by a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus(status) => Some(*status),
            Self::Enrichment { source, .. } => source.status(),
            _ => None,
        }
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
