//! Search aggregation - walks native listing pages until the request is met
//!
//! One call is a small state machine, `COLLECTING -> {SATISFIED, TIMED_OUT, FAILED}`:
//! 1. Fetch the next native page (strictly one at a time)
//! 2. An error fails the whole call; nothing collected so far is returned
//! 3. An empty page means the source is exhausted
//! 4. Otherwise filter by bitrate, enrich the survivors and append them in order
//! 5. After each page: stop if the time budget is spent, then stop if enough
//!    tracks were collected
//!
//! The deadline is only checked between pages. In-flight requests always
//! finish, so a call can overrun its budget by one page plus its lookups.

use tokio::time::{Duration, Instant};

use super::domain::{ListingPage, Query, SearchError, StopReason, Track};
use super::enricher::ItemEnricher;
use super::listing;
use super::quality;
use super::traits::{DetailApi, ListingApi};

/// Everything an aggregation run produced
#[derive(Debug, Clone, PartialEq)]
pub struct Collected {
    /// Tracks in encounter order (may exceed the requested count)
    pub tracks: Vec<Track>,
    /// Result count reported by the first fetched page
    pub first_page_total: Option<u64>,
    pub stop_reason: StopReason,
    pub pages_fetched: u32,
    pub elapsed: Duration,
}

/// Per-call accumulator threaded through the fetch loop
struct Collection {
    cursor: u32,
    tracks: Vec<Track>,
    first_page_total: Option<u64>,
    pages_fetched: u32,
    started: Instant,
}

impl Collection {
    fn new(cursor: u32) -> Self {
        Self {
            cursor,
            tracks: Vec::new(),
            first_page_total: None,
            pages_fetched: 0,
            started: Instant::now(),
        }
    }

    fn record_page(&mut self, page: &ListingPage) {
        if self.pages_fetched == 0 {
            // A first page with no rows and no printed count still means "0 results"
            self.first_page_total = page
                .total_count
                .or_else(|| page.items.is_empty().then_some(0));
        }
        self.pages_fetched += 1;
    }

    fn finish(self, stop_reason: StopReason) -> Collected {
        Collected {
            tracks: self.tracks,
            first_page_total: self.first_page_total,
            stop_reason,
            pages_fetched: self.pages_fetched,
            elapsed: self.started.elapsed(),
        }
    }
}

/// Drives listing fetches, filtering and enrichment for one search
pub struct SearchAggregator<'a> {
    listing: &'a dyn ListingApi,
    detail: &'a dyn DetailApi,
}

impl<'a> SearchAggregator<'a> {
    pub fn new(listing: &'a dyn ListingApi, detail: &'a dyn DetailApi) -> Self {
        Self { listing, detail }
    }

    /// Collect tracks for `query`.
    ///
    /// Running out of time is not an error: whatever was collected is returned
    /// with [`StopReason::TimedOut`]. Any page fetch error is.
    pub async fn collect(&self, query: &Query) -> Result<Collected, SearchError> {
        let options = query.options();
        let enricher = ItemEnricher::new(
            self.detail,
            options.extended_info,
            options.enrich_concurrency,
            options.enrichment_failure,
        );

        let mut state = Collection::new(listing::start_page(options.offset));
        let deadline = options.timeout.map(|budget| state.started + budget);

        loop {
            let page = match self.listing.fetch_page(query.term(), state.cursor).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(
                        "Search for {:?} failed on page {} after {} page(s): {}",
                        query.term(),
                        state.cursor,
                        state.pages_fetched,
                        e
                    );
                    return Err(e);
                }
            };
            state.record_page(&page);

            if page.items.is_empty() {
                return Ok(self.finish(query, state, StopReason::Exhausted));
            }

            let received = page.items.len();
            let survivors = quality::filter(page.items, options.min_quality);
            tracing::debug!(
                "Page {}: {} row(s), {} at or above {} kbps",
                state.cursor,
                received,
                survivors.len(),
                options.min_quality
            );

            let tracks = enricher.enrich_page(survivors).await?;
            state.tracks.extend(tracks);

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Ok(self.finish(query, state, StopReason::TimedOut));
            }
            if state.tracks.len() >= options.results_count {
                return Ok(self.finish(query, state, StopReason::Satisfied));
            }

            // No page can be addressed past u32::MAX
            match state.cursor.checked_add(1) {
                Some(next) => state.cursor = next,
                None => return Ok(self.finish(query, state, StopReason::Exhausted)),
            }
        }
    }

    fn finish(&self, query: &Query, state: Collection, stop_reason: StopReason) -> Collected {
        let collected = state.finish(stop_reason);
        tracing::info!(
            "Search for {:?} stopped ({:?}): {} track(s) from {} page(s) in {:?}",
            query.term(),
            collected.stop_reason,
            collected.tracks.len(),
            collected.pages_fetched,
            collected.elapsed
        );
        collected
    }
}
