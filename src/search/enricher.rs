//! Item enrichment - turns listing rows into complete [`Track`]s
//!
//! Rows that already show artist and link are promoted as-is. Everything else
//! (or everything, when extended info is requested) costs one detail lookup.
//! Lookups for one page run concurrently but results are re-joined in listing
//! order, never completion order.

use futures::{StreamExt, stream};

use super::domain::{EnrichmentFailurePolicy, RawItem, SearchError, Track};
use super::traits::DetailApi;

/// Resolves listing rows against the detail endpoint
pub struct ItemEnricher<'a> {
    detail: &'a dyn DetailApi,
    extended_info: bool,
    concurrency: usize,
    failure_policy: EnrichmentFailurePolicy,
}

impl<'a> ItemEnricher<'a> {
    pub fn new(
        detail: &'a dyn DetailApi,
        extended_info: bool,
        concurrency: usize,
        failure_policy: EnrichmentFailurePolicy,
    ) -> Self {
        Self {
            detail,
            extended_info,
            concurrency: concurrency.max(1),
            failure_policy,
        }
    }

    /// Whether `item` needs a detail lookup
    pub fn needs_lookup(&self, item: &RawItem) -> bool {
        self.extended_info || !item.is_complete()
    }

    /// Resolve a single row
    pub async fn enrich(&self, item: RawItem) -> Result<Track, SearchError> {
        if !self.needs_lookup(&item) {
            return Track::resolve(item, None);
        }
        let detail = self.detail.fetch_detail(&item.id).await?;
        Track::resolve(item, Some(detail))
    }

    /// Resolve all rows of one page, in listing order.
    ///
    /// With [`EnrichmentFailurePolicy::Drop`] failed rows are left out; with
    /// [`EnrichmentFailurePolicy::Abort`] the first failure (in listing order)
    /// is returned and outstanding lookups are abandoned.
    pub async fn enrich_page(&self, items: Vec<RawItem>) -> Result<Vec<Track>, SearchError> {
        let mut tracks = Vec::with_capacity(items.len());

        let mut results = stream::iter(items)
            .map(|item| async move {
                let id = item.id.clone();
                (id, self.enrich(item).await)
            })
            .buffered(self.concurrency);

        while let Some((id, result)) = results.next().await {
            match result {
                Ok(track) => tracks.push(track),
                Err(e) => match self.failure_policy {
                    EnrichmentFailurePolicy::Drop => {
                        tracing::warn!("Dropping track {}: {}", id, e);
                    }
                    EnrichmentFailurePolicy::Abort => {
                        return Err(SearchError::Enrichment {
                            id,
                            source: Box::new(e),
                        });
                    }
                },
            }
        }

        Ok(tracks)
    }
}
