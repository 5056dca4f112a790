//! Packages collected tracks into the caller's window.

use super::aggregator::Collected;
use super::domain::{SearchOptions, SearchResult};
use super::listing;

/// Whether the source's own count is meaningful for these options.
///
/// Only an unfiltered search starting at the first native page can report it;
/// a bitrate floor or a page offset makes a single count ambiguous.
pub fn reports_total(options: &SearchOptions) -> bool {
    options.min_quality == 0 && listing::start_page(options.offset) == listing::FIRST_NATIVE_PAGE
}

/// Trim to `results_count` and attach the total when it's unambiguous
pub fn assemble(collected: Collected, options: &SearchOptions) -> SearchResult {
    let mut tracks = collected.tracks;
    tracks.truncate(options.results_count);

    let total_count = if reports_total(options) {
        collected.first_page_total
    } else {
        None
    };

    SearchResult {
        tracks,
        total_count,
    }
}
