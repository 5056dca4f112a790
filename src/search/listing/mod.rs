//! Catalog listing pages
//!
//! The catalog paginates search results as HTML pages at
//! `<site-root>/search/<term>/<page>`. Pages are 1-based and hold a fixed
//! number of rows; the `offset` search option addresses these pages directly.

mod client;
mod parser;

pub use client::{ListingClient, search_url};
pub use parser::parse_listing;

/// Rows per native listing page
pub const NATIVE_PAGE_SIZE: usize = 10;

/// Index of the first native listing page
pub const FIRST_NATIVE_PAGE: u32 = 1;

/// Native page a search with the given `offset` starts from.
///
/// Offsets 0 and 1 both address the first page; offset `n > 1` skips the
/// first `(n - 1) * NATIVE_PAGE_SIZE` rows of the unfiltered listing.
pub fn start_page(offset: u32) -> u32 {
    offset.max(FIRST_NATIVE_PAGE)
}
