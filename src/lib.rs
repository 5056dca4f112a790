//! goear-search - keyword search over the goear catalog.
//!
//! The catalog only exposes results as paginated HTML listing pages. This
//! crate turns one logical request ("N tracks of at least Q kbps, starting at
//! page O, within T ms") into a sequence of page fetches, filters and enriches
//! the rows, and decides when to stop.
//!
//! ```ignore
//! use goear_search::search::{SearchOptions, search};
//!
//! let result = search("Eric Clapton", SearchOptions::default().with_results_count(50)).await?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod search;
#[cfg(test)]
pub mod test_utils;
