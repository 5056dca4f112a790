//! Catalog search - paginated keyword search over the goear listing pages.
//!
//! # Architecture
//!
//! - **Domain models** (`domain.rs`) - Query, listing rows, tracks, results, errors
//! - **Listing** (`listing/`) - Fetches one native results page and parses its HTML
//! - **Detail** (`detail/`) - Per-track player feed lookup (artist + playable link)
//! - **Quality** (`quality.rs`) - Bitrate floor applied before any lookups
//! - **Enricher** (`enricher.rs`) - Bounded, order-preserving per-page lookups
//! - **Aggregator** (`aggregator.rs`) - Walks pages until satisfied, exhausted or out of time
//! - **Assembler** (`assembler.rs`) - Trims to the requested window, attaches the total
//! - **Service** (`service.rs`) - Public entry point wiring it all together
//!
//! # Usage
//!
//! ```ignore
//! use search::{SearchService, SearchConfig, SearchOptions};
//!
//! let service = SearchService::new(SearchConfig::default())?;
//! let result = service
//!     .search("Eric Clapton", SearchOptions::default().with_min_quality(192))
//!     .await?;
//! for track in &result.tracks {
//!     println!("{} - {} ({} kbps)", track.artist, track.title, track.quality);
//! }
//! ```

pub mod aggregator;
pub mod assembler;
pub mod detail;
pub mod domain;
pub mod enricher;
pub mod listing;
pub mod quality;
pub mod service;
pub mod traits;

pub use domain::{
    EnrichmentFailurePolicy, Query, RawItem, SearchError, SearchOptions, SearchResult, StopReason,
    Track,
};
pub use service::{SearchConfig, SearchService, search};
