//! Per-track detail endpoint
//!
//! The listing doesn't always show the artist, and never reliably shows the
//! playable link. The catalog's player feed (`tracker758.php?f=<id>`) returns
//! both for a single track as a tiny XML document.

mod client;
mod parser;

pub use client::{DetailClient, detail_url};
pub use parser::parse_detail;
