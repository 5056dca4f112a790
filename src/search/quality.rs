//! Bitrate floor applied to listing rows before any detail lookups.

use super::domain::RawItem;

/// Whether `item` meets the minimum bitrate
pub fn keep(item: &RawItem, min_quality: u32) -> bool {
    item.quality >= min_quality
}

/// Drop rows below the minimum bitrate, preserving order
pub fn filter(items: Vec<RawItem>, min_quality: u32) -> Vec<RawItem> {
    items
        .into_iter()
        .filter(|item| keep(item, min_quality))
        .collect()
}
