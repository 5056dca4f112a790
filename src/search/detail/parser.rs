//! Player feed parser
//!
//! Example response:
//! ```xml
//! <songs>
//!   <song path="http://www.goear.com/plimiter.php?f=4f2a9c1" bild=""
//!         artist="David Guetta" title="She Wolf"/>
//! </songs>
//! ```

use scraper::{Html, Selector};

use crate::search::domain::{SearchError, TrackDetail};

const SONG: &str = "song";

/// Parse a player feed document.
///
/// A document without a `<song>` element is an error: the catalog answers
/// unknown IDs with an empty `<songs/>`.
pub fn parse_detail(xml: &str) -> Result<TrackDetail, SearchError> {
    let selector =
        Selector::parse(SONG).map_err(|e| SearchError::Parse(format!("bad selector: {e}")))?;
    let document = Html::parse_fragment(xml);

    let song = document
        .select(&selector)
        .next()
        .ok_or_else(|| SearchError::Parse("no <song> element in detail response".to_string()))?;

    let attr = |name: &str| {
        song.value()
            .attr(name)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Ok(TrackDetail {
        artist: attr("artist"),
        title: attr("title"),
        link: attr("path"),
    })
}
