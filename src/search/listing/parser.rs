//! Listing page parser
//!
//! Turns the markup of one search results page into [`RawItem`]s. This is the
//! ONLY place that knows the listing markup; if the catalog changes its HTML,
//! only the selectors below need to change.
//!
//! Expected shape:
//! ```html
//! <div id="search_results">
//!   <p class="results_count">1.234 resultados</p>
//!   <ol class="results_list">
//!     <li data-link="http://...">
//!       <a class="title" href="/listen/4f2a9c1/she-wolf-david-guetta">She Wolf</a>
//!       <span class="artist_name">David Guetta</span>
//!       <span class="kbps">320 kbps</span>
//!       <span class="length">3:45</span>
//!     </li>
//!   </ol>
//! </div>
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::search::domain::{ListingPage, RawItem, SearchError};

const ROW: &str = "#search_results ol.results_list > li";
const TITLE: &str = "a.title";
const ARTIST: &str = ".artist_name";
const QUALITY: &str = ".kbps";
const DURATION: &str = ".length";
const TOTAL_COUNT: &str = "#search_results .results_count";

/// Path segment that precedes the track ID in row links
const LISTEN_SEGMENT: &str = "listen";

struct Selectors {
    row: Selector,
    title: Selector,
    artist: Selector,
    quality: Selector,
    duration: Selector,
    total_count: Selector,
}

impl Selectors {
    fn new() -> Result<Self, SearchError> {
        Ok(Self {
            row: selector(ROW)?,
            title: selector(TITLE)?,
            artist: selector(ARTIST)?,
            quality: selector(QUALITY)?,
            duration: selector(DURATION)?,
            total_count: selector(TOTAL_COUNT)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("bad selector {css}: {e}")))
}

/// Parse one listing page.
///
/// Rows without an ID, a title or a readable bitrate are skipped. A page
/// without rows is a normal "no (more) results" page, not an error.
pub fn parse_listing(html: &str) -> Result<ListingPage, SearchError> {
    let selectors = Selectors::new()?;
    let document = Html::parse_document(html);

    let items = document
        .select(&selectors.row)
        .filter_map(|row| {
            let item = parse_row(row, &selectors);
            if item.is_none() {
                tracing::debug!("Skipping unreadable listing row: {}", collapse(&row.html()));
            }
            item
        })
        .collect();

    let total_count = document
        .select(&selectors.total_count)
        .next()
        .and_then(|e| parse_count(&text_of(e)));

    Ok(ListingPage { items, total_count })
}

fn parse_row(row: ElementRef<'_>, selectors: &Selectors) -> Option<RawItem> {
    let title_link = row.select(&selectors.title).next()?;
    let id = title_link.value().attr("href").and_then(track_id_from_href)?;
    let title = non_empty(text_of(title_link))?;

    let quality = row
        .select(&selectors.quality)
        .next()
        .and_then(|e| parse_quality(&text_of(e)))?;

    let duration = row
        .select(&selectors.duration)
        .next()
        .map(text_of)
        .unwrap_or_default();

    let artist = row
        .select(&selectors.artist)
        .next()
        .and_then(|e| non_empty(text_of(e)));

    let link = row
        .value()
        .attr("data-link")
        .and_then(|s| non_empty(s.to_string()));

    Some(RawItem {
        id,
        title,
        quality,
        duration,
        artist,
        link,
    })
}

/// Extract the track ID from `/listen/<id>/<slug>` (absolute URLs too).
fn track_id_from_href(href: &str) -> Option<String> {
    let mut segments = href.split('/').skip_while(|s| *s != LISTEN_SEGMENT);
    segments.next()?;
    segments
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// "320 kbps" -> 320
fn parse_quality(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// "1.234 resultados" -> 1234. Thousands separators are ignored.
fn parse_count(text: &str) -> Option<u64> {
    let number = text.split_whitespace().find(|w| w.starts_with(|c: char| c.is_ascii_digit()))?;
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn text_of(element: ElementRef<'_>) -> String {
    collapse(&element.text().collect::<String>())
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}
