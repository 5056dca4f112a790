//! Test utilities and fixtures for goear-search tests.
//!
//! Mock factories for listing rows, pages and tracks. Row IDs follow the
//! `p<page>-<index>` scheme so tests can tell where a track came from.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::mock_page;
//!
//! let listing = MockListing::new(vec![mock_page(1, 10, 128), mock_page(2, 10, 320)]);
//! ```

use crate::search::domain::{ListingPage, RawItem, Track, TrackDetail};
use crate::search::listing::NATIVE_PAGE_SIZE;

/// Creates a listing row without artist or link (needs a detail lookup).
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let row = RawItem {
///     artist: Some("Seal".to_string()),
///     ..mock_raw_item("a1", 128)
/// };
/// ```
pub fn mock_raw_item(id: &str, quality: u32) -> RawItem {
    RawItem {
        id: id.to_string(),
        title: format!("Track {}", id),
        quality,
        duration: "3:30".to_string(),
        artist: None,
        link: None,
    }
}

/// Creates a listing row that already carries artist and link.
pub fn complete_raw_item(id: &str, quality: u32) -> RawItem {
    RawItem {
        artist: Some(format!("Listing Artist {}", id)),
        link: Some(format!("http://listing.example.com/{}.mp3", id)),
        ..mock_raw_item(id, quality)
    }
}

/// Creates a detail lookup result.
pub fn mock_detail(artist: &str, link: &str) -> TrackDetail {
    TrackDetail {
        artist: Some(artist.to_string()),
        title: None,
        link: Some(link.to_string()),
    }
}

/// Creates a finished track.
pub fn mock_track(id: &str, quality: u32) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Track {}", id),
        quality,
        duration: "3:30".to_string(),
        artist: "Test Artist".to_string(),
        link: format!("http://media.example.com/{}.mp3", id),
    }
}

/// Creates native page `page` with `rows` rows of the same bitrate.
pub fn mock_page(page: u32, rows: usize, quality: u32) -> ListingPage {
    ListingPage {
        items: (0..rows)
            .map(|i| mock_raw_item(&format!("p{}-{}", page, i), quality))
            .collect(),
        total_count: None,
    }
}

/// Creates native page `page` with one row per given bitrate.
pub fn mock_page_with_qualities(page: u32, qualities: &[u32]) -> ListingPage {
    ListingPage {
        items: qualities
            .iter()
            .enumerate()
            .map(|(i, q)| mock_raw_item(&format!("p{}-{}", page, i), *q))
            .collect(),
        total_count: None,
    }
}

/// Creates native page `page` filled with `NATIVE_PAGE_SIZE` rows.
pub fn full_page(page: u32, quality: u32) -> ListingPage {
    mock_page(page, NATIVE_PAGE_SIZE, quality)
}

/// HTTP client for talking to [`serve_http`], ignoring any system proxy.
pub fn loopback_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Starts a loopback HTTP server answering every request with the same
/// response and returns its root URL.
///
/// `status` is the full status, e.g. `"555 Custom"`.
pub async fn serve_http(status: &str, body: &str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = vec![0u8; 4096];
            let mut read = 0;
            // Read until the end of the request headers
            while let Ok(n) = socket.read(&mut request[read..]).await {
                if n == 0 {
                    break;
                }
                read += n;
                if request[..read].windows(4).any(|w| w == b"\r\n\r\n") || read == request.len() {
                    break;
                }
            }
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}", addr)
}
