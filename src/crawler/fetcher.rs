//! HTTP fetching for the download phase
//!
//! Discovery renders pages in the browser; everything here is a plain
//! static fetch. One client is built per run and shared by page and asset
//! downloads.

use crate::{MirrorError, Result};
use reqwest::Client;
use std::time::Duration;

/// Browser-like UA; some origins refuse obviously-scripted clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";

/// Builds the HTTP client shared by page and asset downloads.
pub fn build_http_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;
    Ok(client)
}

/// Fetches a page body, treating any non-success status or network error as
/// a page failure.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let page_fetch_err = |source: reqwest::Error| MirrorError::PageFetch {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(page_fetch_err)?
        .error_for_status()
        .map_err(page_fetch_err)?;

    response.text().await.map_err(page_fetch_err)
}
