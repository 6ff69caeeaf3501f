//! Headless-browser capability for link discovery
//!
//! The discovery engine talks to a [`PageRenderer`] rather than a concrete
//! browser library. The production implementation drives Chromium over CDP;
//! tests substitute stub renderers with canned link maps.

mod chrome;

pub use chrome::ChromeRenderer;

use crate::Result;
use async_trait::async_trait;
use url::Url;

/// A session capable of rendering a page and reporting its anchor targets.
///
/// Implementations navigate to the URL, wait for the page to load, scroll to
/// the bottom so lazily-loaded content materializes, and return every
/// `a[href]` target found. Hrefs may be returned in absolute or relative
/// form; the caller resolves them against the page URL.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn fetch_links(&self, url: &Url) -> Result<Vec<String>>;
}
