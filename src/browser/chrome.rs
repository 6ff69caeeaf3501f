//! Chromium-backed page renderer
//!
//! Launches one headless Chromium instance for the lifetime of the crawl and
//! opens a fresh page per discovery node. The CDP event handler runs on its
//! own task and must be aborted when the renderer is dropped, otherwise it
//! outlives the browser process.

use crate::browser::PageRenderer;
use crate::{MirrorError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

const COLLECT_LINKS_JS: &str =
    "Array.from(document.querySelectorAll('a[href]'), a => a.href)";
const SCROLL_TO_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight)";

/// Headless Chromium session shared by all discovery workers.
pub struct ChromeRenderer {
    browser: Browser,
    handler: JoinHandle<()>,
    /// Upper bound on navigation plus load waiting per node
    load_timeout: Duration,
    /// Pause after scrolling for lazily-loaded links to materialize
    settle_delay: Duration,
}

impl ChromeRenderer {
    /// Launches a headless Chromium and spawns its event handler task.
    pub async fn launch() -> Result<Self> {
        let config = BrowserConfig::builder()
            .request_timeout(Duration::from_secs(60))
            .window_size(1920, 1080)
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--mute-audio")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .build()
            .map_err(MirrorError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| MirrorError::Browser(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler event error: {}", e);
                }
            }
            tracing::debug!("Browser event handler finished");
        });

        Ok(Self {
            browser,
            handler: handler_task,
            load_timeout: Duration::from_secs(60),
            settle_delay: Duration::from_secs(2),
        })
    }

    async fn collect_links(&self, page: &Page, url: &Url) -> Result<Vec<String>> {
        let discovery_err = |message: String| MirrorError::Discovery {
            url: url.to_string(),
            message,
        };

        tokio::time::timeout(self.load_timeout, page.wait_for_navigation())
            .await
            .map_err(|_| discovery_err("navigation timeout".to_string()))?
            .map_err(|e| discovery_err(e.to_string()))?;

        // Trigger lazy loading, then give scripts a moment to insert links.
        page.evaluate(SCROLL_TO_BOTTOM_JS)
            .await
            .map_err(|e| discovery_err(e.to_string()))?;
        tokio::time::sleep(self.settle_delay).await;

        let links: Vec<String> = page
            .evaluate(COLLECT_LINKS_JS)
            .await
            .map_err(|e| discovery_err(e.to_string()))?
            .into_value()
            .map_err(|e| discovery_err(e.to_string()))?;

        Ok(links)
    }
}

#[async_trait]
impl PageRenderer for ChromeRenderer {
    async fn fetch_links(&self, url: &Url) -> Result<Vec<String>> {
        let page = self
            .browser
            .new_page(url.as_str())
            .await
            .map_err(|e| MirrorError::Discovery {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let result = self.collect_links(&page, url).await;

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close page for {}: {}", url, e);
        }

        result
    }
}

impl Drop for ChromeRenderer {
    fn drop(&mut self) {
        // Browser::drop kills the Chromium process; the handler task would
        // otherwise poll a dead connection forever.
        self.handler.abort();
    }
}
