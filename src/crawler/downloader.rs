//! Page and asset downloader
//!
//! Pages are processed strictly one at a time by the coordinator; within a
//! page, asset fetches fan out concurrently up to the worker limit. Assets
//! claim their URL in the shared registry first, so a resource referenced
//! by several pages is only stored once.

use crate::config::CrawlConfig;
use crate::crawler::assets::{extract_assets, AssetRef};
use crate::crawler::fetcher::fetch_page;
use crate::state::{CrawlStats, VisitedRegistry};
use crate::storage::{asset_file_name, page_dir_name};
use crate::{MirrorError, Result};
use futures::StreamExt;
use reqwest::Client;
use scraper::{Html, Selector};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Downloads discovered pages and their assets into the mirror tree.
pub struct Downloader {
    client: Client,
    config: Arc<CrawlConfig>,
    registry: Arc<VisitedRegistry>,
    stats: Arc<CrawlStats>,
}

impl Downloader {
    pub fn new(
        client: Client,
        config: Arc<CrawlConfig>,
        registry: Arc<VisitedRegistry>,
        stats: Arc<CrawlStats>,
    ) -> Self {
        Self {
            client,
            config,
            registry,
            stats,
        }
    }

    /// Downloads one page end-to-end and records the outcome. Failures are
    /// terminal for the page: logged, counted, never retried.
    pub async fn download_page(&self, page_url: &str) {
        match self.process_page(page_url).await {
            Ok(asset_count) => {
                self.stats.record_page_success(asset_count as u64);
            }
            Err(e) => {
                tracing::warn!("Failed to process {}: {}", page_url, e);
                self.stats.record_page_failure(page_url);
            }
        }
    }

    /// Fetches, stores and mirrors a single page; returns how many assets
    /// it referenced (downloaded or skipped).
    async fn process_page(&self, page_url: &str) -> Result<usize> {
        let url = Url::parse(page_url)?;
        let body = fetch_page(&self.client, page_url).await?;

        // scraper's Html is not Send; parsing stays inside this call and
        // never crosses an await point.
        let (dir_name, assets) = parse_page(&body, &url);

        let page_dir = self.config.output_dir.join(&dir_name);
        tokio::fs::create_dir_all(&page_dir).await?;
        tokio::fs::write(page_dir.join("index.html"), &body).await?;

        let asset_count = assets.len();
        tracing::info!(
            "Saved page {} -> {} ({} assets)",
            page_url,
            dir_name,
            asset_count
        );

        futures::stream::iter(assets)
            .for_each_concurrent(self.config.workers, |asset| {
                let page_dir = page_dir.clone();
                async move {
                    self.download_asset(asset, &page_dir).await;
                }
            })
            .await;

        Ok(asset_count)
    }

    /// Claims and downloads one asset, counting the outcome. A URL already
    /// claimed (by discovery or by an earlier page's assets) is skipped
    /// silently and affects no counter.
    async fn download_asset(&self, asset: AssetRef, page_dir: &Path) {
        if !self.registry.claim(asset.url.as_str()) {
            tracing::debug!("Skipping already-claimed asset: {}", asset.url);
            return;
        }

        match self.fetch_asset_to_disk(&asset, page_dir).await {
            Ok(path) => {
                tracing::debug!("Saved asset {} -> {}", asset.url, path.display());
                self.stats.record_file_success();
            }
            Err(e) => {
                tracing::warn!("Asset download failed: {}", e);
                self.stats.record_file_failure();
            }
        }
    }

    /// Streams an asset body into `<page_dir>/<kind>/<file name>`.
    async fn fetch_asset_to_disk(&self, asset: &AssetRef, page_dir: &Path) -> Result<PathBuf> {
        let asset_fetch_err = |message: String| MirrorError::AssetFetch {
            url: asset.url.to_string(),
            message,
        };

        let response = self
            .client
            .get(asset.url.clone())
            .send()
            .await
            .map_err(|e| asset_fetch_err(e.to_string()))?
            .error_for_status()
            .map_err(|e| asset_fetch_err(e.to_string()))?;

        let kind_dir = page_dir.join(asset.kind.dir_name());
        tokio::fs::create_dir_all(&kind_dir).await?;
        let file_path = kind_dir.join(asset_file_name(&asset.url));

        let mut file = tokio::fs::File::create(&file_path).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| asset_fetch_err(e.to_string()))?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(file_path)
    }
}

/// Parses a fetched page, deriving its output directory name and asset list.
fn parse_page(body: &str, url: &Url) -> (String, Vec<AssetRef>) {
    let document = Html::parse_document(body);
    let title = extract_title(&document);
    let dir_name = page_dir_name(title.as_deref(), url);
    let assets = extract_assets(&document, url);
    (dir_name, assets)
}

/// Extracts the text of the first `<title>` element, if any.
fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
