//! Link discovery engine
//!
//! Recursively expands the reachable page set from the seed, one renderer
//! session per node, bounded by the configured worker count. The registry
//! guarantees each node is expanded at most once even when several parents
//! discover it concurrently.

use crate::browser::PageRenderer;
use crate::config::CrawlConfig;
use crate::state::VisitedRegistry;
use crate::url::is_eligible;
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Expands the page set reachable from the seed within the depth bound.
pub struct DiscoveryEngine {
    config: Arc<CrawlConfig>,
    registry: Arc<VisitedRegistry>,
    renderer: Arc<dyn PageRenderer>,
    limiter: Arc<Semaphore>,
    shutdown: Arc<AtomicBool>,
    base_domain: String,
}

impl DiscoveryEngine {
    pub fn new(
        config: Arc<CrawlConfig>,
        registry: Arc<VisitedRegistry>,
        renderer: Arc<dyn PageRenderer>,
        shutdown: Arc<AtomicBool>,
    ) -> Arc<Self> {
        let limiter = Arc::new(Semaphore::new(config.workers));
        let base_domain = config.base_domain();
        Arc::new(Self {
            config,
            registry,
            renderer,
            limiter,
            shutdown,
            base_domain,
        })
    }

    /// Runs discovery from the seed and returns the full page set. The seed
    /// is always part of the result, even when its own expansion fails.
    pub async fn discover(self: &Arc<Self>) -> HashSet<String> {
        let seed = self.config.seed_url.clone();
        let mut pages = Arc::clone(self).expand(seed, 0).await;
        pages.insert(self.config.seed_url.to_string());
        pages
    }

    /// Expands one node: claims it, renders it, records its eligible links
    /// as pages, and recurses over them. Returns every page URL contributed
    /// by this subtree.
    fn expand(self: Arc<Self>, url: Url, depth: u32) -> BoxFuture<'static, HashSet<String>> {
        async move {
            let mut found = HashSet::new();

            if depth > self.config.max_depth {
                return found;
            }
            if self.shutdown.load(Ordering::SeqCst) {
                return found;
            }
            if !self.registry.claim(url.as_str()) {
                return found;
            }

            // The permit covers only the renderer session, not the recursion
            // below; a parent awaiting children while holding a permit would
            // starve the pool at depths beyond the worker count.
            let links = {
                let _permit = match self.limiter.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return found,
                };

                tracing::info!("[depth {}] Discovering: {}", depth, url);
                match self.renderer.fetch_links(&url).await {
                    Ok(links) => links,
                    Err(e) => {
                        tracing::warn!("Discovery error on {}: {}", url, e);
                        return found;
                    }
                }
            };

            // Links found here would live at depth + 1; outside the bound
            // they are neither recorded nor submitted for expansion.
            if depth + 1 > self.config.max_depth {
                return found;
            }

            let eligible: Vec<Url> = links
                .iter()
                .filter_map(|href| url.join(href).ok())
                .filter(|link| is_eligible(link.as_str(), &self.base_domain, &self.config))
                .collect();

            let mut tasks = JoinSet::new();
            for link in eligible {
                found.insert(link.to_string());
                tasks.spawn(Arc::clone(&self).expand(link, depth + 1));
            }

            while let Some(result) = tasks.join_next().await {
                match result {
                    Ok(sub) => found.extend(sub),
                    Err(e) => tracing::warn!("Discovery task panicked: {}", e),
                }
            }

            found
        }
        .boxed()
    }
}
