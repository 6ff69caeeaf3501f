//! Crawl coordinator
//!
//! Orchestrates the two phases of a run: discovery produces the page set,
//! then the downloader walks it one page at a time with the configured
//! delay. The final report is produced on every exit path: completion,
//! error, or interrupt.

use crate::browser::{ChromeRenderer, PageRenderer};
use crate::config::{validate, CrawlConfig};
use crate::crawler::discovery::DiscoveryEngine;
use crate::crawler::downloader::Downloader;
use crate::crawler::fetcher::build_http_client;
use crate::output::{build_report, print_report, write_report, FinalReport};
use crate::state::{CrawlStats, VisitedRegistry};
use crate::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Owns the per-run state bundle and drives the crawl phases.
///
/// Registry and stats are created here and dropped when the coordinator is;
/// nothing survives between runs.
pub struct Coordinator {
    config: Arc<CrawlConfig>,
    registry: Arc<VisitedRegistry>,
    stats: Arc<CrawlStats>,
    renderer: Arc<dyn PageRenderer>,
    shutdown: Arc<AtomicBool>,
}

impl Coordinator {
    /// Validates the configuration and assembles a fresh state bundle.
    pub fn new(config: CrawlConfig, renderer: Arc<dyn PageRenderer>) -> Result<Self> {
        validate(&config)?;
        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(VisitedRegistry::new()),
            stats: Arc::new(CrawlStats::new()),
            renderer,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Signals the run to stop issuing new work. Already-running operations
    /// finish; the report is still produced.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Runs the crawl and returns the final report.
    ///
    /// Report generation is unconditional: the report file and console
    /// summary are produced before any run error is propagated, whether the
    /// run completed, failed, or was stopped via [`request_shutdown`]
    /// (or Ctrl-C).
    ///
    /// # Returns
    ///
    /// * `Ok(FinalReport)` - The run finished; the report is also on disk
    ///   as `final_report.json` in the output directory
    /// * `Err(MirrorError)` - The run aborted (e.g. the output directory
    ///   could not be created); a report was still produced from whatever
    ///   had accumulated
    ///
    /// [`request_shutdown`]: Coordinator::request_shutdown
    pub async fn run(&self) -> Result<FinalReport> {
        self.stats.mark_start();
        self.install_interrupt_handler();

        let run_result = self.run_phases().await;

        self.stats.mark_end();
        let report = build_report(&self.stats.snapshot(), &self.config);
        if let Err(e) = write_report(&report, &self.config.output_dir).await {
            tracing::error!("Failed to write final report: {}", e);
        }
        print_report(&report);

        run_result?;
        Ok(report)
    }

    async fn run_phases(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.config.output_dir).await?;

        // Phase 1: discover the page set.
        tracing::info!("Phase 1: discovering pages from {}", self.config.seed_url);
        let engine = DiscoveryEngine::new(
            Arc::clone(&self.config),
            Arc::clone(&self.registry),
            Arc::clone(&self.renderer),
            Arc::clone(&self.shutdown),
        );
        let pages = engine.discover().await;
        self.stats.set_total_pages(pages.len() as u64);
        tracing::info!("Discovered {} pages to process", pages.len());

        // Phase 2: download pages sequentially, assets concurrently.
        tracing::info!("Phase 2: downloading");
        let downloader = Downloader::new(
            build_http_client()?,
            Arc::clone(&self.config),
            Arc::clone(&self.registry),
            Arc::clone(&self.stats),
        );

        let total = pages.len();
        for (index, page_url) in pages.iter().enumerate() {
            if self.shutdown.load(Ordering::SeqCst) {
                tracing::warn!("Interrupted; stopping before page {}/{}", index + 1, total);
                break;
            }

            tracing::info!("[{}/{}] Downloading: {}", index + 1, total, page_url);
            downloader.download_page(page_url).await;

            // Pace the target server; no delay after the last page.
            if index + 1 < total {
                tokio::time::sleep(self.config.page_delay).await;
            }
        }

        Ok(())
    }

    /// Flips the shutdown flag on Ctrl-C so both phases stop issuing work.
    fn install_interrupt_handler(&self) {
        let shutdown = Arc::clone(&self.shutdown);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupt received; finishing current work and writing report");
                shutdown.store(true, Ordering::SeqCst);
            }
        });
    }
}

/// Runs a complete crawl with the Chromium-backed renderer.
pub async fn run_crawl(config: CrawlConfig) -> Result<FinalReport> {
    let renderer: Arc<dyn PageRenderer> = Arc::new(ChromeRenderer::launch().await?);
    let coordinator = Coordinator::new(config, renderer)?;
    coordinator.run().await
}
