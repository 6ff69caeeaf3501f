//! Webmirror main entry point
//!
//! Command-line interface for the depth-bounded site mirroring crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;
use webmirror::config::{parse_keyword_list, CrawlConfig};
use webmirror::crawler::run_crawl;

/// Webmirror: mirror a website and its assets to local storage
///
/// Starting from a seed URL, webmirror discovers reachable pages up to a
/// depth bound (rendering each page in a headless browser so script-built
/// links are found), then downloads every page with its stylesheets,
/// scripts and media, and writes a JSON report of the run.
#[derive(Parser, Debug)]
#[command(name = "webmirror")]
#[command(version = "0.1.0")]
#[command(about = "Mirror a website and its assets to local storage", long_about = None)]
struct Cli {
    /// Starting URL to mirror
    #[arg(long)]
    url: String,

    /// Directory to save files under
    #[arg(long, default_value = "./web_collection")]
    output: PathBuf,

    /// Concurrency limit for discovery and asset downloads
    #[arg(long, default_value_t = 5)]
    workers: usize,

    /// Delay between page downloads, in seconds
    #[arg(long, default_value_t = 1.0)]
    delay: f64,

    /// How many link levels to follow from the seed
    #[arg(long, default_value_t = 1)]
    depth: u32,

    /// Comma-separated keywords a URL must contain
    #[arg(long)]
    include: Option<String>,

    /// Comma-separated keywords a URL must not contain
    #[arg(long)]
    exclude: Option<String>,

    /// Only follow links on the seed's domain
    #[arg(long)]
    stay_within_domain: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let seed_url = Url::parse(&cli.url)
        .with_context(|| format!("invalid seed URL '{}'", cli.url))?;

    let config = CrawlConfig {
        seed_url,
        output_dir: cli.output,
        workers: cli.workers,
        page_delay: Duration::from_secs_f64(cli.delay.max(0.0)),
        max_depth: cli.depth,
        include_keywords: parse_keyword_list(cli.include.as_deref()),
        exclude_keywords: parse_keyword_list(cli.exclude.as_deref()),
        stay_within_domain: cli.stay_within_domain,
    };

    tracing::info!("Seed URL: {}", config.seed_url);
    tracing::info!("Output directory: {}", config.output_dir.display());

    let report = run_crawl(config).await.context("crawl failed")?;
    tracing::info!(
        "Crawl finished: {}/{} pages mirrored",
        report.summary.successful_pages,
        report.summary.total_pages_found
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webmirror=info,warn"),
            1 => EnvFilter::new("webmirror=debug,info"),
            2 => EnvFilter::new("webmirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
