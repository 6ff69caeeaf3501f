//! Webmirror: a depth-bounded site mirroring crawler
//!
//! This crate discovers the pages reachable from a seed URL (rendering each
//! node in a headless browser so script-generated links are found), then
//! downloads every page together with its stylesheets, scripts and media
//! into a per-page directory, finishing with a JSON report of the run.

pub mod browser;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for webmirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Discovery failed for {url}: {message}")]
    Discovery { url: String, message: String },

    #[error("Page fetch failed for {url}: {source}")]
    PageFetch { url: String, source: reqwest::Error },

    #[error("Asset fetch failed for {url}: {message}")]
    AssetFetch { url: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for webmirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use state::{CrawlStats, VisitedRegistry};
pub use url::{extract_authority, is_eligible};
