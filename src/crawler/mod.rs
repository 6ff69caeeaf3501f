//! Crawl engine: discovery, fetching, asset extraction and mirroring
//!
//! Control flow: the discovery engine (browser-rendered, recursive,
//! depth-bounded) produces the page set; the downloader then walks it
//! sequentially, fanning out each page's asset fetches up to the worker
//! limit. The coordinator ties the phases together and guarantees the
//! final report.

mod assets;
mod coordinator;
mod discovery;
mod downloader;
mod fetcher;

pub use assets::{extract_assets, AssetKind, AssetRef};
pub use coordinator::{run_crawl, Coordinator};
pub use discovery::DiscoveryEngine;
pub use downloader::Downloader;
pub use fetcher::{build_http_client, fetch_page};
