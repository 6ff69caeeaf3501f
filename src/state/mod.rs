//! Shared run state: the visited registry and the stats aggregator
//!
//! Both live for exactly one crawl run. They are the only cross-worker
//! mutable state in the engine, each behind its own mutex.

mod registry;
mod stats;

pub use registry::VisitedRegistry;
pub use stats::{CrawlStats, StatsSnapshot};
