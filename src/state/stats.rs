//! Thread-safe crawl accounting
//!
//! Counters and the failed-downloads list share one lock, mirroring how
//! they are always updated together when a page fails.

use chrono::{DateTime, Utc};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct StatsInner {
    total_pages: u64,
    successful_pages: u64,
    failed_pages: u64,
    total_files: u64,
    successful_files: u64,
    failed_files: u64,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    failed_urls: Vec<String>,
}

/// Mutex-guarded counters updated by discovery and the downloader,
/// read once at report time via [`snapshot`](CrawlStats::snapshot).
#[derive(Debug, Default)]
pub struct CrawlStats {
    inner: Mutex<StatsInner>,
}

/// Point-in-time copy of the counters, taken for report generation
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub total_pages: u64,
    pub successful_pages: u64,
    pub failed_pages: u64,
    pub total_files: u64,
    pub successful_files: u64,
    pub failed_files: u64,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub failed_urls: Vec<String>,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the run start timestamp.
    pub fn mark_start(&self) {
        self.inner.lock().unwrap().start_time = Some(Utc::now());
    }

    /// Records the run end timestamp.
    pub fn mark_end(&self) {
        self.inner.lock().unwrap().end_time = Some(Utc::now());
    }

    /// Sets the size of the discovered page set.
    pub fn set_total_pages(&self, count: u64) {
        self.inner.lock().unwrap().total_pages = count;
    }

    /// A page downloaded end-to-end; `asset_count` is the number of assets
    /// extracted from it, including ones later skipped as already claimed.
    pub fn record_page_success(&self, asset_count: u64) {
        let mut inner = self.inner.lock().unwrap();
        inner.successful_pages += 1;
        inner.total_files += asset_count;
    }

    /// A page that failed at any point; recorded in the failed list under
    /// the same lock acquisition as the counter.
    pub fn record_page_failure(&self, url: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.failed_pages += 1;
        inner.failed_urls.push(url.to_string());
    }

    pub fn record_file_success(&self) {
        self.inner.lock().unwrap().successful_files += 1;
    }

    pub fn record_file_failure(&self) {
        self.inner.lock().unwrap().failed_files += 1;
    }

    /// Copies the current counters out for report generation.
    pub fn snapshot(&self) -> StatsSnapshot {
        let inner = self.inner.lock().unwrap();
        StatsSnapshot {
            total_pages: inner.total_pages,
            successful_pages: inner.successful_pages,
            failed_pages: inner.failed_pages,
            total_files: inner.total_files,
            successful_files: inner.successful_files,
            failed_files: inner.failed_files,
            start_time: inner.start_time,
            end_time: inner.end_time,
            failed_urls: inner.failed_urls.clone(),
        }
    }
}

impl StatsSnapshot {
    /// Wall-clock duration between the recorded start and end marks.
    pub fn duration_seconds(&self) -> f64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                (end - start).num_milliseconds() as f64 / 1000.0
            }
            _ => 0.0,
        }
    }
}
