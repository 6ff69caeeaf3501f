use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Immutable configuration for a single crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seed URL the crawl starts from
    pub seed_url: Url,

    /// Root directory the mirror is written under
    pub output_dir: PathBuf,

    /// Concurrency limit shared by discovery fan-out and asset downloads
    pub workers: usize,

    /// Delay between consecutive page downloads
    pub page_delay: Duration,

    /// Maximum number of link-following hops from the seed
    pub max_depth: u32,

    /// URL must contain at least one of these substrings (empty = no filter)
    pub include_keywords: Vec<String>,

    /// URL must contain none of these substrings
    pub exclude_keywords: Vec<String>,

    /// Restrict traversal to URLs sharing the seed's authority
    pub stay_within_domain: bool,
}

impl CrawlConfig {
    /// Returns the authority (host, plus port when non-default) of the seed
    /// URL, used as the base domain for scoping.
    pub fn base_domain(&self) -> String {
        crate::url::extract_authority(&self.seed_url).unwrap_or_default()
    }
}

/// Splits a comma-separated keyword argument into a list, dropping empty
/// entries and surrounding whitespace.
pub fn parse_keyword_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}
