//! Traversal eligibility filter
//!
//! Pure predicate deciding whether a URL may be traversed or downloaded,
//! given the scope rules of the current run. No side effects; deterministic
//! for a given configuration.

use crate::config::CrawlConfig;
use url::Url;

/// Schemes that never lead to fetchable content
const REJECTED_PREFIXES: [&str; 3] = ["mailto:", "tel:", "javascript:"];

/// Decides whether a URL may be traversed or downloaded.
///
/// Rules, applied in order:
/// - empty input is rejected;
/// - `mailto:`, `tel:` and `javascript:` URLs are rejected regardless of
///   any other filter;
/// - with `stay_within_domain` set, the URL's authority must match
///   `base_domain` exactly (no subdomain folding);
/// - a non-empty include list requires at least one listed substring;
/// - a non-empty exclude list forbids every listed substring.
///
/// # Arguments
///
/// * `url` - Candidate URL, already resolved to absolute form
/// * `base_domain` - Authority of the seed URL, as produced by
///   [`extract_authority`](crate::url::extract_authority)
/// * `config` - The run configuration holding scope and keyword filters
///
/// # Returns
///
/// * `true` - The URL passes every filter and may be processed
/// * `false` - The URL is out of scope for this run
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use std::time::Duration;
/// use url::Url;
/// use webmirror::config::CrawlConfig;
/// use webmirror::is_eligible;
///
/// let config = CrawlConfig {
///     seed_url: Url::parse("https://example.com/").unwrap(),
///     output_dir: PathBuf::from("./web_collection"),
///     workers: 5,
///     page_delay: Duration::from_secs(1),
///     max_depth: 1,
///     include_keywords: vec![],
///     exclude_keywords: vec![],
///     stay_within_domain: true,
/// };
///
/// assert!(is_eligible("https://example.com/blog", "example.com", &config));
/// assert!(!is_eligible("https://other.com/blog", "example.com", &config));
/// assert!(!is_eligible("mailto:hi@example.com", "example.com", &config));
/// ```
pub fn is_eligible(url: &str, base_domain: &str, config: &CrawlConfig) -> bool {
    if url.is_empty() {
        return false;
    }

    if REJECTED_PREFIXES.iter().any(|p| url.starts_with(p)) {
        return false;
    }

    if config.stay_within_domain {
        let authority = Url::parse(url)
            .ok()
            .and_then(|u| crate::url::extract_authority(&u));
        match authority {
            Some(a) if a == base_domain => {}
            _ => return false,
        }
    }

    if !config.include_keywords.is_empty()
        && !config.include_keywords.iter().any(|k| url.contains(k))
    {
        return false;
    }

    if config.exclude_keywords.iter().any(|k| url.contains(k)) {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn create_test_config() -> CrawlConfig {
        CrawlConfig {
            seed_url: Url::parse("https://example.com/").unwrap(),
            output_dir: PathBuf::from("./out"),
            workers: 5,
            page_delay: Duration::from_secs(1),
            max_depth: 1,
            include_keywords: vec![],
            exclude_keywords: vec![],
            stay_within_domain: false,
        }
    }

    #[test]
    fn test_rejects_empty() {
        let config = create_test_config();
        assert!(!is_eligible("", "example.com", &config));
    }

    #[test]
    fn test_rejects_mailto() {
        let config = create_test_config();
        assert!(!is_eligible("mailto:a@b.com", "example.com", &config));
    }

    #[test]
    fn test_rejects_tel() {
        let config = create_test_config();
        assert!(!is_eligible("tel:+1234567890", "example.com", &config));
    }

    #[test]
    fn test_rejects_javascript() {
        let config = create_test_config();
        assert!(!is_eligible("javascript:void(0)", "example.com", &config));
    }

    #[test]
    fn test_rejects_special_schemes_despite_matching_keywords() {
        let mut config = create_test_config();
        config.include_keywords = vec!["mailto".to_string()];
        assert!(!is_eligible("mailto:blog@b.com", "example.com", &config));
    }

    #[test]
    fn test_domain_scoping_rejects_other_host() {
        let mut config = create_test_config();
        config.stay_within_domain = true;
        assert!(!is_eligible("https://other.com/x", "example.com", &config));
    }

    #[test]
    fn test_domain_scoping_accepts_same_host() {
        let mut config = create_test_config();
        config.stay_within_domain = true;
        assert!(is_eligible("https://example.com/x", "example.com", &config));
    }

    #[test]
    fn test_domain_scoping_no_subdomain_folding() {
        let mut config = create_test_config();
        config.stay_within_domain = true;
        assert!(!is_eligible(
            "https://sub.example.com/x",
            "example.com",
            &config
        ));
    }

    #[test]
    fn test_domain_scoping_rejects_unparseable() {
        let mut config = create_test_config();
        config.stay_within_domain = true;
        assert!(!is_eligible("not a url", "example.com", &config));
    }

    #[test]
    fn test_domain_scoping_disabled_allows_other_host() {
        let config = create_test_config();
        assert!(is_eligible("https://other.com/x", "example.com", &config));
    }

    #[test]
    fn test_include_keywords() {
        let mut config = create_test_config();
        config.include_keywords = vec!["blog".to_string()];
        assert!(is_eligible("https://example.com/blog/1", "example.com", &config));
        assert!(!is_eligible("https://example.com/about", "example.com", &config));
    }

    #[test]
    fn test_include_keywords_any_match_suffices() {
        let mut config = create_test_config();
        config.include_keywords = vec!["blog".to_string(), "docs".to_string()];
        assert!(is_eligible("https://example.com/docs/x", "example.com", &config));
    }

    #[test]
    fn test_exclude_keywords() {
        let mut config = create_test_config();
        config.exclude_keywords = vec!["logout".to_string()];
        assert!(!is_eligible(
            "https://example.com/logout?next=/",
            "example.com",
            &config
        ));
        assert!(is_eligible("https://example.com/login", "example.com", &config));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let mut config = create_test_config();
        config.include_keywords = vec!["blog".to_string()];
        config.exclude_keywords = vec!["draft".to_string()];
        assert!(!is_eligible(
            "https://example.com/blog/draft-1",
            "example.com",
            &config
        ));
    }

    #[test]
    fn test_port_sensitive_scoping() {
        let mut config = create_test_config();
        config.stay_within_domain = true;
        assert!(is_eligible(
            "http://127.0.0.1:8080/page",
            "127.0.0.1:8080",
            &config
        ));
        assert!(!is_eligible(
            "http://127.0.0.1:9090/page",
            "127.0.0.1:8080",
            &config
        ));
    }
}
