//! URL handling for webmirror
//!
//! Provides authority extraction and the traversal eligibility filter.

mod filter;

pub use filter::is_eligible;

use url::Url;

/// Extracts the authority of a URL: the host, plus the port when it is not
/// the scheme default. Both sides of a domain-scoping comparison go through
/// this function so `http://127.0.0.1:8080/a` and `http://127.0.0.1:8080/b`
/// agree on `127.0.0.1:8080`.
pub fn extract_authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_authority_plain_host() {
        let url = Url::parse("https://example.com/page").unwrap();
        assert_eq!(extract_authority(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_authority_with_port() {
        let url = Url::parse("http://127.0.0.1:4567/page").unwrap();
        assert_eq!(extract_authority(&url), Some("127.0.0.1:4567".to_string()));
    }

    #[test]
    fn test_extract_authority_default_port_elided() {
        let url = Url::parse("https://example.com:443/page").unwrap();
        assert_eq!(extract_authority(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_authority_no_host() {
        let url = Url::parse("mailto:a@b.com").unwrap();
        assert_eq!(extract_authority(&url), None);
    }
}
