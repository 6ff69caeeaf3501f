//! Asset extraction from parsed pages
//!
//! Walks a parsed document and yields the sub-resources it references:
//! stylesheets, then scripts, then media, in first-seen order with exact
//! duplicates collapsed.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Category of a referenced sub-resource.
///
/// Informational only: it never changes download behavior, but names the
/// kind subdirectory and shows up in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Css,
    Js,
    Media,
}

impl AssetKind {
    /// Subdirectory name for this kind inside a page directory.
    pub fn dir_name(&self) -> &'static str {
        match self {
            AssetKind::Css => "css",
            AssetKind::Js => "js",
            AssetKind::Media => "media",
        }
    }
}

/// A referenced sub-resource: its kind and absolute URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub kind: AssetKind,
    pub url: Url,
}

/// Extracts every referenced asset from a parsed page.
///
/// Output order is stylesheets, scripts, then media in document order;
/// duplicate `(kind, url)` pairs keep their first occurrence.
///
/// # Arguments
///
/// * `document` - The parsed page to walk
/// * `page_url` - The page's own URL, used to resolve relative references
///
/// # Returns
///
/// Every resolvable asset reference found, as absolute URLs tagged with
/// their [`AssetKind`]. References that fail to resolve are skipped.
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use url::Url;
/// use webmirror::crawler::{extract_assets, AssetKind};
///
/// let document = Html::parse_document(
///     r#"<link rel="stylesheet" href="/main.css"><img src="logo.png">"#,
/// );
/// let page_url = Url::parse("https://example.com/about").unwrap();
///
/// let assets = extract_assets(&document, &page_url);
/// assert_eq!(assets.len(), 2);
/// assert_eq!(assets[0].kind, AssetKind::Css);
/// assert_eq!(assets[1].url.as_str(), "https://example.com/logo.png");
/// ```
pub fn extract_assets(document: &Html, page_url: &Url) -> Vec<AssetRef> {
    let mut assets = Vec::new();
    let mut seen: HashSet<(AssetKind, String)> = HashSet::new();

    let mut push = |kind: AssetKind, href: &str, assets: &mut Vec<AssetRef>| {
        if let Ok(resolved) = page_url.join(href.trim()) {
            if seen.insert((kind, resolved.to_string())) {
                assets.push(AssetRef {
                    kind,
                    url: resolved,
                });
            }
        }
    };

    // Stylesheets
    if let Ok(selector) = Selector::parse(r#"link[rel="stylesheet"][href]"#) {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                push(AssetKind::Css, href, &mut assets);
            }
        }
    }

    // Scripts
    if let Ok(selector) = Selector::parse("script[src]") {
        for element in document.select(&selector) {
            if let Some(src) = element.value().attr("src") {
                push(AssetKind::Js, src, &mut assets);
            }
        }
    }

    // Media: images, sources, audio, video
    if let Ok(selector) = Selector::parse("img, source, audio, video") {
        for element in document.select(&selector) {
            for attr in ["src", "data-src", "srcset"] {
                let Some(value) = element.value().attr(attr) else {
                    continue;
                };
                if attr == "srcset" {
                    // Each comma-separated entry is "<url> <descriptor>";
                    // the URL is the first whitespace-separated token.
                    for entry in value.split(',') {
                        if let Some(candidate) = entry.split_whitespace().next() {
                            push(AssetKind::Media, candidate, &mut assets);
                        }
                    }
                } else {
                    push(AssetKind::Media, value, &mut assets);
                }
            }
        }
    }

    assets
}
