//! Filesystem mirror layout
//!
//! Every downloaded page gets its own directory under the output root, named
//! after the page title when one is usable and the URL path otherwise.
//! Assets land in kind subdirectories (`css/`, `js/`, `media/`) inside the
//! page directory. All names are reduced to filesystem-safe characters.

use sha2::{Digest, Sha256};
use url::Url;

/// Maximum length of a derived directory or file name
const MAX_NAME_LEN: usize = 70;

/// Stable 8-hex-digit digest prefix used for fallback names.
fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    hex::encode(&digest[..4])
}

/// Derives the output directory name for a page.
///
/// Preference order:
/// 1. the document title, stripped of non-word/space/hyphen characters,
///    whitespace collapsed to hyphens, lowercased, truncated to 70 chars,
///    when the normalized form is longer than 3 characters;
/// 2. the URL path with slashes replaced by underscores and everything but
///    word characters and hyphens dropped, truncated to 70 chars;
/// 3. `page_<hash>` derived from the URL, stable across runs.
pub fn page_dir_name(title: Option<&str>, url: &Url) -> String {
    if let Some(title) = title {
        let cleaned: String = title
            .trim()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
            .collect();
        let name: String = cleaned
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        if name.chars().count() > 3 {
            return truncate(&name, MAX_NAME_LEN);
        }
    }

    let path_name: String = url
        .path()
        .replace('/', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    let path_name = truncate(&path_name, MAX_NAME_LEN);

    if path_name.is_empty() || path_name.chars().all(|c| c == '_') {
        format!("page_{}", short_hash(url.as_str()))
    } else {
        path_name
    }
}

/// Derives a filesystem-safe file name for an asset from its URL's path
/// basename, or `asset_<hash>.dat` when the path has no usable basename.
pub fn asset_file_name(url: &Url) -> String {
    let basename = url
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or("");

    if basename.is_empty() {
        return format!("asset_{}.dat", short_hash(url.as_str()));
    }

    let sanitized: String = basename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    truncate(&sanitized, MAX_NAME_LEN)
}

/// Char-boundary-safe prefix truncation.
fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
