//! Configuration types for webmirror
//!
//! A [`CrawlConfig`] is built once by the CLI, validated, and then read-only
//! for the lifetime of a run.

mod types;
mod validation;

pub use types::{parse_keyword_list, CrawlConfig};
pub use validation::validate;
