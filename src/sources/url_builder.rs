//! Search URL composition
//!
//! Template selection mirrors how the boards lay out their search pages:
//! 1. location supplied and a location template exists → location template
//! 2. otherwise, a location-less template → that template
//! 3. otherwise → generic `/jobs?q=...&l=...` query string
//!
//! The output depends only on its inputs.

use crate::sources::{SourceConfig, UrlStyle};
use crate::Result;
use url::form_urlencoded::byte_serialize;
use url::Url;

/// Builds the search URL for `query` (and optional `location`) on `source`
///
/// # Example
///
/// ```no_run
/// use job_scout::sources::{build_search_url, SourceRegistry};
///
/// let registry = SourceRegistry::builtin();
/// let reed = registry.resolve("reed").unwrap();
/// let url = build_search_url(reed, "Rust Developer", "London").unwrap();
/// assert_eq!(url, "https://www.reed.co.uk/jobs/rust-developer-jobs-in-london");
/// ```
pub fn build_search_url(source: &SourceConfig, query: &str, location: &str) -> Result<String> {
    let base = Url::parse(&source.base_url)?;
    let location = location.trim();

    let path = match (source.search_path, source.search_path_no_loc) {
        (Some(template), _) if !location.is_empty() => {
            fill(template, source.url_style, query, location)
        }
        (_, Some(template)) => fill(template, source.url_style, query, ""),
        _ => generic_query_path(query, location),
    };

    Ok(base.join(&path)?.to_string())
}

fn fill(template: &str, style: UrlStyle, query: &str, location: &str) -> String {
    let encode: fn(&str) -> String = match style {
        UrlStyle::Slug => slug,
        UrlStyle::Encoded => form_encode,
    };

    template
        .replace("{query}", &encode(query))
        .replace("{location}", &encode(location))
}

fn generic_query_path(query: &str, location: &str) -> String {
    let mut path = format!("/jobs?q={}", form_encode(query));
    if !location.is_empty() {
        path.push_str("&l=");
        path.push_str(&form_encode(location));
    }
    path
}

/// `"Rust  Developer"` → `"rust-developer"`, with reserved characters escaped
pub fn slug(text: &str) -> String {
    let hyphenated = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    byte_serialize(hyphenated.as_bytes()).collect()
}

fn form_encode(text: &str) -> String {
    byte_serialize(text.trim().as_bytes()).collect()
}
