//! Source handling module for Job-Scout
//!
//! This module provides the registry of known job sources and the URL
//! builder that turns a query into a source-specific search URL.

mod registry;
mod url_builder;

pub use registry::{Difficulty, SourceConfig, SourceRegistry, UrlStyle};
pub use url_builder::{build_search_url, slug};
