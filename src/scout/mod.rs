//! Operations exposed to callers
//!
//! - `search_jobs`: the full fetch, classify and extract pipeline
//! - `test_proxy`: a single IP-echo request through the proxy
//! - `get_proxy_info` / `get_scraper_info`: static descriptions
//! - `invoke`: name-based dispatch over the above with JSON arguments

mod invoke;
mod pipeline;
mod result;

pub use invoke::OPERATIONS;
pub use pipeline::{Scout, SearchRequest};
pub use result::{
    DataOrigin, ProxyInfo, ProxyTestResult, RotationSample, ScraperInfo, SearchResult, SourceInfo,
};
