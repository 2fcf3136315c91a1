//! Fetch module for Job-Scout
//!
//! This module provides:
//! - The proxy-backed HTTP client with retry on block
//! - Randomized pacing between requests
//! - Classification of responses into ok / blocked / empty

mod classify;
mod client;
mod pacing;

pub use classify::{classify, classify_extraction, ResponseClass};
pub use client::{browser_headers, build_proxy_url, FetchOutcome, ProxyHttpClient};
pub use pacing::{pause, DelayCategory, NoPacing, PacingPolicy, RandomPacing};
