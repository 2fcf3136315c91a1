//! Job-Scout: proxy-backed job listing retrieval
//!
//! This crate fetches job-board search pages (or API responses) through an
//! authenticated forward proxy, extracts a bounded list of job postings, and
//! degrades to clearly-labelled synthetic data when a board blocks the request
//! or nothing could be extracted.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod scout;
pub mod sources;

use thiserror::Error;

/// Main error type for Job-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown source: {id} (available: {})", available.join(", "))]
    UnknownSource { id: String, available: Vec<String> },

    #[error("Request to {url} failed after {attempts} attempt(s): {message}")]
    Transport {
        url: String,
        attempts: u32,
        message: String,
    },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing proxy credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Job-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{ExtractionStrategy, JobRecord};
pub use fetch::{FetchOutcome, ProxyHttpClient, ResponseClass};
pub use scout::{DataOrigin, Scout, SearchRequest, SearchResult};
pub use sources::{SourceConfig, SourceRegistry};
