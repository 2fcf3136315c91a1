//! Configuration module for Job-Scout
//!
//! This module handles loading an optional TOML configuration file, applying
//! proxy credentials from the environment, and validating the merged result.
//!
//! # Example
//!
//! ```no_run
//! use job_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Some(Path::new("scout.toml"))).unwrap();
//! println!("Max attempts per fetch: {}", config.client.max_attempts);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ClientConfig, Config, DelayRange, FileConfig, PacingConfig, PartialProxyConfig, ProxyConfig,
    SearchConfig,
};

// Re-export parser functions
pub use parser::{
    load_config, load_config_with_env, parse_config_str, ENV_PROXY_PASSWORD, ENV_PROXY_SERVER,
    ENV_PROXY_USERNAME,
};
pub use validation::validate;
