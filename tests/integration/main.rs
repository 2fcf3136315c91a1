//! Integration tests for Job-Scout
//!
//! These tests use wiremock servers standing in for job boards and the
//! IP-echo endpoint, and drive the full pipeline end-to-end with pacing and
//! retry backoff disabled.

mod config_tests;
mod pacing_tests;
mod proxy_tests;

use job_scout::config::{ClientConfig, Config, DelayRange, PacingConfig, ProxyConfig, SearchConfig};
use job_scout::fetch::{NoPacing, ProxyHttpClient};
use job_scout::Scout;
use std::collections::BTreeMap;
use wiremock::MockServer;

/// Creates a test configuration pointing `sources` (and the IP echo) at `server`
pub fn create_test_config(server: &MockServer, sources: &[&str]) -> Config {
    let overrides: BTreeMap<String, String> = sources
        .iter()
        .map(|id| (id.to_string(), server.uri()))
        .collect();

    Config {
        proxy: ProxyConfig {
            server: "gate.example.net:9999".to_string(),
            username: "test-user".to_string(),
            password: "test-pass".to_string(),
        },
        client: ClientConfig {
            max_attempts: 2,
            retry_backoff: DelayRange::ZERO,
            ip_echo_url: format!("{}/ip", server.uri()),
            ..ClientConfig::default()
        },
        search: SearchConfig::default(),
        pacing: PacingConfig {
            short: DelayRange::ZERO,
            normal: DelayRange::ZERO,
            long: DelayRange::ZERO,
        },
        sources: overrides,
    }
}

/// Builds a scout that talks to `server` directly, without pacing
pub fn create_test_scout(server: &MockServer, sources: &[&str]) -> Scout {
    let config = create_test_config(server, sources);
    let client = ProxyHttpClient::direct(&config.client).expect("Failed to build client");
    Scout::with_parts(config, client, Box::new(NoPacing))
}
