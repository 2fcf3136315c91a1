use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Fully resolved configuration for Job-Scout
///
/// Built once at startup by merging the optional TOML file with environment
/// overrides, then passed by reference to every component that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub proxy: ProxyConfig,
    pub client: ClientConfig,
    pub search: SearchConfig,
    pub pacing: PacingConfig,
    /// Base-URL overrides keyed by source identifier
    pub sources: BTreeMap<String, String>,
}

/// Raw TOML file contents before environment overrides are applied
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub proxy: PartialProxyConfig,
    pub client: ClientConfig,
    pub search: SearchConfig,
    pub pacing: PacingConfig,
    pub sources: BTreeMap<String, String>,
}

/// Proxy credentials as they appear in the file; any field may be missing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PartialProxyConfig {
    pub server: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Authenticated forward-proxy endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// `host:port` of the proxy gateway
    pub server: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// HTTP client behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClientConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Total attempts per fetch (first try included)
    pub max_attempts: u32,

    /// Randomized wait between attempts
    pub retry_backoff: DelayRange,

    /// Endpoint that echoes the caller's IP as `{"origin": "..."}`
    pub ip_echo_url: String,

    /// Browser User-Agent strings; one is picked per client
    pub user_agents: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            max_attempts: 2,
            retry_backoff: DelayRange::new(3000, 6000),
            ip_echo_url: "http://httpbin.org/ip".to_string(),
            user_agents: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0".to_string(),
            ],
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Search request limits and defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchConfig {
    pub default_limit: usize,
    pub max_limit: usize,
    pub default_source: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 50,
            default_source: "reed".to_string(),
        }
    }
}

impl SearchConfig {
    /// Clamps a caller-supplied limit into `1..=max_limit`
    pub fn clamp_limit(&self, requested: i64) -> usize {
        let max = self.max_limit.max(1) as i64;
        requested.clamp(1, max) as usize
    }
}

/// Pacing ranges for each delay category
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PacingConfig {
    pub short: DelayRange,
    pub normal: DelayRange,
    pub long: DelayRange,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            short: DelayRange::new(1000, 2000),
            normal: DelayRange::new(2000, 4000),
            long: DelayRange::new(4000, 7000),
        }
    }
}

/// Inclusive millisecond range a delay is sampled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DelayRange {
    #[serde(rename = "min-ms")]
    pub min_ms: u64,

    #[serde(rename = "max-ms")]
    pub max_ms: u64,
}

impl DelayRange {
    pub const ZERO: DelayRange = DelayRange::new(0, 0);

    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Draws a uniformly distributed duration from the range
    pub fn sample(&self) -> Duration {
        use rand::Rng;

        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }
}
