//! Result envelopes returned to callers
//!
//! Every operation answers with one of these serializable records, whatever
//! happened along the way. Optional fields are omitted from the JSON when
//! absent.

use crate::config::{DelayRange, PacingConfig};
use crate::extract::JobRecord;
use crate::sources::{Difficulty, SourceConfig};
use serde::Serialize;

/// Whether the `jobs` of an envelope came from the remote source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    /// Extracted from a live response
    Live,
    /// Generated locally; never a real listing
    Synthetic,
    /// No records of either kind
    None,
}

/// Outcome of a `search_jobs` invocation
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub success: bool,

    /// Source identifier as resolved (or as given, when unknown)
    pub source: String,

    /// Display name of the source
    pub site: String,

    pub query: String,
    pub location: String,
    pub total_found: usize,
    pub jobs: Vec<JobRecord>,
    pub data_origin: DataOrigin,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,

    /// Synthetic records offered in place of live ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_data: Option<Vec<JobRecord>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_mode: Option<String>,

    /// Per-request samples of the proxy rotation demo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests: Option<Vec<RotationSample>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_sources: Option<Vec<String>>,
}

impl SearchResult {
    fn base(source: &SourceConfig, query: &str, location: &str) -> Self {
        Self {
            success: false,
            source: source.id.to_string(),
            site: source.name.to_string(),
            query: query.to_string(),
            location: location.to_string(),
            total_found: 0,
            jobs: Vec::new(),
            data_origin: DataOrigin::None,
            message: String::new(),
            error: None,
            tip: None,
            demo_data: None,
            demo_mode: None,
            requests: None,
            available_sources: None,
        }
    }

    /// Live records extracted from the source
    pub fn live(source: &SourceConfig, query: &str, location: &str, jobs: Vec<JobRecord>) -> Self {
        let message = format!(
            "Found {} jobs on {} through the residential proxy",
            jobs.len(),
            source.name
        );
        Self {
            success: true,
            total_found: jobs.len(),
            jobs,
            data_origin: DataOrigin::Live,
            message,
            ..Self::base(source, query, location)
        }
    }

    /// The source refused the request; synthetic records are attached
    pub fn blocked(
        source: &SourceConfig,
        query: &str,
        location: &str,
        status_code: u16,
        demo_data: Vec<JobRecord>,
    ) -> Self {
        Self {
            error: Some(format!("Site blocked request (HTTP {})", status_code)),
            tip: Some(format!(
                "{} is rejecting proxied traffic right now; retry later or try another source",
                source.name
            )),
            message: format!(
                "{} blocked the request; returning {} synthetic demo listings",
                source.name,
                demo_data.len()
            ),
            data_origin: DataOrigin::Synthetic,
            demo_data: Some(demo_data),
            ..Self::base(source, query, location)
        }
    }

    /// The source answered but nothing could be extracted
    pub fn empty(
        source: &SourceConfig,
        query: &str,
        location: &str,
        demo_data: Vec<JobRecord>,
    ) -> Self {
        Self {
            error: Some("Could not parse jobs".to_string()),
            tip: Some(format!(
                "{} answered but its page layout was not recognised; try another source",
                source.name
            )),
            message: format!(
                "{} responded without extractable listings; returning {} synthetic demo listings",
                source.name,
                demo_data.len()
            ),
            data_origin: DataOrigin::Synthetic,
            demo_data: Some(demo_data),
            ..Self::base(source, query, location)
        }
    }

    /// The request never produced a response, or could not be built
    pub fn failed(source: &SourceConfig, query: &str, location: &str, error: String) -> Self {
        Self {
            message: format!("Request to {} failed", source.name),
            error: Some(error),
            tip: Some("Check the proxy credentials and connectivity with test_proxy".to_string()),
            ..Self::base(source, query, location)
        }
    }

    /// Proxy rotation samples for the demo source
    pub fn rotation_demo(
        source: &SourceConfig,
        query: &str,
        location: &str,
        samples: Vec<RotationSample>,
    ) -> Self {
        let mut distinct: Vec<&str> = samples
            .iter()
            .filter_map(|s| s.proxy_ip.as_deref())
            .collect();
        distinct.sort_unstable();
        distinct.dedup();

        Self {
            success: true,
            message: format!(
                "Demo mode: sent {} requests through the proxy and saw {} distinct exit IPs",
                samples.len(),
                distinct.len()
            ),
            data_origin: DataOrigin::Synthetic,
            demo_mode: Some("proxy_rotation".to_string()),
            requests: Some(samples),
            ..Self::base(source, query, location)
        }
    }

    /// The requested source identifier is not registered
    pub fn unknown_source(id: &str, query: &str, location: &str, available: Vec<String>) -> Self {
        Self {
            success: false,
            source: id.to_string(),
            site: id.to_string(),
            query: query.to_string(),
            location: location.to_string(),
            total_found: 0,
            jobs: Vec::new(),
            data_origin: DataOrigin::None,
            message: format!("Source '{}' is not supported", id),
            error: Some(format!("Unknown source: {}", id)),
            tip: Some(format!("Use one of: {}", available.join(", "))),
            demo_data: None,
            demo_mode: None,
            requests: None,
            available_sources: Some(available),
        }
    }
}

/// One request of the proxy rotation demo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationSample {
    pub request_number: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Local wall-clock time, `HH:MM:SS`
    pub timestamp: String,
}

/// Outcome of `test_proxy`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProxyTestResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_server: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Leading part of an unexpected response body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// Static description of the proxy setup; never includes the password
#[derive(Debug, Clone, Serialize)]
pub struct ProxyInfo {
    pub provider: String,
    pub proxy_server: String,
    pub proxy_type: String,
    pub supported_sites: Vec<String>,
    pub features: Vec<String>,
}

/// One registered source, as listed by `get_scraper_info`
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
    pub strategy: String,
    pub base_url: String,
    pub default_location: String,
}

impl From<&SourceConfig> for SourceInfo {
    fn from(source: &SourceConfig) -> Self {
        Self {
            id: source.id.to_string(),
            name: source.name.to_string(),
            difficulty: source.difficulty,
            strategy: source.strategy.tag().to_string(),
            base_url: source.base_url.clone(),
            default_location: source.default_location.to_string(),
        }
    }
}

/// Static description of the scraper plus the request counter
#[derive(Debug, Clone, Serialize)]
pub struct ScraperInfo {
    pub name: String,
    pub version: String,
    pub sources: Vec<SourceInfo>,
    pub default_source: String,
    pub default_limit: usize,
    pub max_limit: usize,
    pub max_attempts: u32,
    pub retry_backoff: DelayRange,
    pub pacing: PacingConfig,
    pub requests_sent: u64,
}
