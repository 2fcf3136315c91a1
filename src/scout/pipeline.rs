//! Search pipeline orchestration
//!
//! [`Scout`] ties the components together for each operation:
//! - Resolving the source and composing its search URL
//! - Pacing, then fetching through the proxy with retry
//! - Classifying the response and extracting job records
//! - Degrading to synthetic listings when the source blocks or yields nothing
//!
//! Steps run strictly one after another. Every failure is turned into an
//! envelope; nothing here returns an error to the caller.

use crate::config::Config;
use crate::extract::{generate_fallback, JobRecord};
use crate::fetch::{
    classify, classify_extraction, pause, DelayCategory, PacingPolicy, ProxyHttpClient,
    RandomPacing, ResponseClass,
};
use crate::scout::{
    ProxyInfo, ProxyTestResult, RotationSample, ScraperInfo, SearchResult, SourceInfo,
};
use crate::sources::{build_search_url, SourceConfig, SourceRegistry};
use crate::{Result, ScoutError};
use serde::Deserialize;
use url::Url;

/// Requests issued by the proxy rotation demo, at most
const MAX_ROTATION_REQUESTS: usize = 10;

/// Characters of an unexpected body kept in a proxy test failure
const RESPONSE_PREVIEW_CHARS: usize = 200;

/// Arguments of a search
///
/// Deserializes from the JSON arguments of `invoke`; `site` is accepted as an
/// alias for `source`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    pub query: String,

    #[serde(default)]
    pub location: String,

    /// Requested result count; clamped before use, default from config
    #[serde(default)]
    pub limit: Option<i64>,

    /// Source identifier; default from config
    #[serde(default, alias = "site")]
    pub source: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct IpEcho {
    origin: String,
}

/// Process-wide handle serving every operation
pub struct Scout {
    config: Config,
    client: ProxyHttpClient,
    pacing: Box<dyn PacingPolicy>,
    registry: SourceRegistry,
}

impl Scout {
    /// Creates a scout routing through the configured proxy with random pacing
    pub fn new(config: Config) -> Result<Self> {
        let client = ProxyHttpClient::new(&config.client, &config.proxy)?;
        let pacing = Box::new(RandomPacing::new(config.pacing.clone()));
        Ok(Self::with_parts(config, client, pacing))
    }

    /// Creates a scout from explicit parts
    ///
    /// Source base-URL overrides from `config` are applied to the registry.
    pub fn with_parts(
        config: Config,
        client: ProxyHttpClient,
        pacing: Box<dyn PacingPolicy>,
    ) -> Self {
        let registry = SourceRegistry::builtin().with_overrides(&config.sources);
        Self {
            config,
            client,
            pacing,
            registry,
        }
    }

    pub fn client(&self) -> &ProxyHttpClient {
        &self.client
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Searches one source for `request.query`
    ///
    /// # Returns
    ///
    /// Always an envelope: live records, synthetic records flagged as such,
    /// or a failure with a tip.
    pub async fn search_jobs(&self, request: SearchRequest) -> SearchResult {
        let search = &self.config.search;
        let limit = search.clamp_limit(request.limit.unwrap_or(search.default_limit as i64));
        let source_id = request.source.as_deref().unwrap_or(&search.default_source);
        let query = request.query.trim();
        let location = request.location.trim();

        let source = match self.registry.resolve(source_id) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(source = source_id, error = %e, "Rejected search");
                return SearchResult::unknown_source(
                    source_id,
                    query,
                    location,
                    self.registry.ids(),
                );
            }
        };

        let location_label = if location.is_empty() {
            source.default_location
        } else {
            location
        };

        tracing::info!(source = source.id, query, location = location_label, limit, "Searching");

        if source.is_synthetic() {
            let samples = self.rotate(source, limit).await;
            return SearchResult::rotation_demo(source, query, location_label, samples);
        }

        let url = match build_search_url(source, query, location) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(source = source.id, error = %e, "Could not build search URL");
                return SearchResult::failed(source, query, location_label, e.to_string());
            }
        };

        pause(self.pacing.as_ref(), DelayCategory::Normal).await;

        tracing::info!(source = source.id, url = %url, "Fetching");
        let outcome = match self.client.fetch(&url).await {
            Ok(outcome) => outcome,
            Err(e) => return SearchResult::failed(source, query, location_label, e.to_string()),
        };

        tracing::info!(
            source = source.id,
            status = outcome.status_code,
            bytes = outcome.size_bytes,
            attempts = outcome.attempts,
            "Response received"
        );

        let class = classify(&outcome);
        if class == ResponseClass::Blocked {
            tracing::warn!(source = source.id, status = outcome.status_code, "Request blocked");
            let demo = generate_fallback(query, location, limit);
            return SearchResult::blocked(source, query, location_label, outcome.status_code, demo);
        }

        let mut jobs = source.strategy.extract(&outcome.body, query, limit);
        absolutize_links(&mut jobs, &outcome.url);

        match classify_extraction(class, jobs.len()) {
            ResponseClass::Empty => {
                tracing::warn!(
                    source = source.id,
                    strategy = source.strategy.tag(),
                    "No jobs extracted"
                );
                let demo = generate_fallback(query, location, limit);
                SearchResult::empty(source, query, location_label, demo)
            }
            _ => {
                tracing::info!(source = source.id, count = jobs.len(), "Extracted jobs");
                SearchResult::live(source, query, location_label, jobs)
            }
        }
    }

    /// Sends `min(limit, 10)` IP-echo requests to show the exit IP changing
    async fn rotate(&self, source: &SourceConfig, limit: usize) -> Vec<RotationSample> {
        let count = limit.min(MAX_ROTATION_REQUESTS);
        let url = match Url::parse(&source.base_url).and_then(|base| base.join("/ip")) {
            Ok(url) => url.to_string(),
            Err(e) => {
                return vec![RotationSample {
                    request_number: 1,
                    proxy_ip: None,
                    error: Some(e.to_string()),
                    timestamp: timestamp(),
                }]
            }
        };

        let mut samples = Vec::with_capacity(count);
        for request_number in 1..=count {
            if request_number > 1 {
                pause(self.pacing.as_ref(), DelayCategory::Short).await;
            }

            let (proxy_ip, error) = match self.echo_ip(&url).await {
                Ok(ip) => (Some(ip), None),
                Err(e) => (None, Some(e)),
            };
            tracing::debug!(request_number, ?proxy_ip, ?error, "Rotation sample");

            samples.push(RotationSample {
                request_number,
                proxy_ip,
                error,
                timestamp: timestamp(),
            });
        }
        samples
    }

    async fn echo_ip(&self, url: &str) -> std::result::Result<String, String> {
        let outcome = self
            .client
            .fetch_with_attempts(url, 1)
            .await
            .map_err(|e| e.to_string())?;
        if outcome.status_code != 200 {
            return Err(format!("HTTP {}", outcome.status_code));
        }
        parse_origin(&outcome.body).map_err(|e| e.to_string())
    }

    /// Issues one IP-echo request through the proxy, without pacing
    pub async fn test_proxy(&self) -> ProxyTestResult {
        let url = &self.config.client.ip_echo_url;
        tracing::info!(url = %url, "Testing proxy");

        let outcome = match self.client.fetch_with_attempts(url, 1).await {
            Ok(outcome) => outcome,
            Err(e) => {
                return ProxyTestResult {
                    error: Some(e.to_string()),
                    ..ProxyTestResult::default()
                }
            }
        };

        let preview = || -> Option<String> {
            Some(outcome.body.chars().take(RESPONSE_PREVIEW_CHARS).collect())
        };

        if outcome.status_code != 200 {
            tracing::warn!(status = outcome.status_code, "Proxy test failed");
            return ProxyTestResult {
                error: Some(format!("HTTP {}", outcome.status_code)),
                response: preview(),
                ..ProxyTestResult::default()
            };
        }

        match parse_origin(&outcome.body) {
            Ok(ip) => ProxyTestResult {
                success: true,
                message: Some(format!("Proxy is working; exit IP is {}", ip)),
                proxy_ip: Some(ip),
                proxy_server: Some(self.config.proxy.server.clone()),
                ..ProxyTestResult::default()
            },
            Err(e) => {
                tracing::warn!(error = %e, "Proxy test returned an unexpected body");
                ProxyTestResult {
                    error: Some(format!("Unexpected IP echo response: {}", e)),
                    response: preview(),
                    ..ProxyTestResult::default()
                }
            }
        }
    }

    /// Describes the proxy setup; makes no network call
    pub fn proxy_info(&self) -> ProxyInfo {
        ProxyInfo {
            provider: "Residential proxy gateway".to_string(),
            proxy_server: self.config.proxy.server.clone(),
            proxy_type: "residential".to_string(),
            supported_sites: self.registry.ids(),
            features: vec![
                "Rotating residential exit IPs".to_string(),
                "Authenticated forward proxy".to_string(),
                "Browser-like request headers".to_string(),
                "Retry with randomized backoff on HTTP 403".to_string(),
                "Randomized pacing between requests".to_string(),
            ],
        }
    }

    /// Describes the registered sources and limits; makes no network call
    pub fn scraper_info(&self) -> ScraperInfo {
        let search = &self.config.search;
        ScraperInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            sources: self.registry.iter().map(SourceInfo::from).collect(),
            default_source: search.default_source.clone(),
            default_limit: search.default_limit,
            max_limit: search.max_limit,
            max_attempts: self.client.max_attempts(),
            retry_backoff: self.config.client.retry_backoff,
            pacing: self.config.pacing.clone(),
            requests_sent: self.client.requests_sent(),
        }
    }
}

/// Reads the exit IP from an `{"origin": "..."}` echo body
fn parse_origin(body: &str) -> Result<String> {
    let echo: IpEcho = serde_json::from_str(body)?;
    let origin = echo.origin.trim();
    if origin.is_empty() {
        return Err(ScoutError::Json(serde::de::Error::custom("origin is empty")));
    }
    Ok(origin.to_string())
}

/// Resolves relative job links against the final response URL
fn absolutize_links(jobs: &mut [JobRecord], page_url: &str) {
    let Ok(base) = Url::parse(page_url) else {
        return;
    };

    for job in jobs {
        if let Some(link) = job.url.as_deref() {
            if let Ok(absolute) = base.join(link) {
                job.url = Some(absolute.to_string());
            }
        }
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
