use crate::config::types::{ClientConfig, Config, DelayRange, PacingConfig, SearchConfig};
use crate::sources::SourceRegistry;
use crate::ConfigError;
use std::collections::BTreeMap;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_proxy_server(&config.proxy.server)?;
    validate_client_config(&config.client)?;
    validate_search_config(&config.search)?;
    validate_pacing_config(&config.pacing)?;
    validate_source_overrides(&config.sources)?;
    Ok(())
}

/// The proxy server must look like `host:port`
fn validate_proxy_server(server: &str) -> Result<(), ConfigError> {
    let (host, port) = server.rsplit_once(':').ok_or_else(|| {
        ConfigError::Validation(format!(
            "proxy server must be in host:port form, got '{}'",
            server
        ))
    })?;

    if host.is_empty() || port.parse::<u16>().is_err() {
        return Err(ConfigError::Validation(format!(
            "proxy server must be in host:port form, got '{}'",
            server
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_client_config(config: &ClientConfig) -> Result<(), ConfigError> {
    if !(15..=30).contains(&config.timeout_secs) {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 15 and 30, got {}",
            config.timeout_secs
        )));
    }

    if !(1..=5).contains(&config.max_attempts) {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be between 1 and 5, got {}",
            config.max_attempts
        )));
    }

    validate_range("retry-backoff", &config.retry_backoff)?;
    validate_http_url("ip-echo-url", &config.ip_echo_url)?;

    if config.user_agents.is_empty() || config.user_agents.iter().any(|ua| ua.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "user-agents must contain at least one non-empty entry".to_string(),
        ));
    }

    Ok(())
}

/// Validates search limits and the default source
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if !(1..=50).contains(&config.max_limit) {
        return Err(ConfigError::Validation(format!(
            "max-limit must be between 1 and 50, got {}",
            config.max_limit
        )));
    }

    if config.default_limit < 1 || config.default_limit > config.max_limit {
        return Err(ConfigError::Validation(format!(
            "default-limit must be between 1 and {}, got {}",
            config.max_limit, config.default_limit
        )));
    }

    let registry = SourceRegistry::builtin();
    if !registry.contains(&config.default_source) {
        return Err(ConfigError::Validation(format!(
            "default-source '{}' is not a known source ({})",
            config.default_source,
            registry.ids().join(", ")
        )));
    }

    Ok(())
}

fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    validate_range("pacing.short", &config.short)?;
    validate_range("pacing.normal", &config.normal)?;
    validate_range("pacing.long", &config.long)?;
    Ok(())
}

/// Overrides may only name registered sources and must be http(s) URLs
fn validate_source_overrides(overrides: &BTreeMap<String, String>) -> Result<(), ConfigError> {
    let registry = SourceRegistry::builtin();

    for (id, base_url) in overrides {
        if !registry.contains(id) {
            return Err(ConfigError::Validation(format!(
                "sources.{} does not name a known source",
                id
            )));
        }
        validate_http_url(&format!("sources.{}", id), base_url)?;
    }

    Ok(())
}

fn validate_range(name: &str, range: &DelayRange) -> Result<(), ConfigError> {
    if range.min_ms > range.max_ms {
        return Err(ConfigError::Validation(format!(
            "{}: min-ms ({}) must not exceed max-ms ({})",
            name, range.min_ms, range.max_ms
        )));
    }
    Ok(())
}

fn validate_http_url(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            name, value
        )));
    }

    Ok(())
}
