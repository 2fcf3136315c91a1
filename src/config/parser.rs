use crate::config::types::{Config, FileConfig, ProxyConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Environment variable holding the proxy `host:port`
pub const ENV_PROXY_SERVER: &str = "SCOUT_PROXY_SERVER";

/// Environment variable holding the proxy username
pub const ENV_PROXY_USERNAME: &str = "SCOUT_PROXY_USERNAME";

/// Environment variable holding the proxy password
pub const ENV_PROXY_PASSWORD: &str = "SCOUT_PROXY_PASSWORD";

/// Loads configuration from an optional TOML file plus the process environment
///
/// # Arguments
///
/// * `path` - Optional path to a TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Merged and validated configuration
/// * `Err(ConfigError)` - The file could not be read/parsed, a proxy
///   credential is missing, or validation failed
///
/// # Example
///
/// ```no_run
/// use job_scout::config::load_config;
///
/// let config = load_config(None).unwrap();
/// println!("Proxy: {}", config.proxy.server);
/// ```
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`], reading overrides through `env` instead of the
/// process environment
pub fn load_config_with_env<F>(path: Option<&Path>, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let file = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            parse_config_str(&content)?
        }
        None => FileConfig::default(),
    };

    let config = resolve(file, env)?;
    validate(&config)?;

    Ok(config)
}

/// Parses TOML text into the raw file representation
pub fn parse_config_str(content: &str) -> Result<FileConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Applies environment overrides and enforces that every proxy field is set
fn resolve<F>(file: FileConfig, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let server = pick(env(ENV_PROXY_SERVER), file.proxy.server)
        .ok_or(ConfigError::MissingCredential(ENV_PROXY_SERVER))?;
    let username = pick(env(ENV_PROXY_USERNAME), file.proxy.username)
        .ok_or(ConfigError::MissingCredential(ENV_PROXY_USERNAME))?;
    let password = pick(env(ENV_PROXY_PASSWORD), file.proxy.password)
        .ok_or(ConfigError::MissingCredential(ENV_PROXY_PASSWORD))?;

    Ok(Config {
        proxy: ProxyConfig {
            server,
            username,
            password,
        },
        client: file.client,
        search: file.search,
        pacing: file.pacing,
        sources: file.sources,
    })
}

/// Environment wins over the file; blank values count as missing
fn pick(env_value: Option<String>, file_value: Option<String>) -> Option<String> {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| file_value.filter(|v| !v.trim().is_empty()))
        .map(|v| v.trim().to_string())
}
