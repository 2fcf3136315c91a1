//! Configuration files driving a full search

use job_scout::config::{load_config_with_env, ENV_PROXY_PASSWORD, ENV_PROXY_SERVER, ENV_PROXY_USERNAME};
use job_scout::fetch::{NoPacing, ProxyHttpClient};
use job_scout::{ConfigError, Scout, SearchRequest};
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn env(key: &str) -> Option<String> {
    match key {
        ENV_PROXY_SERVER => Some("gate.example.net:9999".to_string()),
        ENV_PROXY_USERNAME => Some("scout".to_string()),
        ENV_PROXY_PASSWORD => Some("secret".to_string()),
        _ => None,
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Failed to write config");
    file.flush().expect("Failed to flush config");
    file
}

#[tokio::test]
async fn test_config_file_overrides_drive_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/go-developer"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div data-job-id="7"><h2>Go Developer</h2><span class="company">Gopher Ltd</span></div>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let file = write_config(&format!(
        r#"
[client]
max-attempts = 1
retry-backoff = {{ min-ms = 0, max-ms = 0 }}

[search]
default-limit = 3
default-source = "totaljobs"

[sources]
totaljobs = "{}"
"#,
        server.uri()
    ));

    let config = load_config_with_env(Some(file.path()), env).unwrap();
    let client = ProxyHttpClient::direct(&config.client).unwrap();
    let scout = Scout::with_parts(config, client, Box::new(NoPacing));

    let result = scout.search_jobs(SearchRequest::new("Go Developer")).await;

    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.source, "totaljobs");
    assert_eq!(result.jobs.len(), 1);
    assert_eq!(result.jobs[0].title, "Go Developer");
    assert_eq!(result.jobs[0].company, "Gopher Ltd");
}

#[test]
fn test_invalid_override_rejected() {
    let file = write_config(
        r#"
[sources]
reed = "ftp://files.example.com"
"#,
    );

    let result = load_config_with_env(Some(file.path()), env);
    assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
}

#[test]
fn test_missing_credentials_refuse_startup() {
    let file = write_config("[search]\ndefault-limit = 5\n");
    let result = load_config_with_env(Some(file.path()), |_| None);
    assert!(matches!(result, Err(ConfigError::MissingCredential(_))));
}

#[tokio::test]
async fn test_override_keys_are_case_insensitive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/rust-jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<article class="job"><h2 class="title">Rust Engineer</h2></article>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let file = write_config(&format!(
        "[client]\nretry-backoff = {{ min-ms = 0, max-ms = 0 }}\n\n[sources]\nReed = \"{}\"\n",
        server.uri()
    ));

    let config = load_config_with_env(Some(file.path()), env).unwrap();
    let client = ProxyHttpClient::direct(&config.client).unwrap();
    let scout = Scout::with_parts(config, client, Box::new(NoPacing));

    assert_eq!(scout.registry().resolve("reed").unwrap().base_url, server.uri());

    let result = scout
        .search_jobs(SearchRequest::new("rust").source("reed"))
        .await;
    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.jobs[0].title, "Rust Engineer");
}
