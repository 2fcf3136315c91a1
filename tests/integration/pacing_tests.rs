//! Which operations pause, and with which delay category

use crate::create_test_config;
use job_scout::fetch::{DelayCategory, PacingPolicy, ProxyHttpClient};
use job_scout::{Scout, SearchRequest};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records every requested delay and never waits
#[derive(Clone, Default)]
struct RecordingPacing {
    calls: Arc<Mutex<Vec<DelayCategory>>>,
}

impl RecordingPacing {
    fn calls(&self) -> Vec<DelayCategory> {
        self.calls.lock().unwrap().clone()
    }
}

impl PacingPolicy for RecordingPacing {
    fn delay_for(&self, category: DelayCategory) -> Duration {
        self.calls.lock().unwrap().push(category);
        Duration::ZERO
    }
}

fn create_recording_scout(server: &MockServer, sources: &[&str]) -> (Scout, RecordingPacing) {
    let config = create_test_config(server, sources);
    let client = ProxyHttpClient::direct(&config.client).expect("Failed to build client");
    let pacing = RecordingPacing::default();
    let scout = Scout::with_parts(config, client, Box::new(pacing.clone()));
    (scout, pacing)
}

async fn mount_ip_echo(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"origin": "1.2.3.4"})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_pauses_once_before_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<article class="job"><h2 class="title">Rust Engineer</h2></article>"#,
        ))
        .mount(&server)
        .await;

    let (scout, pacing) = create_recording_scout(&server, &["reed"]);
    let result = scout
        .search_jobs(SearchRequest::new("rust").source("reed"))
        .await;

    assert!(result.success);
    assert_eq!(pacing.calls(), vec![DelayCategory::Normal]);
}

#[tokio::test]
async fn test_blocked_search_still_pauses_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let (scout, pacing) = create_recording_scout(&server, &["reed"]);
    scout
        .search_jobs(SearchRequest::new("rust").source("reed"))
        .await;

    // Retries wait on the client's backoff, not on the pacing policy.
    assert_eq!(pacing.calls(), vec![DelayCategory::Normal]);
}

#[tokio::test]
async fn test_rotation_demo_pauses_between_requests() {
    let server = MockServer::start().await;
    mount_ip_echo(&server).await;

    let (scout, pacing) = create_recording_scout(&server, &["httpbin-demo"]);
    let result = scout
        .search_jobs(SearchRequest::new("rust").limit(3).source("httpbin-demo"))
        .await;

    assert_eq!(result.requests.map(|r| r.len()), Some(3));
    assert_eq!(
        pacing.calls(),
        vec![DelayCategory::Short, DelayCategory::Short]
    );
}

#[tokio::test]
async fn test_proxy_test_and_static_info_never_pause() {
    let server = MockServer::start().await;
    mount_ip_echo(&server).await;

    let (scout, pacing) = create_recording_scout(&server, &[]);
    assert!(scout.test_proxy().await.success);
    scout.proxy_info();
    scout.scraper_info();

    assert!(pacing.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_source_never_pauses() {
    let server = MockServer::start().await;
    let (scout, pacing) = create_recording_scout(&server, &[]);

    scout
        .search_jobs(SearchRequest::new("rust").source("monster"))
        .await;

    assert!(pacing.calls().is_empty());
}
