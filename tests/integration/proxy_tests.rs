//! Proxy self-test and static information operations

use crate::create_test_scout;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_proxy_reports_exit_ip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"origin": "1.2.3.4"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let scout = create_test_scout(&server, &[]);
    let result = scout.test_proxy().await;

    assert!(result.success);
    assert_eq!(result.proxy_ip.as_deref(), Some("1.2.3.4"));
    assert_eq!(result.proxy_server.as_deref(), Some("gate.example.net:9999"));
    assert!(result.message.unwrap().contains("1.2.3.4"));
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_proxy_failure_includes_status_and_body_preview() {
    let server = MockServer::start().await;
    let body = "x".repeat(500);
    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(ResponseTemplate::new(407).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let scout = create_test_scout(&server, &[]);
    let result = scout.test_proxy().await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("HTTP 407"));
    assert_eq!(result.response.map(|r| r.len()), Some(200));
    assert!(result.proxy_ip.is_none());
}

#[tokio::test]
async fn test_proxy_reports_malformed_echo_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captive portal</html>"))
        .mount(&server)
        .await;

    let scout = create_test_scout(&server, &[]);
    let result = scout.test_proxy().await;

    assert!(!result.success);
    let error = result.error.unwrap();
    assert!(error.starts_with("Unexpected IP echo response: JSON error"), "{}", error);
    assert_eq!(result.response.as_deref(), Some("<html>captive portal</html>"));
}

#[tokio::test]
async fn test_proxy_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let scout = create_test_scout(&server, &[]);
    let result = scout.test_proxy().await;

    assert!(!result.success);
    assert_eq!(scout.client().requests_sent(), 1);
}

#[tokio::test]
async fn test_invoke_test_proxy_serializes_optional_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"origin": "1.2.3.4"})),
        )
        .mount(&server)
        .await;

    let scout = create_test_scout(&server, &[]);
    let value = scout.invoke("test_proxy", serde_json::Value::Null).await;

    assert_eq!(value["success"], true);
    assert_eq!(value["proxy_ip"], "1.2.3.4");
    assert!(value.get("error").is_none());
    assert!(value.get("response").is_none());
}

#[tokio::test]
async fn test_proxy_info_hides_password() {
    let server = MockServer::start().await;
    let scout = create_test_scout(&server, &[]);

    let value = scout.invoke("get_proxy_info", serde_json::json!({})).await;
    let text = value.to_string();

    assert_eq!(value["proxy_server"], "gate.example.net:9999");
    assert_eq!(value["proxy_type"], "residential");
    assert!(!text.contains("test-pass"));
    assert_eq!(
        value["supported_sites"].as_array().map(Vec::len),
        Some(scout.registry().ids().len())
    );
}

#[tokio::test]
async fn test_scraper_info_reports_request_counter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let scout = create_test_scout(&server, &[]);
    assert_eq!(scout.scraper_info().requests_sent, 0);

    scout.test_proxy().await;
    scout.test_proxy().await;

    let info = scout.scraper_info();
    assert_eq!(info.requests_sent, 2);
    assert_eq!(info.max_limit, 50);
    assert_eq!(info.max_attempts, 2);
    assert_eq!(info.sources.len(), 7);
    assert_eq!(info.sources[0].id, "reed");
    assert_eq!(info.sources[0].strategy, "heuristic-markup");

    // No network call for static information.
    scout.invoke("get_scraper_info", serde_json::json!({})).await;
    assert_eq!(scout.client().requests_sent(), 2);
}
