mod common;

use axum::http::{HeaderName, HeaderValue};
use wiremock::MockServer;

#[tokio::test]
async fn test_status_reports_online() {
    let upstream = MockServer::start().await;
    let server = common::create_test_server(&upstream);

    let response = server.get("/").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "Online");
    assert_eq!(json["usage"], "/short?url=https://example.com");
    assert!(json["bulk"].as_str().unwrap().starts_with("POST /bulk"));
    assert!(json["read"].is_string());
    assert!(json["verify"].is_string());
}

#[tokio::test]
async fn test_status_allows_any_origin() {
    let upstream = MockServer::start().await;
    let server = common::create_test_server(&upstream);

    let response = server
        .get("/")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://app.example.org"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_status_does_not_call_upstream() {
    let upstream = MockServer::start().await;
    let server = common::create_test_server(&upstream);

    server.get("/").await.assert_status_ok();

    assert!(upstream.received_requests().await.unwrap().is_empty());
}
