#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use link_relay::api::middleware::cors;
use link_relay::api::routes::public_routes;
use link_relay::config::Config;
use link_relay::state::AppState;
use serde_json::json;
use wiremock::{MockServer, Request, ResponseTemplate};

pub const CREATE_PATH: &str = "/API/write/get";
pub const READ_PATH: &str = "/API/read/get";
pub const SHORT_BASE: &str = "https://short.test";

/// Configuration pointing both upstream endpoints at the mock server.
pub fn test_config(upstream: &MockServer) -> Config {
    Config {
        upstream_create_url: format!("{}{CREATE_PATH}", upstream.uri()),
        upstream_read_url: format!("{}{READ_PATH}", upstream.uri()),
        upstream_timeout_secs: 1,
        short_url_base: format!("{SHORT_BASE}/"),
        ..Config::default()
    }
}

pub fn create_test_state(upstream: &MockServer) -> AppState {
    AppState::from_config(&test_config(upstream)).unwrap()
}

/// All public routes with CORS, backed by the mock upstream.
pub fn create_test_server(upstream: &MockServer) -> TestServer {
    let app = Router::new()
        .merge(public_routes())
        .with_state(create_test_state(upstream))
        .layer(cors::layer());

    TestServer::new(app).unwrap()
}

/// Value of a query parameter on a recorded upstream request.
pub fn query_value(request: &Request, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Upstream success reply that echoes the requested alias.
pub fn created_reply(request: &Request) -> ResponseTemplate {
    let alias = query_value(request, "custom").unwrap_or_default();

    ResponseTemplate::new(200).set_body_json(json!({
        "success": 1,
        "data": { "url": format!("{SHORT_BASE}/{alias}") }
    }))
}

pub fn taken_reply() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": 0,
        "error": { "code": 4, "msg": "Custom alias is taken" }
    }))
}
