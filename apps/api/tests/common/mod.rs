#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::http::HeaderValue;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use invoice_api::config::ApiConfig;
use invoice_api::router::{build_app_router, with_middleware};
use invoice_api::state::AppState;
use invoice_db::{Database, DbConfig};

/// Build a test `ApiConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ApiConfig {
    ApiConfig {
        env: "test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        db_path: ":memory:".to_string(),
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        body_limit_bytes: 2 * 1024 * 1024,
    }
}

/// Build the full application router over a fresh in-memory database.
///
/// Goes through `build_app_router`, so tests exercise the same middleware
/// stack (CORS, request ID, timeout, tracing, panic recovery, body limit)
/// that production uses.
pub async fn build_test_app() -> Router {
    build_test_app_with(test_config()).await
}

pub async fn build_test_app_with(config: ApiConfig) -> Router {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    build_app_router(AppState::new(db, config))
}

/// Serve `routes` under the production middleware stack.
pub async fn build_test_routes(config: ApiConfig, routes: Router<AppState>) -> Router {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    let state = AppState::new(db, config);
    let config = state.config.clone();
    with_middleware(routes, &config).with_state(state)
}

/// A buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body; `Value::Null` when the body is empty.
    pub body: Value,
}

/// Send one request through the router and buffer the response.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> TestResponse {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: &str) -> TestResponse {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: &Router, uri: &str, body: &str) -> TestResponse {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri, None).await
}

/// Create a client and return its id.
pub async fn create_client(app: &Router, name: &str) -> i64 {
    let res = post_json(app, "/api/clients", &format!(r#"{{"name":"{name}"}}"#)).await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    res.body["id"].as_i64().unwrap()
}

/// Assert the standard error envelope and return its `error` object.
pub fn assert_error(res: &TestResponse, status: StatusCode, code: &str) -> Value {
    assert_eq!(res.status, status, "{}", res.body);
    let error = res.body["error"].clone();
    assert_eq!(error["code"], code, "{}", res.body);

    let id = error["id"].as_str().unwrap();
    assert_eq!(id.len(), 16);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

    error
}
