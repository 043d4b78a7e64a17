//! Shared utilities for integration testing.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use blog_api::{ApiConfig, HttpServer};
use serde_json::Value;
use tower::ServiceExt;

/// Send one request through the fully layered app, in-process.
#[allow(dead_code)]
pub async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let server = HttpServer::new(ApiConfig::default()).unwrap();
    send_raw(
        &server,
        method,
        uri,
        body.map(|b| b.to_string()).unwrap_or_default(),
    )
    .await
}

/// Like `send`, with a raw body and a caller-supplied server.
#[allow(dead_code)]
pub async fn send_raw(
    server: &HttpServer,
    method: &str,
    uri: &str,
    body: String,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = server.app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(uri: &str) -> (StatusCode, Value) {
    send("GET", uri, None).await
}
