//! Tests for the HTTP query service
//!
//! These tests verify:
//! - Status lookups for comma-separated and repeated `numbers`
//! - Invalid numbers are skipped, missing data is `null`
//! - Every other request yields `{}` with status 200
//! - The server answers over a real socket

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use ncpr_index::network::{resolve_numbers, Server};
use ncpr_index::{Config, Shard, ShardCatalog};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

/// Prefix 9999: sorted, key 123456 → (5, "1", "A", 0), key 000001 → sentinel
/// Prefix 1000: direct, suffix 0 → (0, "0", "D", 0)
fn test_catalog() -> Arc<ShardCatalog> {
    let sorted = Shard::from_bytes(vec![
        1, 0x00, 0x00, 0x01, 0x14, 0x03, // sentinel
        0x01, 0xE2, 0x40, 0x94, 0x03,
    ]);
    let direct = Shard::from_bytes(vec![0x00, 0x80, 0x00]);

    Arc::new(ShardCatalog::from_shards(vec![(9999, sorted), (1000, direct)]))
}

fn test_router() -> Router {
    Server::new(Config::default(), test_catalog()).router()
}

async fn send(method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Method::GET, uri).await
}

// =============================================================================
// Status Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_status_single_number() {
    let (status, body) = get("/api/v1/status?numbers=9999123456").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "9999123456": [5, "1", "A", 0] }));
}

#[tokio::test]
async fn test_status_comma_separated() {
    let (status, body) = get("/api/v1/status?numbers=9999123456,1000000000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "9999123456": [5, "1", "A", 0],
            "1000000000": [0, "0", "D", 0]
        })
    );
}

#[tokio::test]
async fn test_status_repeated_param() {
    let (_, body) = get("/api/v1/status?numbers=9999123456&numbers=1000000000").await;

    assert_eq!(body.as_object().unwrap().len(), 2);
    assert_eq!(body["1000000000"], json!([0, "0", "D", 0]));
}

#[tokio::test]
async fn test_status_url_encoded_comma() {
    let (_, body) = get("/api/v1/status?numbers=9999123456%2C1000000000").await;

    assert_eq!(body.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_status_null_cases() {
    // No shard for prefix, no record for suffix, sentinel record
    let (_, body) = get("/api/v1/status?numbers=1234123456,9999123457,9999000001").await;

    assert_eq!(
        body,
        json!({
            "1234123456": null,
            "9999123457": null,
            "9999000001": null
        })
    );
}

#[tokio::test]
async fn test_status_skips_invalid_numbers() {
    let (status, body) =
        get("/api/v1/status?numbers=123,abcdefghij,99991234567,,9999123456").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "9999123456": [5, "1", "A", 0] }));
}

#[tokio::test]
async fn test_status_all_invalid_is_empty_object() {
    let (_, body) = get("/api/v1/status?numbers=12,34").await;
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_status_ignores_other_params() {
    let (_, body) = get("/api/v1/status?foo=9999123456&numbers=1000000000").await;
    assert_eq!(body, json!({ "1000000000": [0, "0", "D", 0] }));
}

// =============================================================================
// Fallback Tests
// =============================================================================

#[tokio::test]
async fn test_missing_numbers_param() {
    let (status, body) = get("/api/v1/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (_, body) = get("/api/v1/status?other=1").await;
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_unknown_path() {
    for uri in ["/", "/api/v1", "/api/v2/status?numbers=9999123456", "/nope"] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!({}), "{}", uri);
    }
}

#[tokio::test]
async fn test_non_get_method() {
    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let (status, body) = send(method, "/api/v1/status?numbers=9999123456").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));
    }
}

// =============================================================================
// resolve_numbers Tests
// =============================================================================

#[test]
fn test_resolve_numbers_direct() {
    let catalog = test_catalog();
    let results = resolve_numbers(&catalog, ["9999123456", "bad", "1234123456"]);

    assert_eq!(results.len(), 2);
    assert_eq!(results["9999123456"].unwrap().provider_code, 5);
    assert!(results["1234123456"].is_none());
}

// =============================================================================
// Listener Tests
// =============================================================================

#[tokio::test]
async fn test_run_on_serves_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = Server::new(Config::default(), test_catalog());
    let handle = tokio::spawn(async move { server.run_on(listener).await });

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(
            b"GET /api/v1/status?numbers=9999123456 HTTP/1.1\r\n\
              Host: localhost\r\n\
              Connection: close\r\n\r\n",
        )
        .await
        .unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200 OK"), "{}", response);
    assert!(response.ends_with(r#"{"9999123456":[5,"1","A",0]}"#), "{}", response);

    handle.abort();
}
