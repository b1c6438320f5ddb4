//! API integration tests.
//!
//! These tests drive the full router end-to-end using axum's test utilities.
//! Time and randomness are injected so expiry and secrets are deterministic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use number_guess::api::{create_router, create_router_with_state, AppState};
use number_guess::{Clock, ManualClock, RandomSource, Secret, SessionStore, Token};
use serde_json::Value;
use tower::ServiceExt;

/// Always hides the same number; tokens come from a counter.
#[derive(Debug)]
struct FixedSecret {
    secret: u32,
    next: AtomicU64,
}

impl FixedSecret {
    fn new(secret: u32) -> Self {
        Self {
            secret,
            next: AtomicU64::new(0xabc123),
        }
    }
}

impl RandomSource for FixedSecret {
    fn secret(&self) -> Secret {
        Secret::new(self.secret).unwrap()
    }

    fn token(&self) -> Token {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Token::from_uuid(uuid_from(n))
    }
}

fn uuid_from(n: u64) -> uuid::Uuid {
    uuid::Uuid::from_u128(u128::from(n))
}

/// Router over a store with a manual clock and a known secret.
fn game(secret: u32) -> (Router, AppState, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let store = SessionStore::with_parts(
        Duration::from_secs(60),
        Arc::clone(&clock) as Arc<dyn Clock>,
        Arc::new(FixedSecret::new(secret)),
    );
    let state = AppState::with_store(Arc::new(store));
    (create_router_with_state(state.clone()), state, clock)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper to extract body as string.
async fn response_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&body).to_string()
}

/// Helper to extract JSON from response.
async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

fn xml_field<'a>(xml: &'a str, tag: &str) -> &'a str {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = xml.find(&open).unwrap() + open.len();
    let end = xml[start..].find(&close).unwrap() + start;
    &xml[start..end]
}

async fn init_token(app: &Router, quad: &str) -> String {
    let response = app
        .clone()
        .oneshot(get(&format!("/init?quad={quad}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    xml_field(&response_text(response).await, "token").to_string()
}

async fn try_guess(app: &Router, token: &str, guess: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(get(&format!("/try?token={token}&guess={guess}")))
        .await
        .unwrap();
    let status = response.status();
    (status, response_json(response).await)
}

// ============================================================================
// Health & Info Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_text(response).await, "OK");
}

#[tokio::test]
async fn test_service_info_endpoint() {
    let (app, _, _) = game(5);
    init_token(&app, "AB").await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["name"], "number-guess");
    assert_eq!(json["live_sessions"], 1);
    assert_eq!(json["ttl_seconds"], 60);
}

// ============================================================================
// Init Tests
// ============================================================================

#[tokio::test]
async fn test_init_returns_xml() {
    let app = create_router();

    let response = app.oneshot(get("/init?quad=NAME")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/xml"
    );

    let xml = response_text(response).await;
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert_eq!(xml_field(&xml, "quad"), "NAME");
    assert_eq!(xml_field(&xml, "validForSeconds"), "60");

    let token = xml_field(&xml, "token");
    assert_eq!(token.len(), 32);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn test_init_tokens_are_unique() {
    let app = create_router();
    let mut tokens = std::collections::HashSet::new();

    for _ in 0..50 {
        assert!(tokens.insert(init_token(&app, "ABCD").await));
    }
}

#[tokio::test]
async fn test_init_rejects_malformed_quad() {
    let app = create_router();

    for uri in [
        "/init",
        "/init?quad=",
        "/init?quad=A",
        "/init?quad=ABCDE",
        "/init?quad=name",
        "/init?quad=AB1",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");

        let json = response_json(response).await;
        assert_eq!(json["code"], "INVALID_INPUT", "{uri}");
    }
}

// ============================================================================
// Try Tests
// ============================================================================

#[tokio::test]
async fn test_full_game_scenario() {
    let (app, state, _) = game(500_000);
    let token = init_token(&app, "NAME").await;

    let (status, json) = try_guess(&app, &token, "1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({"token": token, "guess": 1, "result": "TOO_SMALL"})
    );

    let (status, json) = try_guess(&app, &token, "2147483647").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"], "TOO_BIG");
    assert!(json.get("message").is_none());

    let (status, json) = try_guess(&app, &token, "500000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"], "FOUND");
    assert_eq!(json["guess"], 500_000);
    assert!(json["message"].is_string());
    assert!(state.store().is_empty());

    let (status, json) = try_guess(&app, &token, "500000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "UNKNOWN_OR_EXPIRED_TOKEN");
}

#[tokio::test]
async fn test_try_unknown_token() {
    let (app, _, _) = game(10);

    let (status, json) = try_guess(&app, "abc123", "10").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "UNKNOWN_OR_EXPIRED_TOKEN");
}

#[tokio::test]
async fn test_try_expired_token() {
    let (app, state, clock) = game(10);
    let token = init_token(&app, "NAME").await;

    clock.advance(Duration::from_secs(61));

    let (status, json) = try_guess(&app, &token, "10").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "UNKNOWN_OR_EXPIRED_TOKEN");
    assert!(state.store().is_empty());
}

#[tokio::test]
async fn test_terminal_states_look_identical() {
    let (app, _, clock) = game(10);

    let solved = init_token(&app, "AB").await;
    let (status, _) = try_guess(&app, &solved, "10").await;
    assert_eq!(status, StatusCode::OK);

    let expired = init_token(&app, "CD").await;
    clock.advance(Duration::from_secs(60));

    let (_, after_solve) = try_guess(&app, &solved, "10").await;
    let (_, after_expiry) = try_guess(&app, &expired, "10").await;
    let (_, never_issued) = try_guess(&app, "ffff", "10").await;

    assert_eq!(after_solve, after_expiry);
    assert_eq!(after_expiry, never_issued);
}

#[tokio::test]
async fn test_init_purges_expired_sessions() {
    let (app, state, clock) = game(10);
    init_token(&app, "AB").await;
    init_token(&app, "CD").await;
    assert_eq!(state.store().len(), 2);

    clock.advance(Duration::from_secs(60));
    init_token(&app, "EF").await;
    assert_eq!(state.store().len(), 1);
}

#[tokio::test]
async fn test_try_rejects_malformed_guess() {
    let (app, _, _) = game(10);
    let token = init_token(&app, "NAME").await;

    for guess in ["0", "-1", "2147483648", "abc", "1.5", ""] {
        let (status, json) = try_guess(&app, &token, guess).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "guess={guess}");
        assert_eq!(json["code"], "INVALID_INPUT");
    }

    // Still alive after the rejected attempts.
    let (status, json) = try_guess(&app, &token, "10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"], "FOUND");
}

#[tokio::test]
async fn test_try_missing_parameters() {
    let (app, _, _) = game(10);

    for uri in ["/try", "/try?token=abc", "/try?guess=5"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_correct_guesses() {
    for _ in 0..20 {
        let (app, _, _) = game(42);
        let token = init_token(&app, "RACE").await;

        let first = tokio::spawn({
            let app = app.clone();
            let token = token.clone();
            async move { try_guess(&app, &token, "42").await.0 }
        });
        let second = tokio::spawn({
            let app = app.clone();
            let token = token.clone();
            async move { try_guess(&app, &token, "42").await.0 }
        });

        let mut statuses = vec![first.await.unwrap().as_u16(), second.await.unwrap().as_u16()];
        statuses.sort_unstable();
        assert_eq!(statuses, vec![200, 404]);
    }
}

// ============================================================================
// Routing Tests
// ============================================================================

#[tokio::test]
async fn test_method_not_allowed() {
    let app = create_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/init?quad=NAME")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_not_found_route() {
    let app = create_router();

    let response = app.oneshot(get("/nonexistent")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
