use super::*;
use axum::{
    body::{self, Body},
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    build_router(Arc::new(AppState::default()), 1024)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn post_json(uri: &str, raw: impl Into<String>) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.into()))
        .expect("request")
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let response = test_app().oneshot(get("/healthz")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "ok": true }));
}

#[tokio::test]
async fn numbers_start_empty() {
    let response = test_app().oneshot(get("/numbers")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "list": [] }));
}

#[tokio::test]
async fn posted_numbers_update_the_shared_ledger() {
    let app = test_app();

    for value in [5, 10] {
        let response = app
            .clone()
            .oneshot(post_json("/numbers", json!({ "value": value }).to_string()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(post_json("/numbers", r#"{"value": -6}"#))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "input": -6,
            "action": "opposite sign, applied -6",
            "updated": [9],
        })
    );

    let response = app.oneshot(get("/numbers")).await.expect("response");
    assert_eq!(json_body(response).await, json!({ "list": [9] }));
}

#[tokio::test]
async fn malformed_bodies_are_client_errors() {
    let app = test_app();
    let bad_bodies = [
        "not json",
        "{}",
        r#"{"value": "five"}"#,
        r#"{"value": 2.5}"#,
        "null",
    ];

    for raw in bad_bodies {
        let response = app
            .clone()
            .oneshot(post_json("/numbers", raw))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {raw:?}");
        assert_eq!(
            json_body(response).await,
            json!({
                "code": "validation",
                "error": "Invalid JSON. Expected {\"value\": <int>}",
            })
        );
    }

    let response = app.oneshot(get("/numbers")).await.expect("response");
    assert_eq!(json_body(response).await, json!({ "list": [] }));
}

#[tokio::test]
async fn json_body_is_accepted_under_any_content_type() {
    let app = test_app();
    let form = Request::post("/numbers")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(r#"{"value": 3}"#))
        .expect("request");
    let response = app.clone().oneshot(form).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "input": 3, "action": "list empty, appended 3", "updated": [3] })
    );

    let bare = Request::post("/numbers")
        .body(Body::from(r#"{"value": 4}"#))
        .expect("request");
    let response = app.oneshot(bare).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["updated"], json!([3, 4]));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let raw = format!(r#"{{"value": 1, "pad": "{}"}}"#, "x".repeat(4096));
    let request = Request::post("/numbers")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, raw.len())
        .body(Body::from(raw))
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let body = json_body(response).await;
    assert_eq!(body["code"], json!("payload_too_large"));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn oversized_body_without_length_header_is_rejected_as_json() {
    let raw = format!(r#"{{"value": 1, "pad": "{}"}}"#, "x".repeat(4096));
    let response = test_app()
        .oneshot(post_json("/numbers", raw))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json_body(response).await["code"], json!("payload_too_large"));
}

#[tokio::test]
async fn reset_clears_state() {
    let app = test_app();
    app.clone()
        .oneshot(post_json("/numbers", r#"{"value": 4}"#))
        .await
        .expect("response");

    let response = app.clone().oneshot(post_empty("/reset")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "message": "state cleared" }));

    let response = app.oneshot(get("/numbers")).await.expect("response");
    assert_eq!(json_body(response).await, json!({ "list": [] }));
}

#[tokio::test]
async fn example_runs_fixed_sequence_from_scratch() {
    let app = test_app();
    app.clone()
        .oneshot(post_json("/numbers", r#"{"value": -3}"#))
        .await
        .expect("response");

    let response = app.clone().oneshot(post_empty("/example")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "sequence": [5, 10, -6],
            "steps": [
                { "input": 5, "list": [5], "action": "list empty, appended 5" },
                { "input": 10, "list": [5, 10], "action": "same sign, appended 10" },
                { "input": -6, "list": [9], "action": "opposite sign, applied -6" },
            ],
            "final": [9],
        })
    );

    let response = app.oneshot(get("/numbers")).await.expect("response");
    assert_eq!(json_body(response).await, json!({ "list": [9] }));
}

#[tokio::test]
async fn concurrent_requests_are_all_applied() {
    let app = test_app();
    let mut handles = Vec::new();
    for _ in 0..32 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            app.oneshot(post_json("/numbers", r#"{"value": 2}"#))
                .await
                .expect("response")
                .status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.expect("join"), StatusCode::OK);
    }

    let response = app.oneshot(get("/numbers")).await.expect("response");
    let body = json_body(response).await;
    assert_eq!(body["list"].as_array().map(Vec::len), Some(32));
}
