//! Integration tests for the postcards API surface.
//!
//! Each test spins up the router over a temp-dir store and drives it with
//! in-process requests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use postcards_server::{router, AppState, FileStore};

async fn test_app(dir: &TempDir) -> Router {
    let store = FileStore::open(dir.path().join("postcards.json"))
        .await
        .unwrap();
    store
        .seed_if_missing(postcards_core::catalog::seed_postcards())
        .await
        .unwrap();

    router(AppState {
        store: Arc::new(store),
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_list_returns_seeded_story() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let response = app.oneshot(get("/api/postcards?source=seed")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let postcards = body.as_array().unwrap();
    assert_eq!(
        postcards.len(),
        postcards_core::catalog::seed_postcards().len()
    );
    assert!(postcards.iter().any(|p| p["slugId"] == "first"));
}

#[tokio::test]
async fn test_list_grouped_by_scene() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .oneshot(get("/api/postcards?grouped=true"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let groups = body.as_object().unwrap();
    assert!(groups.contains_key("story"));
}

#[tokio::test]
async fn test_get_by_slug_and_not_found() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .clone()
        .oneshot(get("/api/postcards/house-main"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["slugId"], "house-main");

    let response = app
        .oneshot(get("/api/postcards/no-such-slug"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_create_fills_defaults_and_persists() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/postcards",
            json!({ "message": "Wish you were here." }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let slug = body["slugId"].as_str().unwrap().to_string();
    assert!(slug.starts_with("user-"));
    assert_eq!(body["source"], "user");
    assert!(body["created_at"].is_string());

    // The document is immediately readable back.
    let response = app
        .oneshot(get(&format!("/api/postcards/{slug}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_forces_user_source() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .oneshot(post_json(
            "/api/postcards",
            json!({ "message": "sneaky", "source": "seed" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["source"], "user");
}

#[tokio::test]
async fn test_create_rejects_empty_message() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .oneshot(post_json("/api/postcards", json!({ "message": "  " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_failed");
    assert!(body["details"].as_array().unwrap()[0]
        .as_str()
        .unwrap()
        .contains("message"));
}

#[tokio::test]
async fn test_create_rejects_duplicate_slug() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    // "first" is already taken by the seed story.
    let response = app
        .oneshot(post_json(
            "/api/postcards",
            json!({ "message": "collision", "slugId": "first" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "duplicate_slug");
}

#[tokio::test]
async fn test_created_user_postcards_order_by_created_at() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    for message in ["one", "two"] {
        let response = app
            .clone()
            .oneshot(post_json("/api/postcards", json!({ "message": message })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(get("/api/postcards?source=user"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let messages: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["one", "two"]);
}
