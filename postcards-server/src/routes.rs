//! HTTP surface: list, fetch and create postcards.
//!
//! Response shapes match what the front end expects: plain arrays (or a
//! scene-grouped object) for lists, `{ "error": ... }` bodies for failures.
//! A request can fail, the process cannot.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use postcards_api::{Postcard, Source};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::store::{FileStore, StoreError};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FileStore>,
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/postcards", get(list_postcards).post(create_postcard))
        .route("/api/postcards/:slug_id", get(get_postcard))
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ListParams {
    source: Option<String>,
    scene: Option<String>,
    grouped: Option<String>,
}

async fn list_postcards(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let source = match params.source.as_deref() {
        Some("seed") => Some(Source::Seed),
        Some("user") => Some(Source::User),
        _ => None,
    };

    let postcards = state.store.list(source, params.scene.as_deref()).await;

    if params.grouped.as_deref() == Some("true") {
        let mut grouped: BTreeMap<String, Vec<Postcard>> = BTreeMap::new();
        for postcard in postcards {
            let key = postcard
                .scene
                .clone()
                .unwrap_or_else(|| "unknown".to_string());
            grouped.entry(key).or_default().push(postcard);
        }
        return Json(grouped).into_response();
    }

    Json(postcards).into_response()
}

async fn get_postcard(State(state): State<AppState>, Path(slug_id): Path<String>) -> Response {
    match state.store.get(&slug_id).await {
        Some(postcard) => Json(postcard).into_response(),
        None => error_json(StatusCode::NOT_FOUND, "not_found"),
    }
}

async fn create_postcard(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let payload = match validate_payload(&body) {
        Ok(payload) => payload,
        Err(details) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "validation_failed", "details": details })),
            )
                .into_response();
        }
    };

    let postcard = Postcard {
        slug_id: payload
            .slug_id
            .unwrap_or_else(|| format!("user-{}", Uuid::new_v4())),
        to: payload.to.unwrap_or_default(),
        from: payload.from.unwrap_or_default(),
        postmarked: payload.postmarked.unwrap_or_default(),
        message: payload.message,
        date: payload.date,
        illustration: payload.illustration,
        transition_label: None,
        choice_label: None,
        // Whatever the payload claims, anything created over HTTP is user
        // content.
        source: Source::User,
        created_at: Some(Utc::now().to_rfc3339()),
        scene: payload.scene,
    };

    match state.store.insert(postcard).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(StoreError::DuplicateSlug { slug }) => {
            tracing::warn!(slug, "rejected postcard with duplicate slug");
            error_json(StatusCode::CONFLICT, "duplicate_slug")
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to persist postcard");
            error_json(StatusCode::INTERNAL_SERVER_ERROR, "server_error")
        }
    }
}

/// Validated create fields.
#[derive(Debug)]
struct CreateFields {
    slug_id: Option<String>,
    message: String,
    to: Option<String>,
    from: Option<String>,
    postmarked: Option<String>,
    date: Option<String>,
    illustration: Option<String>,
    scene: Option<String>,
}

/// Field-by-field payload validation, collecting every problem instead of
/// stopping at the first.
fn validate_payload(body: &Value) -> Result<CreateFields, Vec<String>> {
    let mut errors = Vec::new();

    let Some(object) = body.as_object() else {
        return Err(vec!["payload must be a JSON object".to_string()]);
    };

    let message = match object.get("message") {
        Some(Value::String(message)) if !message.trim().is_empty() => message.clone(),
        _ => {
            errors.push("message is required and must be a non-empty string".to_string());
            String::new()
        }
    };

    let mut optional_string = |field: &str| -> Option<String> {
        match object.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(value)) => Some(value.clone()),
            Some(_) => {
                errors.push(format!("{field} must be a string"));
                None
            }
        }
    };

    let slug_id = optional_string("slugId").filter(|s| !s.trim().is_empty());
    let to = optional_string("to");
    let from = optional_string("from");
    let postmarked = optional_string("postmarked");
    let date = optional_string("date");
    let illustration = optional_string("illustration");
    let scene = optional_string("scene");

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CreateFields {
        slug_id,
        message,
        to,
        from,
        postmarked,
        date,
        illustration,
        scene,
    })
}

fn error_json(status: StatusCode, error: &str) -> Response {
    (status, Json(json!({ "error": error }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_message() {
        let errors = validate_payload(&json!({})).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("message"));

        let errors = validate_payload(&json!({ "message": "   " })).unwrap_err();
        assert!(errors[0].contains("message"));
    }

    #[test]
    fn test_validate_type_checks_optional_fields() {
        let errors = validate_payload(&json!({
            "message": "hello",
            "to": 42,
            "date": ["2024"]
        }))
        .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("to")));
        assert!(errors.iter().any(|e| e.contains("date")));
    }

    #[test]
    fn test_validate_rejects_non_object() {
        assert!(validate_payload(&json!("just a string")).is_err());
        assert!(validate_payload(&json!(null)).is_err());
    }

    #[test]
    fn test_validate_accepts_full_payload() {
        let fields = validate_payload(&json!({
            "slugId": "user-abc",
            "message": "hello",
            "to": "Ren",
            "postmarked": "Personal Message",
            "date": "2024-01-01",
            "scene": "personal"
        }))
        .unwrap();

        assert_eq!(fields.slug_id.as_deref(), Some("user-abc"));
        assert_eq!(fields.to.as_deref(), Some("Ren"));
        assert_eq!(fields.message, "hello");
    }

    #[test]
    fn test_blank_slug_means_generate_one() {
        let fields = validate_payload(&json!({ "message": "hello", "slugId": "  " })).unwrap();
        assert!(fields.slug_id.is_none());
    }
}
