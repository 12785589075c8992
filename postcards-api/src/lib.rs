//! Minimal REST client for the Postcards from Nowhere backend.
//!
//! This crate owns the wire representation of a postcard document and a
//! focused client for the three backend operations the app uses:
//! - `list` with optional source/scene filters (and the grouped variant)
//! - `get` by slug id
//! - `create` for user-authored postcards

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

const DEFAULT_API_BASE: &str = "http://localhost:4000/api";

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Postcard not found: {slug}")]
    NotFound { slug: String },
}

/// Where a postcard came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Seed,
    #[default]
    User,
}

impl Source {
    /// Query-string value for this source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Seed => "seed",
            Source::User => "user",
        }
    }
}

/// A postcard document as the backend stores and serves it.
///
/// `slug_id` doubles as the node id in the narrative graph. Every field
/// except `slug_id` and `message` is optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Postcard {
    pub slug_id: String,

    #[serde(default)]
    pub to: String,

    #[serde(default)]
    pub from: String,

    /// Location/chapter label, also used as a node's display title.
    #[serde(default)]
    pub postmarked: String,

    pub message: String,

    /// ISO-ish date string, used only for ordering user postcards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illustration: Option<String>,

    /// Copy shown on the interstitial when entering this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_label: Option<String>,

    /// Copy shown above a choice menu derived from this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice_label: Option<String>,

    #[serde(default)]
    pub source: Source,

    #[serde(default, rename = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
}

impl Postcard {
    /// Create a postcard with just the fields the flow engine requires.
    pub fn new(slug_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            slug_id: slug_id.into(),
            to: String::new(),
            from: String::new(),
            postmarked: String::new(),
            message: message.into(),
            date: None,
            illustration: None,
            transition_label: None,
            choice_label: None,
            source: Source::User,
            created_at: None,
            scene: None,
        }
    }
}

/// Payload for creating a new postcard.
///
/// Omitted `slug_id` means "generate one" on the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPostcard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug_id: Option<String>,

    pub message: String,

    #[serde(default)]
    pub to: String,

    #[serde(default)]
    pub from: String,

    #[serde(default)]
    pub postmarked: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illustration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,

    #[serde(default)]
    pub source: Source,
}

/// Filter for listing postcards.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Restrict to one source.
    pub source: Option<Source>,
    /// Restrict to one scene.
    pub scene: Option<String>,
    /// Ask the backend for the scene-grouped response shape.
    pub grouped: bool,
}

impl ListFilter {
    /// Only seed postcards.
    pub fn seed() -> Self {
        Self {
            source: Some(Source::Seed),
            ..Self::default()
        }
    }

    /// Only user-authored postcards.
    pub fn user() -> Self {
        Self {
            source: Some(Source::User),
            ..Self::default()
        }
    }
}

/// Shape of an error body returned by the backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    details: Vec<String>,
}

/// Postcards backend client.
#[derive(Clone)]
pub struct PostcardsClient {
    client: reqwest::Client,
    base_url: String,
}

impl PostcardsClient {
    /// Create a client for the given API base, e.g. `http://localhost:4000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the `POSTCARDS_API_BASE` environment variable,
    /// falling back to the local development default.
    pub fn from_env() -> Self {
        let base = std::env::var("POSTCARDS_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(base)
    }

    /// The configured API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List postcards matching the filter.
    ///
    /// The grouped response shape (scene -> postcards) is flattened into a
    /// single vector so callers never have to care which shape came back.
    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<Postcard>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(source) = filter.source {
            query.push(("source", source.as_str().to_string()));
        }
        if let Some(scene) = &filter.scene {
            query.push(("scene", scene.clone()));
        }
        if filter.grouped {
            query.push(("grouped", "true".to_string()));
        }

        let response = self
            .client
            .get(format!("{}/postcards", self.base_url))
            .query(&query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = check_status(response).await?;

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        flatten_postcards(value)
    }

    /// Fetch a single postcard by slug id.
    pub async fn get(&self, slug_id: &str) -> Result<Postcard, ApiError> {
        let response = self
            .client
            .get(format!("{}/postcards/{slug_id}", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.status().as_u16() == 404 {
            return Err(ApiError::NotFound {
                slug: slug_id.to_string(),
            });
        }

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Create a new postcard.
    pub async fn create(&self, postcard: &NewPostcard) -> Result<Postcard, ApiError> {
        let response = self
            .client
            .post(format!("{}/postcards", self.base_url))
            .json(postcard)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Map a non-success status to an `ApiError::Api` with the backend's message.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .map(|e| {
            if e.details.is_empty() {
                e.error
            } else {
                format!("{}: {}", e.error, e.details.join("; "))
            }
        })
        .filter(|m| !m.is_empty())
        .unwrap_or(body);

    Err(ApiError::Api { status, message })
}

/// Accept either a flat array or a scene-grouped object of postcards.
fn flatten_postcards(value: serde_json::Value) -> Result<Vec<Postcard>, ApiError> {
    match value {
        serde_json::Value::Array(_) => {
            serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
        }
        serde_json::Value::Object(map) => {
            // BTreeMap keeps group iteration order stable across calls.
            let grouped: BTreeMap<String, Vec<Postcard>> =
                serde_json::from_value(serde_json::Value::Object(map))
                    .map_err(|e| ApiError::Parse(e.to_string()))?;
            Ok(grouped.into_values().flatten().collect())
        }
        other => Err(ApiError::Parse(format!(
            "expected array or object, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postcard_wire_shape() {
        let json = r#"{
            "slugId": "house-main",
            "postmarked": "The Old House",
            "message": "The porch light is still on.",
            "transitionLabel": "Somewhere familiar",
            "source": "seed",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;

        let postcard: Postcard = serde_json::from_str(json).unwrap();
        assert_eq!(postcard.slug_id, "house-main");
        assert_eq!(postcard.source, Source::Seed);
        assert_eq!(postcard.transition_label.as_deref(), Some("Somewhere familiar"));
        assert_eq!(postcard.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(postcard.to, "");
    }

    #[test]
    fn test_postcard_roundtrip_uses_camel_case() {
        let postcard = Postcard {
            transition_label: Some("label".to_string()),
            ..Postcard::new("user-abc", "hello")
        };

        let value = serde_json::to_value(&postcard).unwrap();
        assert!(value.get("slugId").is_some());
        assert!(value.get("transitionLabel").is_some());
        assert!(value.get("slug_id").is_none());
    }

    #[test]
    fn test_flatten_accepts_array() {
        let value = serde_json::json!([
            { "slugId": "a", "message": "m" },
            { "slugId": "b", "message": "m" }
        ]);

        let postcards = flatten_postcards(value).unwrap();
        assert_eq!(postcards.len(), 2);
    }

    #[test]
    fn test_flatten_accepts_grouped_object() {
        let value = serde_json::json!({
            "personal": [{ "slugId": "user-1", "message": "m" }],
            "story": [
                { "slugId": "first", "message": "m" },
                { "slugId": "house-main", "message": "m" }
            ]
        });

        let postcards = flatten_postcards(value).unwrap();
        assert_eq!(postcards.len(), 3);
    }

    #[test]
    fn test_flatten_rejects_scalar() {
        let err = flatten_postcards(serde_json::json!(42)).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_list_filter_constructors() {
        assert_eq!(ListFilter::seed().source, Some(Source::Seed));
        assert_eq!(ListFilter::user().source, Some(Source::User));
        assert!(!ListFilter::user().grouped);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PostcardsClient::new("http://localhost:4000/api/");
        assert_eq!(client.base_url(), "http://localhost:4000/api");
    }
}
