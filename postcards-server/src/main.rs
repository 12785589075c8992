//! Postcards from Nowhere backend.
//!
//! A small CRUD service persisting user-authored postcards alongside the
//! seed story content. State lives in a JSON document store on disk; the
//! seed catalog is inserted on first start so the collection is complete
//! from the beginning.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use postcards_server::{AppState, Config, FileStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("postcards_server=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();

    let store = FileStore::open(config.store_path()).await?;
    let seeded = store
        .seed_if_missing(postcards_core::catalog::seed_postcards())
        .await?;
    if seeded > 0 {
        tracing::info!(count = seeded, "seeded story postcards");
    }

    let app = postcards_server::router(AppState {
        store: Arc::new(store),
    })
    .layer(cors_layer(&config))
    .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
