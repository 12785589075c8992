//! The flow engine's boundary with the persistence layer.
//!
//! The engine never performs CRUD beyond listing: it fetches the seed and
//! user sets once per screen mount, concurrently, and hands both to the flow
//! builder. Either fetch failing abandons the whole load so a half-built
//! table is never installed.

use async_trait::async_trait;
use postcards_api::{ApiError, ListFilter, Postcard, PostcardsClient};
use thiserror::Error;

use crate::catalog;

/// Errors from loading story data.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to fetch postcards: {0}")]
    Fetch(#[from] ApiError),
}

/// An async source of postcards, by source filter.
#[async_trait]
pub trait PostcardSource: Send + Sync {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Postcard>, StoreError>;
}

#[async_trait]
impl PostcardSource for PostcardsClient {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Postcard>, StoreError> {
        Ok(PostcardsClient::list(self, filter).await?)
    }
}

/// A source that serves the built-in seed catalog and no user postcards.
/// Lets the experience run without a backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogSource;

#[async_trait]
impl PostcardSource for CatalogSource {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Postcard>, StoreError> {
        match filter.source {
            Some(postcards_api::Source::User) => Ok(Vec::new()),
            _ => Ok(catalog::seed_postcards().to_vec()),
        }
    }
}

/// Both postcard sets, fetched together.
#[derive(Debug, Clone, Default)]
pub struct StoryData {
    pub seed: Vec<Postcard>,
    pub user: Vec<Postcard>,
}

/// Fetch the seed and user postcard sets concurrently.
///
/// The two requests are independent but joined: one failure fails the load,
/// and callers surface the error instead of installing a partial flow table.
pub async fn load_story<S: PostcardSource>(source: &S) -> Result<StoryData, StoreError> {
    let seed_filter = ListFilter::seed();
    let user_filter = ListFilter::user();
    let (seed, user) = tokio::try_join!(
        source.list(&seed_filter),
        source.list(&user_filter),
    )?;

    Ok(StoryData { seed, user })
}
