//! JSON-file document store for postcards.
//!
//! A single versioned file holds every document. The whole set lives in
//! memory behind a lock; writes serialize the full set to a temporary file
//! and rename it into place, so a crash mid-write never corrupts the store.
//! `slug_id` is unique across the set, seed and user alike.

use std::path::{Path, PathBuf};

use postcards_api::{Postcard, Source};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("A postcard with slug '{slug}' already exists")]
    DuplicateSlug { slug: String },
}

/// Current store file version.
const STORE_VERSION: u32 = 1;

/// On-disk envelope.
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    postcards: Vec<Postcard>,
}

/// File-backed postcard store.
pub struct FileStore {
    path: PathBuf,
    postcards: RwLock<Vec<Postcard>>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed. A
    /// missing file is an empty store; a present file must match the
    /// current version.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let postcards = match fs::read_to_string(&path).await {
            Ok(content) => {
                let file: StoreFile = serde_json::from_str(&content)?;
                if file.version != STORE_VERSION {
                    return Err(StoreError::VersionMismatch {
                        expected: STORE_VERSION,
                        found: file.version,
                    });
                }
                file.postcards
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path,
            postcards: RwLock::new(postcards),
        })
    }

    /// List postcards, optionally filtered by source and scene, sorted by
    /// `created_at` ascending (missing timestamps first, insertion order on
    /// ties).
    pub async fn list(&self, source: Option<Source>, scene: Option<&str>) -> Vec<Postcard> {
        let postcards = self.postcards.read().await;

        let mut matching: Vec<Postcard> = postcards
            .iter()
            .filter(|p| source.map(|s| p.source == s).unwrap_or(true))
            .filter(|p| scene.map(|s| p.scene.as_deref() == Some(s)).unwrap_or(true))
            .cloned()
            .collect();

        matching.sort_by_key(|p| p.created_at.clone().unwrap_or_default());
        matching
    }

    /// Fetch one postcard by slug.
    pub async fn get(&self, slug_id: &str) -> Option<Postcard> {
        self.postcards
            .read()
            .await
            .iter()
            .find(|p| p.slug_id == slug_id)
            .cloned()
    }

    /// Insert a postcard, enforcing slug uniqueness, and flush to disk.
    pub async fn insert(&self, postcard: Postcard) -> Result<Postcard, StoreError> {
        let mut postcards = self.postcards.write().await;

        if postcards.iter().any(|p| p.slug_id == postcard.slug_id) {
            return Err(StoreError::DuplicateSlug {
                slug: postcard.slug_id,
            });
        }

        postcards.push(postcard.clone());
        self.flush(&postcards).await?;
        Ok(postcard)
    }

    /// Insert any of the given postcards whose slugs are not present yet.
    /// Used at startup to keep the seed story in the store alongside user
    /// content. Returns how many were added.
    pub async fn seed_if_missing(&self, seed: &[Postcard]) -> Result<usize, StoreError> {
        let mut postcards = self.postcards.write().await;

        let mut added = 0;
        for postcard in seed {
            if !postcards.iter().any(|p| p.slug_id == postcard.slug_id) {
                postcards.push(postcard.clone());
                added += 1;
            }
        }

        if added > 0 {
            self.flush(&postcards).await?;
        }
        Ok(added)
    }

    /// Number of stored postcards.
    pub async fn len(&self) -> usize {
        self.postcards.read().await.len()
    }

    /// Serialize the full set and rename it into place.
    async fn flush(&self, postcards: &[Postcard]) -> Result<(), StoreError> {
        let file = StoreFile {
            version: STORE_VERSION,
            postcards: postcards.to_vec(),
        };
        let content = serde_json::to_string_pretty(&file)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn postcard(slug: &str, source: Source, created_at: Option<&str>) -> Postcard {
        Postcard {
            source,
            created_at: created_at.map(str::to_string),
            ..Postcard::new(slug, "a message")
        }
    }

    #[tokio::test]
    async fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("postcards.json"))
            .await
            .unwrap();
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_insert_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("postcards.json");

        let store = FileStore::open(&path).await.unwrap();
        store
            .insert(postcard("user-1", Source::User, Some("2024-01-01T00:00:00Z")))
            .await
            .unwrap();

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(reopened.len().await, 1);
        assert!(reopened.get("user-1").await.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("postcards.json"))
            .await
            .unwrap();

        store
            .insert(postcard("user-1", Source::User, None))
            .await
            .unwrap();

        let err = store
            .insert(postcard("user-1", Source::User, None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSlug { .. }));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("postcards.json"))
            .await
            .unwrap();

        store
            .insert(postcard("user-2", Source::User, Some("2024-02-01T00:00:00Z")))
            .await
            .unwrap();
        store
            .insert(postcard("seed-1", Source::Seed, Some("2024-03-01T00:00:00Z")))
            .await
            .unwrap();
        store
            .insert(postcard("user-1", Source::User, Some("2024-01-01T00:00:00Z")))
            .await
            .unwrap();

        let users = store.list(Some(Source::User), None).await;
        let slugs: Vec<_> = users.iter().map(|p| p.slug_id.as_str()).collect();
        assert_eq!(slugs, vec!["user-1", "user-2"]);

        let all = store.list(None, None).await;
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_list_by_scene() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("postcards.json"))
            .await
            .unwrap();

        let mut personal = postcard("user-1", Source::User, None);
        personal.scene = Some("personal".to_string());
        let mut story = postcard("seed-1", Source::Seed, None);
        story.scene = Some("story".to_string());

        store.insert(personal).await.unwrap();
        store.insert(story).await.unwrap();

        let personal = store.list(None, Some("personal")).await;
        assert_eq!(personal.len(), 1);
        assert_eq!(personal[0].slug_id, "user-1");
    }

    #[tokio::test]
    async fn test_seed_if_missing_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("postcards.json"))
            .await
            .unwrap();

        let seed = vec![
            postcard("first", Source::Seed, None),
            postcard("house-main", Source::Seed, None),
        ];

        assert_eq!(store.seed_if_missing(&seed).await.unwrap(), 2);
        assert_eq!(store.seed_if_missing(&seed).await.unwrap(), 0);
        assert_eq!(store.len().await, 2);
    }
}
