//! Server configuration from environment variables, with development
//! defaults so a bare `cargo run` just works.

use std::path::{Path, PathBuf};

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Directory holding the document store file.
    pub data_dir: PathBuf,
    /// Allowed CORS origins; `*` means any.
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Read configuration from the environment.
    pub fn from_env() -> Self {
        let port = std::env::var("POSTCARDS_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(4000);

        let data_dir = std::env::var("POSTCARDS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let cors_origins = std::env::var("POSTCARDS_CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            port,
            data_dir,
            cors_origins,
        }
    }

    /// Path of the document store file.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("postcards.json")
    }

    /// Whether any origin is allowed.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }

    /// Build a config rooted at a specific directory (used by tests).
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4000,
            data_dir: PathBuf::from("./data"),
            cors_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}
