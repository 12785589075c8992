//! CRUD backend for Postcards from Nowhere.
//!
//! Library surface for the server binary and its integration tests: the
//! document store, the HTTP routes, and the environment-driven config.

pub mod config;
pub mod routes;
pub mod store;

pub use config::Config;
pub use routes::{router, AppState};
pub use store::{FileStore, StoreError};
