//! Narrative flow engine for Postcards from Nowhere.
//!
//! This crate provides:
//! - The fixed story content: seed postcards, choice menus, static flow
//! - Flow table derivation that splices user-authored postcards into the
//!   canonical ending
//! - The journey state machine deciding what screen comes next and when a
//!   transition interstitial interposes
//! - Write-back composition and the staged reveal utility screens share
//!
//! # Quick Start
//!
//! ```ignore
//! use postcards_core::{HeadlessConfig, HeadlessJourney};
//! use postcards_core::store::CatalogSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HeadlessConfig::quick_start("Ren");
//!     let mut journey = HeadlessJourney::load(&CatalogSource, config).await?;
//!
//!     let path = journey.walk_to_end(64, |choices| choices[0].id)?;
//!     println!("reached {} in {} screens", path.last().unwrap(), path.len());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod compose;
pub mod flow;
pub mod headless;
pub mod journey;
pub mod node;
pub mod reveal;
pub mod store;
pub mod testing;

// Primary public API
pub use catalog::{choices_for, resolve_choice, Choice};
pub use compose::{ComposeError, PostcardDraft};
pub use flow::FlowTable;
pub use headless::{HeadlessConfig, HeadlessJourney, Screen, WalkError};
pub use journey::{requires_interstitial, Advance, Journey, SessionIdentity};
pub use node::{humanize, NodeKind, ENTRY_NODE, WRITE_BACK_NODE};
pub use reveal::StagedReveal;
pub use store::{load_story, CatalogSource, PostcardSource, StoreError, StoryData};
