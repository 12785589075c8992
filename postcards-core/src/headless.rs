//! Headless journey interface for programmatic use.
//!
//! Drives the story without any UI: suitable for scripted walks, smoke
//! tests against a live backend, and the terminal app's `--headless` mode.
//!
//! # Example
//!
//! ```ignore
//! use postcards_core::headless::{HeadlessConfig, HeadlessJourney};
//! use postcards_core::store::CatalogSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HeadlessConfig::quick_start("Ren");
//!     let mut journey = HeadlessJourney::load(&CatalogSource, config).await?;
//!
//!     let path = journey.walk_to_end(64, |choices| choices[0].id)?;
//!     println!("visited {} screens", path.len());
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::catalog::Choice;
use crate::journey::{Advance, Journey, SessionIdentity};
use crate::node::{NodeKind, ENTRY_NODE};
use crate::store::{load_story, PostcardSource, StoreError, StoryData};

/// Configuration for a headless journey.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Visitor name the postcards are addressed to.
    pub user_name: String,
    /// Node to start from.
    pub start: String,
}

impl HeadlessConfig {
    /// Start at the entry node with the given visitor name.
    pub fn quick_start(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            start: ENTRY_NODE.to_string(),
        }
    }

    /// Start at a specific node.
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = start.into();
        self
    }
}

/// What the walker currently faces.
#[derive(Debug, Clone)]
pub enum Screen {
    /// A readable postcard.
    Postcard {
        node: String,
        postmarked: String,
        message: String,
    },
    /// A two-branch menu.
    ChoiceMenu {
        node: String,
        title: String,
        subtitle: String,
        choices: &'static [Choice],
    },
    /// A pending transition screen.
    Interstitial {
        target: String,
        title: String,
        subtitle: String,
    },
    /// The write-back screen: the story is over.
    WriteBack,
    /// The route named a slug nobody knows.
    NotFound { node: String },
}

/// Errors from a scripted walk.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Walk exceeded {limit} steps without reaching the end")]
    StepLimit { limit: usize },

    #[error("Walk left the graph at '{node}'")]
    LeftGraph { node: String },
}

/// A story walk that can be controlled programmatically.
pub struct HeadlessJourney {
    journey: Journey,
    visited: Vec<String>,
}

impl HeadlessJourney {
    /// Load story data from a source and start walking.
    pub async fn load<S: PostcardSource>(
        source: &S,
        config: HeadlessConfig,
    ) -> Result<Self, StoreError> {
        let data = load_story(source).await?;
        Ok(Self::from_data(&data, config))
    }

    /// Start walking over already-fetched story data.
    pub fn from_data(data: &StoryData, config: HeadlessConfig) -> Self {
        let journey = Journey::with_start(
            data,
            SessionIdentity::new(config.user_name),
            &config.start,
        );
        let visited = vec![journey.current_node().to_string()];
        Self { journey, visited }
    }

    /// The underlying journey.
    pub fn journey(&self) -> &Journey {
        &self.journey
    }

    /// Every node visited so far, in order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Describe the screen the walker currently faces.
    pub fn screen(&self) -> Screen {
        let node = self.journey.current_node().to_string();

        match NodeKind::classify(&node) {
            NodeKind::WriteBack => Screen::WriteBack,
            NodeKind::Choices => {
                let (title, subtitle) = self.journey.choice_menu_copy().unwrap_or_default();
                let choices = self.journey.choices().unwrap_or(&[]);
                Screen::ChoiceMenu {
                    node,
                    title,
                    subtitle,
                    choices,
                }
            }
            _ => match self.journey.current_postcard() {
                Some(postcard) => Screen::Postcard {
                    node,
                    postmarked: postcard.postmarked.clone(),
                    message: postcard.message.clone(),
                },
                None => Screen::NotFound { node },
            },
        }
    }

    /// Continue from the current node, taking immediate navigations and
    /// surfacing interstitials for [`Self::complete_transition`].
    pub fn continue_story(&mut self) -> Screen {
        match self.journey.advance() {
            Advance::Navigate { target } => {
                self.go(&target);
                self.screen()
            }
            Advance::Interstitial {
                target,
                title,
                subtitle,
            } => Screen::Interstitial {
                target,
                title,
                subtitle,
            },
            Advance::ReturnHome => {
                self.go(ENTRY_NODE);
                self.screen()
            }
        }
    }

    /// Complete a pending interstitial, landing on its target.
    pub fn complete_transition(&mut self) -> Screen {
        if let Some(target) = self.journey.complete_transition() {
            self.go(&target);
        }
        self.screen()
    }

    /// Take a choice on the current menu. Returns `None` for an invalid
    /// selection, leaving the walker where it is.
    pub fn choose(&mut self, choice_id: &str) -> Option<Screen> {
        let target = self.journey.select_choice(choice_id)?.postcard_id;
        self.go(target);
        Some(self.screen())
    }

    /// Walk until the write-back screen, deciding menus with `pick`.
    ///
    /// Returns the visited path. Errors if the walk leaves the graph or
    /// fails to terminate within `limit` steps.
    pub fn walk_to_end<F>(&mut self, limit: usize, mut pick: F) -> Result<Vec<String>, WalkError>
    where
        F: FnMut(&'static [Choice]) -> &'static str,
    {
        for _ in 0..limit {
            match self.screen() {
                Screen::WriteBack => return Ok(self.visited.clone()),
                Screen::ChoiceMenu { choices, .. } => {
                    let choice_id = pick(choices);
                    if self.choose(choice_id).is_none() {
                        return Err(WalkError::LeftGraph {
                            node: self.journey.current_node().to_string(),
                        });
                    }
                }
                Screen::NotFound { node } => {
                    return Err(WalkError::LeftGraph { node });
                }
                Screen::Interstitial { .. } => {
                    self.complete_transition();
                }
                Screen::Postcard { .. } => {
                    if let Screen::Interstitial { .. } = self.continue_story() {
                        self.complete_transition();
                    }
                }
            }
        }

        Err(WalkError::StepLimit { limit })
    }

    fn go(&mut self, node: &str) {
        self.journey.navigate_to(node);
        self.visited.push(node.to_string());
    }
}
