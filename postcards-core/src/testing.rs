//! Testing utilities for the flow engine.
//!
//! Provides a `MockStore` for deterministic loads without a backend, a
//! `TestHarness` wrapping a ready-made journey, and assertion helpers used
//! by the integration suites.

use async_trait::async_trait;
use postcards_api::{ApiError, ListFilter, Postcard, Source};

use crate::catalog::seed_postcards;
use crate::journey::{Advance, Journey, SessionIdentity};
use crate::store::{PostcardSource, StoreError, StoryData};

/// A user postcard fixture with just a slug and a date.
pub fn user_postcard(slug: &str, date: &str) -> Postcard {
    Postcard {
        date: Some(date.to_string()),
        source: Source::User,
        postmarked: "Personal Message".to_string(),
        ..Postcard::new(slug, "a message left behind")
    }
}

/// An in-memory postcard source with scriptable failures.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    seed: Vec<Postcard>,
    user: Vec<Postcard>,
    fail_seed: bool,
    fail_user: bool,
}

impl MockStore {
    /// A store serving the built-in seed catalog and no user postcards.
    pub fn new() -> Self {
        Self {
            seed: seed_postcards().to_vec(),
            ..Self::default()
        }
    }

    /// Add user postcards to the store.
    pub fn with_user(mut self, user: Vec<Postcard>) -> Self {
        self.user = user;
        self
    }

    /// Replace the seed set.
    pub fn with_seed(mut self, seed: Vec<Postcard>) -> Self {
        self.seed = seed;
        self
    }

    /// Make the seed fetch fail.
    pub fn failing_seed(mut self) -> Self {
        self.fail_seed = true;
        self
    }

    /// Make the user fetch fail.
    pub fn failing_user(mut self) -> Self {
        self.fail_user = true;
        self
    }
}

#[async_trait]
impl PostcardSource for MockStore {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Postcard>, StoreError> {
        let (postcards, fail) = match filter.source {
            Some(Source::Seed) => (&self.seed, self.fail_seed),
            Some(Source::User) => (&self.user, self.fail_user),
            None => {
                let mut all = self.seed.clone();
                all.extend(self.user.iter().cloned());
                return if self.fail_seed || self.fail_user {
                    Err(simulated_failure())
                } else {
                    Ok(all)
                };
            }
        };

        if fail {
            return Err(simulated_failure());
        }
        Ok(postcards.clone())
    }
}

fn simulated_failure() -> StoreError {
    StoreError::Fetch(ApiError::Network("simulated fetch failure".to_string()))
}

/// A journey over the seed catalog plus optional user postcards, ready to
/// drive from tests.
pub struct TestHarness {
    pub journey: Journey,
}

impl TestHarness {
    /// Harness with seed content only.
    pub fn new() -> Self {
        Self::with_user_postcards(Vec::new())
    }

    /// Harness with seed content plus the given user postcards.
    pub fn with_user_postcards(user: Vec<Postcard>) -> Self {
        let data = StoryData {
            seed: seed_postcards().to_vec(),
            user,
        };
        Self {
            journey: Journey::new(&data, SessionIdentity::new("Test Visitor")),
        }
    }

    /// Continue, applying the decision: immediate navigations are taken,
    /// interstitials are left pending for [`Self::finish_transition`].
    pub fn continue_story(&mut self) -> Advance {
        let advance = self.journey.advance();
        if let Advance::Navigate { target } = &advance {
            self.journey.navigate_to(&target.clone());
        }
        advance
    }

    /// Complete a pending interstitial and take the deferred navigation.
    pub fn finish_transition(&mut self) -> Option<String> {
        let target = self.journey.complete_transition()?;
        self.journey.navigate_to(&target);
        Some(target)
    }

    /// Select a choice on the current menu and navigate to its target.
    /// Returns false (and stays put) when the selection is invalid.
    pub fn choose(&mut self, choice_id: &str) -> bool {
        match self.journey.select_choice(choice_id) {
            Some(choice) => {
                self.journey.navigate_to(choice.postcard_id);
                true
            }
            None => false,
        }
    }

    /// The node the harness currently sits on.
    pub fn at(&self) -> &str {
        self.journey.current_node()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the harness sits on the expected node.
#[track_caller]
pub fn assert_at(harness: &TestHarness, node: &str) {
    assert_eq!(
        harness.at(),
        node,
        "Expected to be at '{node}', got '{}'",
        harness.at()
    );
}

/// Assert an advance navigates immediately to the expected target.
#[track_caller]
pub fn assert_navigates(advance: &Advance, expected: &str) {
    match advance {
        Advance::Navigate { target } if target == expected => {}
        other => panic!("Expected Navigate to '{expected}', got {other:?}"),
    }
}

/// Assert an advance pauses on an interstitial into the expected target.
#[track_caller]
pub fn assert_interstitial(advance: &Advance, expected: &str) {
    match advance {
        Advance::Interstitial { target, .. } if target == expected => {}
        other => panic!("Expected Interstitial into '{expected}', got {other:?}"),
    }
}
