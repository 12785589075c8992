//! The flow resolver: a small state machine that walks the narrative graph.
//!
//! A `Journey` owns the current node id, the derived flow table, and the
//! per-navigation transition state. It decides what happens on "continue" —
//! navigate now, pause on an interstitial first, or fall back to the entry
//! route — but it never performs navigation itself; callers apply the
//! returned decision and report route changes back via [`Journey::navigate_to`].

use std::collections::HashMap;

use postcards_api::Postcard;

use crate::catalog::{self, Choice};
use crate::flow::FlowTable;
use crate::node::{humanize, NodeKind, ENTRY_NODE};
use crate::store::StoryData;

/// Interstitial subtitle used when the target is a visitor's postcard and
/// carries no authored transition copy.
pub const USER_TRANSITION_SUBTITLE: &str = "A postcard left behind by another traveler";

/// The visitor's name, captured once at the entry screen and threaded
/// through navigation explicitly. The flow engine only reads it for display
/// substitution; persistence fallbacks live at the UI boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionIdentity {
    pub user_name: String,
}

impl SessionIdentity {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
        }
    }
}

/// Pending-transition state, owned by the currently mounted screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum TransitionState {
    #[default]
    Idle,
    Transitioning {
        target: String,
    },
}

/// The resolver's decision for a "continue" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Navigate to the target immediately.
    Navigate { target: String },
    /// Show an interstitial first; navigation is deferred until
    /// [`Journey::complete_transition`].
    Interstitial {
        target: String,
        title: String,
        subtitle: String,
    },
    /// The graph has no edge here; return to the entry route.
    ReturnHome,
}

/// Whether the edge `from -> to` passes through a transition screen.
pub fn requires_interstitial(from: &str, to: &str) -> bool {
    match (NodeKind::classify(from), NodeKind::classify(to)) {
        (NodeKind::Entry, NodeKind::Main) => true,
        (NodeKind::ChoiceLeaf, NodeKind::Main) => true,
        // Only the story's terminal leaves hand off to user content.
        (NodeKind::ChoiceLeaf, NodeKind::UserAuthored) => {
            from == "shore-choice-1" || from == "shore-choice-2"
        }
        _ => false,
    }
}

/// A walk through the story.
pub struct Journey {
    current: String,
    flow: FlowTable,
    postcards: HashMap<String, Postcard>,
    identity: SessionIdentity,
    transition: TransitionState,
}

impl Journey {
    /// Start a journey at the entry node.
    pub fn new(data: &StoryData, identity: SessionIdentity) -> Self {
        Self::with_start(data, identity, ENTRY_NODE)
    }

    /// Start a journey at a route-derived node id (empty means the entry).
    pub fn with_start(data: &StoryData, identity: SessionIdentity, start: &str) -> Self {
        let flow = FlowTable::build(&data.seed, &data.user);

        // Merged catalog: user entries first, then seed entries overwrite,
        // so a colliding slug always resolves to the seed postcard.
        let mut postcards = HashMap::new();
        for postcard in &data.user {
            postcards.insert(postcard.slug_id.clone(), postcard.clone());
        }
        for postcard in &data.seed {
            postcards.insert(postcard.slug_id.clone(), postcard.clone());
        }

        let start = if start.is_empty() { ENTRY_NODE } else { start };

        Self {
            current: start.to_string(),
            flow,
            postcards,
            identity,
            transition: TransitionState::Idle,
        }
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    /// The node the journey currently sits on.
    pub fn current_node(&self) -> &str {
        &self.current
    }

    pub fn current_kind(&self) -> NodeKind {
        NodeKind::classify(&self.current)
    }

    /// Catalog entry for any node, seed or user.
    pub fn postcard(&self, node_id: &str) -> Option<&Postcard> {
        self.postcards.get(node_id)
    }

    /// Catalog entry for the current node. `None` means the route named a
    /// slug absent from both catalogs: a recoverable not-found state.
    pub fn current_postcard(&self) -> Option<&Postcard> {
        self.postcards.get(&self.current)
    }

    pub fn flow(&self) -> &FlowTable {
        &self.flow
    }

    /// Choice set for the current node, when it is a choices menu.
    pub fn choices(&self) -> Option<&'static [Choice]> {
        catalog::choices_for(&self.current)
    }

    /// Title and subtitle for the current choice menu, drawn from the
    /// chapter's main postcard.
    pub fn choice_menu_copy(&self) -> Option<(String, String)> {
        let main_id = self.current.strip_suffix("-choices")?;
        let main = self.postcard(&format!("{main_id}-main"))?;
        Some((
            main.postmarked.clone(),
            main.choice_label.clone().unwrap_or_default(),
        ))
    }

    /// Resolve a selection on the current choice menu. Pure lookup; `None`
    /// for anything not in the menu, so callers keep "continue" disabled.
    pub fn select_choice(&self, selected_choice_id: &str) -> Option<&'static Choice> {
        catalog::resolve_choice(&self.current, selected_choice_id)
    }

    /// Whether an interstitial is pending.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.transition, TransitionState::Transitioning { .. })
    }

    /// Resolve a "continue" action from the current node.
    ///
    /// While an interstitial is pending this re-issues the same decision;
    /// completing the interstitial is the only way forward.
    pub fn advance(&mut self) -> Advance {
        if let TransitionState::Transitioning { target } = &self.transition {
            let target = target.clone();
            return self.interstitial_for(target);
        }

        let Some(next) = self.flow.next(&self.current).map(str::to_string) else {
            return Advance::ReturnHome;
        };

        if requires_interstitial(&self.current, &next) {
            self.transition = TransitionState::Transitioning {
                target: next.clone(),
            };
            self.interstitial_for(next)
        } else {
            Advance::Navigate { target: next }
        }
    }

    /// Complete a pending interstitial, returning the deferred target for
    /// the caller to navigate to. `None` when nothing was pending.
    pub fn complete_transition(&mut self) -> Option<String> {
        match std::mem::take(&mut self.transition) {
            TransitionState::Transitioning { target } => Some(target),
            TransitionState::Idle => None,
        }
    }

    /// Record a route change. Any pending transition belongs to the screen
    /// that was navigated away from, so it is dropped here.
    pub fn navigate_to(&mut self, node_id: &str) {
        self.current = node_id.to_string();
        self.transition = TransitionState::Idle;
    }

    /// Begin again from the entry node.
    pub fn reset(&mut self) {
        self.navigate_to(ENTRY_NODE);
    }

    /// Interstitial display copy for a target node.
    pub fn interstitial_copy(&self, node_id: &str) -> (String, String) {
        let postcard = self.postcard(node_id);

        let title = postcard
            .map(|p| p.postmarked.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| humanize(node_id));

        let subtitle = postcard
            .and_then(|p| p.transition_label.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                if NodeKind::classify(node_id) == NodeKind::UserAuthored {
                    USER_TRANSITION_SUBTITLE.to_string()
                } else {
                    humanize(node_id)
                }
            });

        (title, subtitle)
    }

    fn interstitial_for(&self, target: String) -> Advance {
        let (title, subtitle) = self.interstitial_copy(&target);
        Advance::Interstitial {
            target,
            title,
            subtitle,
        }
    }
}
