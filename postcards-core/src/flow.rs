//! Flow table construction: the edge map that decides "what screen comes
//! next".
//!
//! The table has two layers. The static skeleton encodes the fixed story.
//! The derived extension, rebuilt from scratch on every load, splices the
//! chronological chain of user-authored postcards between the story's last
//! choice and the write-back screen. The build is a single pure pass over
//! immutable inputs; callers install the finished table atomically and never
//! mutate one in place.

use std::collections::{HashMap, HashSet};

use postcards_api::Postcard;

use crate::catalog::STORY_SKELETON;
use crate::node::{NodeKind, CHAPTERS, WRITE_BACK_NODE};

/// Edge map from node id to next node id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowTable {
    edges: HashMap<String, String>,
}

impl FlowTable {
    /// A fresh copy of the static story skeleton, with no user content.
    pub fn skeleton() -> Self {
        let edges = STORY_SKELETON
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Self { edges }
    }

    /// Derive the effective flow table from the fetched postcard sets.
    ///
    /// Seed postcards contribute their slugs (for collision filtering);
    /// user postcards outside the fixed vocabulary are chained in ascending
    /// date order after the story's terminal choices. The result is complete
    /// for any input, including an empty user set, which degenerates to
    /// `writeBack`.
    pub fn build(seed: &[Postcard], user: &[Postcard]) -> Self {
        let mut table = Self::skeleton();

        let free_form = free_form_slugs(seed, user);

        // Chapter structure is rewritten unconditionally: mains flow into
        // their menus, menus get a structural default to their first leaf.
        // The default edge exists only as a fallback when no explicit
        // selection was made; choice screens resolve their own exit.
        for chapter in CHAPTERS {
            table
                .edges
                .insert(format!("{chapter}-main"), format!("{chapter}-choices"));
            table
                .edges
                .entry(format!("{chapter}-choices"))
                .or_insert_with(|| format!("{chapter}-choice-1"));
        }

        // The story's terminal choices hand off to user content when there
        // is any, otherwise straight to the write-back screen.
        let after_story = free_form
            .first()
            .map(String::as_str)
            .unwrap_or(WRITE_BACK_NODE);
        table
            .edges
            .insert("shore-choice-1".to_string(), after_story.to_string());
        table
            .edges
            .insert("shore-choice-2".to_string(), after_story.to_string());

        // Chain the user postcards, ending at writeBack.
        for pair in free_form.windows(2) {
            table.edges.insert(pair[0].clone(), pair[1].clone());
        }
        if let Some(last) = free_form.last() {
            table
                .edges
                .insert(last.clone(), WRITE_BACK_NODE.to_string());
        }

        table.validate();
        table
    }

    /// The next node after `node_id`, if the graph knows one.
    pub fn next(&self, node_id: &str) -> Option<&str> {
        self.edges.get(node_id).map(String::as_str)
    }

    /// Number of edges in the table.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate all edges (unordered).
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Integrity scan. A choice-to-choice edge or a self-loop means the
    /// construction steps ran against stale data somewhere upstream; the
    /// edge is still followed, so this only warns.
    fn validate(&self) {
        for (from, to) in self.edges() {
            if from == to {
                tracing::warn!(node = from, "flow table contains a self-loop");
            }
            if NodeKind::classify(from) == NodeKind::ChoiceLeaf
                && NodeKind::classify(to) == NodeKind::ChoiceLeaf
            {
                tracing::warn!(from, to, "flow table contains a choice-to-choice edge");
            }
        }
    }
}

/// Filter and order the user postcards that take part in the flow.
///
/// Static-shaped slugs are noise (duplicates of story vocabulary), and any
/// user slug colliding with a seed slug loses to the seed entry. The
/// remainder sorts ascending by date, missing dates first; the sort is
/// stable so fetch order breaks ties.
fn free_form_slugs(seed: &[Postcard], user: &[Postcard]) -> Vec<String> {
    let seed_slugs: HashSet<&str> = seed.iter().map(|p| p.slug_id.as_str()).collect();

    let mut free_form: Vec<&Postcard> = user
        .iter()
        .filter(|p| !NodeKind::is_static_shaped(&p.slug_id))
        .filter(|p| !seed_slugs.contains(p.slug_id.as_str()))
        .collect();

    free_form.sort_by_key(|p| p.date.clone().unwrap_or_default());

    free_form.into_iter().map(|p| p.slug_id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_postcards;
    use postcards_api::Source;

    fn user_postcard(slug: &str, date: Option<&str>) -> Postcard {
        Postcard {
            date: date.map(str::to_string),
            source: Source::User,
            ..Postcard::new(slug, "a message")
        }
    }

    #[test]
    fn test_skeleton_matches_static_table() {
        let table = FlowTable::skeleton();
        assert_eq!(table.next("first"), Some("house-main"));
        assert_eq!(table.next("shore-choice-2"), Some(WRITE_BACK_NODE));
        assert_eq!(table.len(), STORY_SKELETON.len());
        // The skeleton deliberately has no edge for the menu nodes.
        assert_eq!(table.next("house-choices"), None);
    }

    #[test]
    fn test_build_with_no_user_postcards() {
        let table = FlowTable::build(seed_postcards(), &[]);

        assert_eq!(table.next("house-main"), Some("house-choices"));
        assert_eq!(table.next("house-choices"), Some("house-choice-1"));
        assert_eq!(table.next("shore-choice-1"), Some(WRITE_BACK_NODE));
        assert_eq!(table.next("shore-choice-2"), Some(WRITE_BACK_NODE));
        assert_eq!(table.next(WRITE_BACK_NODE), None);
    }

    #[test]
    fn test_build_splices_user_postcards_in_date_order() {
        let user = vec![
            user_postcard("u2", Some("2024-03-01")),
            user_postcard("u1", Some("2024-01-01")),
        ];
        let table = FlowTable::build(seed_postcards(), &user);

        assert_eq!(table.next("shore-choice-1"), Some("u1"));
        assert_eq!(table.next("shore-choice-2"), Some("u1"));
        assert_eq!(table.next("u1"), Some("u2"));
        assert_eq!(table.next("u2"), Some(WRITE_BACK_NODE));
    }

    #[test]
    fn test_missing_date_sorts_first_and_ties_are_stable() {
        let user = vec![
            user_postcard("dated", Some("2024-06-01")),
            user_postcard("undated-a", None),
            user_postcard("undated-b", None),
        ];
        let table = FlowTable::build(seed_postcards(), &user);

        assert_eq!(table.next("shore-choice-1"), Some("undated-a"));
        assert_eq!(table.next("undated-a"), Some("undated-b"));
        assert_eq!(table.next("undated-b"), Some("dated"));
        assert_eq!(table.next("dated"), Some(WRITE_BACK_NODE));
    }

    #[test]
    fn test_static_shaped_user_slugs_are_excluded() {
        let user = vec![
            user_postcard("house-main", Some("2024-01-01")),
            user_postcard("shore-choice-1", Some("2024-01-02")),
            user_postcard("writeBack", Some("2024-01-03")),
            user_postcard("genuine", Some("2024-01-04")),
        ];
        let table = FlowTable::build(seed_postcards(), &user);

        assert_eq!(table.next("shore-choice-1"), Some("genuine"));
        assert_eq!(table.next("genuine"), Some(WRITE_BACK_NODE));
        // The noise slug did not hijack the chapter edge.
        assert_eq!(table.next("house-main"), Some("house-choices"));
    }

    #[test]
    fn test_seed_slug_collision_loses_to_seed() {
        let seed = vec![Postcard {
            source: Source::Seed,
            ..Postcard::new("travelogue", "seed entry")
        }];
        let user = vec![
            user_postcard("travelogue", Some("2024-01-01")),
            user_postcard("other", Some("2024-02-01")),
        ];
        let table = FlowTable::build(&seed, &user);

        assert_eq!(table.next("shore-choice-1"), Some("other"));
        assert_eq!(table.next("travelogue"), None);
    }

    #[test]
    fn test_build_is_idempotent() {
        let user = vec![
            user_postcard("u1", Some("2024-01-01")),
            user_postcard("u2", None),
        ];
        let first = FlowTable::build(seed_postcards(), &user);
        let second = FlowTable::build(seed_postcards(), &user);
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_never_produces_choice_to_choice_edges() {
        let user = vec![user_postcard("u1", Some("2024-01-01"))];
        let table = FlowTable::build(seed_postcards(), &user);

        for (from, to) in table.edges() {
            assert!(
                !(NodeKind::classify(from) == NodeKind::ChoiceLeaf
                    && NodeKind::classify(to) == NodeKind::ChoiceLeaf),
                "choice-to-choice edge {from} -> {to}"
            );
            assert_ne!(from, to, "self-loop on {from}");
        }
    }
}
