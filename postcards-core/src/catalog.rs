//! The fixed story content: seed postcards, the static flow skeleton, and
//! the three binary choice menus.
//!
//! Everything here is defined at build time and immutable. User-authored
//! postcards are spliced in at runtime by the flow builder, never here.

use postcards_api::{Postcard, Source};

use crate::node::WRITE_BACK_NODE;

/// The static story skeleton: node -> next node.
///
/// Note the `*-choices` nodes carry no outgoing edge here; the flow builder
/// fills in a structural default and choice screens resolve their own exit.
pub const STORY_SKELETON: &[(&str, &str)] = &[
    ("first", "house-main"),
    ("house-main", "house-choices"),
    ("house-choice-1", "city-main"),
    ("house-choice-2", "city-main"),
    ("city-main", "city-choices"),
    ("city-choice-1", "shore-main"),
    ("city-choice-2", "shore-main"),
    ("shore-main", "shore-choices"),
    ("shore-choice-1", WRITE_BACK_NODE),
    ("shore-choice-2", WRITE_BACK_NODE),
];

/// One branch in a choice menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Identity of the choice entry itself.
    pub id: &'static str,
    /// Target node navigated to when this choice is taken.
    pub postcard_id: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
}

pub const HOUSE_CHOICES: [Choice; 2] = [
    Choice {
        id: "house-choice-1",
        postcard_id: "house-choice-1",
        title: "Old Videogame",
        subtitle: "An old game hums softly",
    },
    Choice {
        id: "house-choice-2",
        postcard_id: "house-choice-2",
        title: "Familiar Face",
        subtitle: "Someone's voice lingers here",
    },
];

pub const CITY_CHOICES: [Choice; 2] = [
    Choice {
        id: "city-choice-1",
        postcard_id: "city-choice-1",
        title: "Winter to Spring",
        subtitle: "The first light after a long cold",
    },
    Choice {
        id: "city-choice-2",
        postcard_id: "city-choice-2",
        title: "Summer to Autumn",
        subtitle: "The last warmth before goodbye",
    },
];

pub const SHORE_CHOICES: [Choice; 2] = [
    Choice {
        id: "shore-choice-1",
        postcard_id: "shore-choice-1",
        title: "Gray Day (Bird)",
        subtitle: "The wind holds its breath",
    },
    Choice {
        id: "shore-choice-2",
        postcard_id: "shore-choice-2",
        title: "Meal by the Sea",
        subtitle: "The taste of calm",
    },
];

/// The choice set shown on a `*-choices` node, if any.
pub fn choices_for(choices_node_id: &str) -> Option<&'static [Choice]> {
    match choices_node_id {
        "house-choices" => Some(&HOUSE_CHOICES),
        "city-choices" => Some(&CITY_CHOICES),
        "shore-choices" => Some(&SHORE_CHOICES),
        _ => None,
    }
}

/// Pure lookup of a selected choice within a choice set.
///
/// Returns `None` when the set is unknown or the selection is not one of its
/// entries; callers keep the continue affordance disabled in that case.
pub fn resolve_choice(choice_set_id: &str, selected_choice_id: &str) -> Option<&'static Choice> {
    choices_for(choice_set_id)?
        .iter()
        .find(|choice| choice.id == selected_choice_id)
}

lazy_static::lazy_static! {
    /// The authored story postcards, in story order.
    static ref SEED_POSTCARDS: Vec<Postcard> = vec![
        seed(
            "first",
            "Nowhere",
            "You found this in a box you don't remember packing.\n\
             The handwriting looks almost like yours.\n\
             Keep reading. The rest of them are waiting.",
        ),
        seed_with_labels(
            "house-main",
            "The Old House",
            "The porch light is still on, the way it was left.\n\
             Dust settles where the afternoons used to.\n\
             Nobody locked the door. Nobody needed to.",
            Some("Somewhere a porch light waits"),
            Some("Which memory do you keep from this house?"),
        ),
        seed_with_labels(
            "house-choice-1",
            "The Back Room",
            "The cartridge still fits on the third try.\n\
             A tiny tune plays for no one, and then for you.",
            None,
            None,
        ),
        seed_with_labels(
            "house-choice-2",
            "The Kitchen Doorway",
            "Someone is calling a name from the kitchen.\n\
             It takes a moment to remember the name is yours.",
            None,
            None,
        ),
        seed_with_labels(
            "city-main",
            "The City",
            "Every window is a postcard nobody sent.\n\
             The trains still run on the old timetable,\n\
             carrying the smell of rain between districts.",
            Some("The streets remember your shortcuts"),
            Some("Which season do you carry out of the city?"),
        ),
        seed_with_labels(
            "city-choice-1",
            "The Thawing Street",
            "The snow gives up one morning, all at once.\n\
             Strangers walk slower, faces turned to the light.",
            None,
            None,
        ),
        seed_with_labels(
            "city-choice-2",
            "The Last Warm Evening",
            "The café chairs come inside tonight.\n\
             Everyone lingers a little, pretending not to.",
            None,
            None,
        ),
        seed_with_labels(
            "shore-main",
            "The Shore",
            "The tide keeps the only honest schedule here.\n\
             Whatever you wrote in the sand this morning,\n\
             the sea has already answered.",
            Some("Salt air, and the end of the road"),
            Some("What does the shore leave you with?"),
        ),
        seed_with_labels(
            "shore-choice-1",
            "The Gray Morning",
            "A single bird holds still against the wind.\n\
             The whole gray day balances on its wings.",
            None,
            None,
        ),
        seed_with_labels(
            "shore-choice-2",
            "The Table by the Water",
            "Bread, salt, something warm in a chipped cup.\n\
             The meal tastes like staying a while longer.",
            None,
            None,
        ),
    ];
}

fn seed(slug_id: &str, postmarked: &str, message: &str) -> Postcard {
    seed_with_labels(slug_id, postmarked, message, None, None)
}

fn seed_with_labels(
    slug_id: &str,
    postmarked: &str,
    message: &str,
    transition_label: Option<&str>,
    choice_label: Option<&str>,
) -> Postcard {
    Postcard {
        slug_id: slug_id.to_string(),
        to: String::new(),
        from: String::new(),
        postmarked: postmarked.to_string(),
        message: message.to_string(),
        date: None,
        illustration: None,
        transition_label: transition_label.map(str::to_string),
        choice_label: choice_label.map(str::to_string),
        source: Source::Seed,
        created_at: None,
        scene: Some("story".to_string()),
    }
}

/// All authored story postcards.
pub fn seed_postcards() -> &'static [Postcard] {
    &SEED_POSTCARDS
}

/// Look up an authored story postcard by slug.
pub fn seed_postcard(slug_id: &str) -> Option<&'static Postcard> {
    SEED_POSTCARDS.iter().find(|p| p.slug_id == slug_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn test_seed_slugs_are_unique_and_static_shaped() {
        let mut seen = std::collections::HashSet::new();
        for postcard in seed_postcards() {
            assert!(seen.insert(postcard.slug_id.clone()), "duplicate seed slug");
            assert!(NodeKind::is_static_shaped(&postcard.slug_id));
            assert!(!postcard.message.trim().is_empty());
        }
    }

    #[test]
    fn test_skeleton_sources_have_catalog_entries() {
        // Every node the skeleton can land on (other than writeBack) renders
        // a postcard, so it needs catalog content.
        for (from, to) in STORY_SKELETON {
            assert!(seed_postcard(from).is_some(), "missing catalog entry for {from}");
            if *to != WRITE_BACK_NODE {
                assert!(seed_postcard(to).is_some(), "missing catalog entry for {to}");
            }
        }
    }

    #[test]
    fn test_choice_sets_have_two_entries_each() {
        for node in ["house-choices", "city-choices", "shore-choices"] {
            let choices = choices_for(node).unwrap();
            assert_eq!(choices.len(), 2);
        }
        assert!(choices_for("meadow-choices").is_none());
    }

    #[test]
    fn test_resolve_choice_lookup() {
        let choice = resolve_choice("house-choices", "house-choice-1").unwrap();
        assert_eq!(choice.postcard_id, "house-choice-1");

        assert!(resolve_choice("house-choices", "city-choice-1").is_none());
        assert!(resolve_choice("nowhere-choices", "house-choice-1").is_none());
    }

    #[test]
    fn test_mains_carry_transition_and_choice_labels() {
        for chapter in crate::node::CHAPTERS {
            let main = seed_postcard(&format!("{chapter}-main")).unwrap();
            assert!(main.transition_label.is_some());
            assert!(main.choice_label.is_some());
        }
    }
}
