//! Node-id classification for the narrative graph.
//!
//! Every screen in the story is addressed by a slug ("node id"). The slug's
//! shape alone decides how it renders and which transition rules apply, so
//! classification must be total: any string maps to exactly one kind.

/// The entry node of the story.
pub const ENTRY_NODE: &str = "first";

/// The sentinel node that ends the story and opens the write-back screen.
pub const WRITE_BACK_NODE: &str = "writeBack";

/// The three fixed story chapters, in story order.
pub const CHAPTERS: [&str; 3] = ["house", "city", "shore"];

/// What kind of screen a node id addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The opening postcard (`first`).
    Entry,
    /// A chapter's primary story postcard (`{chapter}-main`).
    Main,
    /// A chapter's two-branch menu (`{chapter}-choices`).
    Choices,
    /// One of the two continuations after a choice (`{chapter}-choice-{n}`).
    ChoiceLeaf,
    /// The write-back sentinel (`writeBack`).
    WriteBack,
    /// A visitor-submitted postcard, outside the fixed story vocabulary.
    UserAuthored,
}

impl NodeKind {
    /// Classify a node id. First match wins; the order matters because
    /// `-choices` would otherwise be shadowed by broader suffix checks.
    pub fn classify(node_id: &str) -> NodeKind {
        if node_id == ENTRY_NODE {
            return NodeKind::Entry;
        }
        if node_id == WRITE_BACK_NODE {
            return NodeKind::WriteBack;
        }
        if node_id.ends_with("-choices") {
            return NodeKind::Choices;
        }
        if node_id.ends_with("-main") {
            return NodeKind::Main;
        }
        if is_choice_leaf(node_id) {
            return NodeKind::ChoiceLeaf;
        }
        NodeKind::UserAuthored
    }

    /// True for slugs that belong to the fixed story vocabulary. A user
    /// postcard whose slug collides with one of these is noise and gets
    /// filtered out of flow construction.
    pub fn is_static_shaped(node_id: &str) -> bool {
        !matches!(Self::classify(node_id), NodeKind::UserAuthored)
    }
}

/// `{house|city|shore}-choice-<digits>` with at least one digit.
fn is_choice_leaf(node_id: &str) -> bool {
    CHAPTERS.iter().any(|chapter| {
        node_id
            .strip_prefix(chapter)
            .and_then(|rest| rest.strip_prefix("-choice-"))
            .map(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .unwrap_or(false)
    })
}

/// Turn a slug into display copy: dashes become spaces, words capitalize.
/// Used as the interstitial title/subtitle fallback for nodes without
/// authored labels.
pub fn humanize(node_id: &str) -> String {
    node_id
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_fixed_vocabulary() {
        assert_eq!(NodeKind::classify("first"), NodeKind::Entry);
        assert_eq!(NodeKind::classify("writeBack"), NodeKind::WriteBack);
        assert_eq!(NodeKind::classify("house-main"), NodeKind::Main);
        assert_eq!(NodeKind::classify("city-main"), NodeKind::Main);
        assert_eq!(NodeKind::classify("house-choices"), NodeKind::Choices);
        assert_eq!(NodeKind::classify("shore-choice-2"), NodeKind::ChoiceLeaf);
        assert_eq!(NodeKind::classify("city-choice-1"), NodeKind::ChoiceLeaf);
    }

    #[test]
    fn test_classify_user_authored() {
        assert_eq!(NodeKind::classify("user-abc123"), NodeKind::UserAuthored);
        assert_eq!(NodeKind::classify(""), NodeKind::UserAuthored);
        assert_eq!(NodeKind::classify("shore"), NodeKind::UserAuthored);
        // Wrong chapter prefix is not a leaf.
        assert_eq!(NodeKind::classify("beach-choice-1"), NodeKind::UserAuthored);
        // Missing or non-numeric index is not a leaf.
        assert_eq!(NodeKind::classify("house-choice-"), NodeKind::UserAuthored);
        assert_eq!(NodeKind::classify("house-choice-x"), NodeKind::UserAuthored);
    }

    #[test]
    fn test_choices_suffix_wins_over_leaf_pattern() {
        // "-choices" is checked before the leaf pattern; a hybrid like this
        // must land on Choices, never ChoiceLeaf.
        assert_eq!(NodeKind::classify("house-choice-1-choices"), NodeKind::Choices);
    }

    #[test]
    fn test_classify_is_total_and_deterministic() {
        for id in ["first", "writeBack", "house-main", "x", "-", "user-1"] {
            assert_eq!(NodeKind::classify(id), NodeKind::classify(id));
        }
    }

    #[test]
    fn test_static_shaped() {
        assert!(NodeKind::is_static_shaped("first"));
        assert!(NodeKind::is_static_shaped("writeBack"));
        assert!(NodeKind::is_static_shaped("shore-choice-1"));
        assert!(!NodeKind::is_static_shaped("user-abc123"));
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("house-main"), "House Main");
        assert_eq!(humanize("user-abc"), "User Abc");
        assert_eq!(humanize("first"), "First");
        assert_eq!(humanize("--odd--"), "Odd");
    }
}
