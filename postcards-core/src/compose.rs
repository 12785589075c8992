//! Write-back composition: turning a visitor's message into a create
//! payload the backend accepts.

use chrono::Utc;
use postcards_api::{NewPostcard, Source};
use thiserror::Error;
use uuid::Uuid;

/// Postmark applied to user postcards that don't set one.
pub const DEFAULT_POSTMARK: &str = "Personal Message";

/// Scene applied to user postcards that don't set one.
pub const DEFAULT_SCENE: &str = "personal";

/// Errors from building a postcard draft.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("A postcard needs a message before it can be sent")]
    EmptyMessage,
}

/// Builder for a user-authored postcard.
#[derive(Debug, Clone, Default)]
pub struct PostcardDraft {
    message: String,
    to: String,
    from: String,
    postmarked: Option<String>,
    illustration: Option<String>,
    scene: Option<String>,
}

impl PostcardDraft {
    /// Start a draft with the message text.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = to.into();
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    pub fn with_postmarked(mut self, postmarked: impl Into<String>) -> Self {
        self.postmarked = Some(postmarked.into());
        self
    }

    pub fn with_illustration(mut self, illustration: impl Into<String>) -> Self {
        self.illustration = Some(illustration.into());
        self
    }

    pub fn with_scene(mut self, scene: impl Into<String>) -> Self {
        self.scene = Some(scene.into());
        self
    }

    /// Whether the draft can currently be sent.
    pub fn can_send(&self) -> bool {
        !self.message.trim().is_empty()
    }

    /// Finish the draft: generate a `user-` slug, stamp the date, and fill
    /// the defaults the backend expects.
    pub fn build(self) -> Result<NewPostcard, ComposeError> {
        if !self.can_send() {
            return Err(ComposeError::EmptyMessage);
        }

        Ok(NewPostcard {
            slug_id: Some(format!("user-{}", Uuid::new_v4())),
            message: self.message,
            to: self.to,
            from: self.from,
            postmarked: self
                .postmarked
                .unwrap_or_else(|| DEFAULT_POSTMARK.to_string()),
            date: Some(Utc::now().to_rfc3339()),
            illustration: self.illustration,
            scene: Some(self.scene.unwrap_or_else(|| DEFAULT_SCENE.to_string())),
            source: Source::User,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn test_build_fills_defaults() {
        let postcard = PostcardDraft::new("If you ever find yourself here again")
            .build()
            .unwrap();

        assert_eq!(postcard.postmarked, DEFAULT_POSTMARK);
        assert_eq!(postcard.scene.as_deref(), Some(DEFAULT_SCENE));
        assert_eq!(postcard.source, Source::User);
        assert!(postcard.date.is_some());

        let slug = postcard.slug_id.unwrap();
        assert!(slug.starts_with("user-"));
        // Generated slugs must land outside the fixed story vocabulary.
        assert_eq!(NodeKind::classify(&slug), NodeKind::UserAuthored);
    }

    #[test]
    fn test_build_keeps_explicit_fields() {
        let postcard = PostcardDraft::new("hello")
            .with_to("Ren")
            .with_from("A stranger")
            .with_postmarked("The Shore")
            .with_illustration("assets/shore.png")
            .with_scene("story")
            .build()
            .unwrap();

        assert_eq!(postcard.to, "Ren");
        assert_eq!(postcard.from, "A stranger");
        assert_eq!(postcard.postmarked, "The Shore");
        assert_eq!(postcard.illustration.as_deref(), Some("assets/shore.png"));
        assert_eq!(postcard.scene.as_deref(), Some("story"));
    }

    #[test]
    fn test_blank_message_is_rejected() {
        assert!(!PostcardDraft::new("   \n ").can_send());
        assert!(matches!(
            PostcardDraft::new("").build(),
            Err(ComposeError::EmptyMessage)
        ));
    }

    #[test]
    fn test_generated_slugs_are_unique() {
        let a = PostcardDraft::new("one").build().unwrap().slug_id;
        let b = PostcardDraft::new("two").build().unwrap().slug_id;
        assert_ne!(a, b);
    }
}
