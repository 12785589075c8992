//! UI widgets for the postcards experience.

pub mod choices;
pub mod composer;
pub mod postcard;
pub mod transition;

pub use choices::ChoiceMenuWidget;
pub use composer::ComposerWidget;
pub use postcard::PostcardWidget;
pub use transition::TransitionWidget;
