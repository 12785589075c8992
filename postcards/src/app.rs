//! Main application state and logic.

use std::time::Duration;

use postcards_api::NewPostcard;
use postcards_core::{
    Advance, Journey, NodeKind, PostcardDraft, SessionIdentity, StagedReveal, StoryData,
    ENTRY_NODE,
};

use crate::ui::theme::Theme;

/// Which screen is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// The title screen with the staged fade-in.
    #[default]
    Title,
    /// "Who are the postcards addressed to?"
    NamePrompt,
    /// A readable postcard (front/back flip).
    Postcard,
    /// A chapter's two-branch menu.
    Choices,
    /// "If you ever find yourself here again, write back."
    WriteBack,
    /// The free-form composer.
    Composer,
    /// Confirmation after a postcard was sent.
    Sent,
    /// The route named a slug nobody knows.
    NotFound,
    /// Fetching the story failed.
    LoadError,
}

/// Reveal stages shared by every screen's fade-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStage {
    Title,
    Subtitle,
    Body,
    Controls,
}

/// A pending transition interstitial.
#[derive(Debug, Clone)]
pub struct TransitionView {
    pub target: String,
    pub title: String,
    pub subtitle: String,
}

/// Illustration tiles offered on the write-back screen.
pub const WRITE_BACK_TILES: [(&str, &str); 3] = [
    ("The Old House", "assets/postcards/house.png"),
    ("The City", "assets/postcards/city.png"),
    ("The Shore", "assets/postcards/shore.png"),
];

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub theme: Theme,
    pub journey: Option<Journey>,

    // Identity: captured once at the name prompt, mirrored here so a screen
    // change can always recover it.
    pub user_name: String,

    // Input state (name prompt and composer share the buffer).
    pub input_buffer: String,

    // Postcard screen state.
    pub flipped: bool,

    // Choice menu state; selection is a toggle.
    pub selected_choice: Option<&'static str>,

    // Write-back state.
    pub selected_tile: Option<usize>,

    // Pending interstitial overlay.
    pub transition: Option<TransitionView>,

    // Fade-in choreography, re-armed on every screen change.
    pub reveal: StagedReveal<RevealStage>,

    // Async work the main loop picks up.
    pub pending_load: bool,
    pub pending_send: Option<NewPostcard>,

    pub status: Option<String>,
    pub load_error: Option<String>,
    pub should_quit: bool,
    pub offline: bool,
}

impl App {
    /// Create the application on the title screen.
    pub fn new(offline: bool, reduce_motion: bool) -> Self {
        let reveal = StagedReveal::new([
            (Duration::from_millis(350), RevealStage::Title),
            (Duration::from_millis(800), RevealStage::Subtitle),
            (Duration::from_millis(1200), RevealStage::Body),
            (Duration::from_millis(1600), RevealStage::Controls),
        ]);
        let reveal = if reduce_motion {
            reveal.with_reduced_motion()
        } else {
            reveal
        };

        Self {
            screen: Screen::Title,
            theme: Theme::default(),
            journey: None,
            user_name: String::new(),
            input_buffer: String::new(),
            flipped: false,
            selected_choice: None,
            selected_tile: None,
            transition: None,
            reveal,
            pending_load: false,
            pending_send: None,
            status: None,
            load_error: None,
            should_quit: false,
            offline,
        }
    }

    /// Advance cooperative timers.
    pub fn tick(&mut self, dt: Duration) {
        self.reveal.tick(dt);
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Switch screens, re-arming the reveal schedule.
    fn show(&mut self, screen: Screen) {
        self.screen = screen;
        self.reveal.reset();
        self.status = None;
    }

    // ========================================================================
    // Entry flow
    // ========================================================================

    /// Title screen: begin the journey.
    pub fn begin(&mut self) {
        self.input_buffer = self.user_name.clone();
        self.show(Screen::NamePrompt);
    }

    /// Name prompt: confirm the name and request the story load.
    pub fn submit_name(&mut self) -> bool {
        let name = self.input_buffer.trim();
        if name.is_empty() {
            return false;
        }
        self.user_name = name.to_string();
        self.input_buffer.clear();
        self.pending_load = true;
        true
    }

    /// Install freshly fetched story data and land on the entry postcard.
    /// The flow table swap is atomic: a new journey replaces the old one
    /// only once the data is complete.
    pub fn install_story(&mut self, data: StoryData) {
        self.journey = Some(Journey::new(
            &data,
            SessionIdentity::new(self.user_name.clone()),
        ));
        self.load_error = None;
        self.enter_node(ENTRY_NODE);
    }

    /// A fetch failed; keep whatever journey existed and show the error.
    pub fn load_failed(&mut self, error: String) {
        self.load_error = Some(error);
        self.show(Screen::LoadError);
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigate to a node and pick the screen its kind demands.
    pub fn enter_node(&mut self, node: &str) {
        let Some(journey) = &mut self.journey else {
            return;
        };
        journey.navigate_to(node);

        // Per-node state belongs to the screen being left.
        self.flipped = false;
        self.selected_choice = None;
        self.selected_tile = None;
        self.transition = None;

        let screen = match NodeKind::classify(node) {
            NodeKind::WriteBack => Screen::WriteBack,
            NodeKind::Choices => Screen::Choices,
            _ => {
                if journey.current_postcard().is_some() {
                    Screen::Postcard
                } else {
                    Screen::NotFound
                }
            }
        };
        self.show(screen);
    }

    /// "Continue" pressed on a postcard.
    pub fn continue_pressed(&mut self) {
        let Some(journey) = &mut self.journey else {
            return;
        };

        match journey.advance() {
            Advance::Navigate { target } => self.enter_node(&target),
            Advance::Interstitial {
                target,
                title,
                subtitle,
            } => {
                self.transition = Some(TransitionView {
                    target,
                    title,
                    subtitle,
                });
                self.reveal.reset();
            }
            Advance::ReturnHome => self.go_home(),
        }
    }

    /// The interstitial's continue: perform the deferred navigation.
    pub fn transition_done(&mut self) {
        let target = self
            .journey
            .as_mut()
            .and_then(|journey| journey.complete_transition());
        if let Some(target) = target {
            self.enter_node(&target);
        } else {
            self.transition = None;
        }
    }

    /// Back to the title screen; the journey survives for "begin again".
    pub fn go_home(&mut self) {
        self.transition = None;
        self.show(Screen::Title);
    }

    /// Restart the story from the entry postcard.
    pub fn begin_again(&mut self) {
        if self.journey.is_some() {
            self.enter_node(ENTRY_NODE);
        } else {
            self.go_home();
        }
    }

    // ========================================================================
    // Postcard screen
    // ========================================================================

    /// Flip the current postcard. The entry postcard has no back.
    pub fn flip(&mut self) {
        let on_entry = self
            .journey
            .as_ref()
            .map(|j| j.current_node() == ENTRY_NODE)
            .unwrap_or(true);
        if !on_entry {
            self.flipped = !self.flipped;
        }
    }

    // ========================================================================
    // Choice menu
    // ========================================================================

    /// Toggle a choice by menu position (0 or 1).
    pub fn toggle_choice(&mut self, index: usize) {
        let Some(choice) = self
            .journey
            .as_ref()
            .and_then(|j| j.choices())
            .and_then(|choices| choices.get(index))
        else {
            return;
        };

        self.selected_choice = match self.selected_choice {
            Some(selected) if selected == choice.id => None,
            _ => Some(choice.id),
        };
    }

    /// Continue with the selected memory, if the selection is valid.
    pub fn confirm_choice(&mut self) {
        let target = self.selected_choice.and_then(|id| {
            self.journey
                .as_ref()
                .and_then(|j| j.select_choice(id))
                .map(|choice| choice.postcard_id)
        });

        if let Some(target) = target {
            self.enter_node(target);
        }
    }

    // ========================================================================
    // Write-back
    // ========================================================================

    /// Toggle an illustration tile.
    pub fn toggle_tile(&mut self, index: usize) {
        if index >= WRITE_BACK_TILES.len() {
            return;
        }
        self.selected_tile = match self.selected_tile {
            Some(selected) if selected == index => None,
            _ => Some(index),
        };
    }

    /// Open the composer, keeping the chosen illustration.
    pub fn open_composer(&mut self) {
        if self.selected_tile.is_none() {
            return;
        }
        self.input_buffer.clear();
        self.show(Screen::Composer);
    }

    /// Abandon the composer and return to the tiles.
    pub fn cancel_composer(&mut self) {
        self.input_buffer.clear();
        self.show(Screen::WriteBack);
    }

    /// Build the draft and hand it to the main loop for sending.
    pub fn send_postcard(&mut self) {
        let mut draft = PostcardDraft::new(self.input_buffer.clone()).with_to(self.user_name.clone());
        if let Some(tile) = self.selected_tile {
            draft = draft.with_illustration(WRITE_BACK_TILES[tile].1);
        }

        match draft.build() {
            Ok(postcard) => self.pending_send = Some(postcard),
            Err(err) => self.set_status(err.to_string()),
        }
    }

    /// The backend accepted the postcard.
    pub fn postcard_sent(&mut self) {
        self.input_buffer.clear();
        self.show(Screen::Sent);
    }

    /// Sending failed; stay in the composer so nothing is lost.
    pub fn send_failed(&mut self, error: String) {
        self.set_status(format!("Could not send: {error}"));
    }

    // ========================================================================
    // Text input
    // ========================================================================

    pub fn type_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    pub fn newline(&mut self) {
        self.input_buffer.push('\n');
    }
}
