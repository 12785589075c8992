//! Color theme for the terminal experience.
//!
//! Muted paper-and-ink palette echoing the postcard aesthetic: warm paper
//! tones on a dark slate background with a gold accent for selections.

use ratatui::style::{Color, Modifier, Style};

/// Theme colors and styles.
#[derive(Debug, Clone)]
pub struct Theme {
    pub paper: Color,
    pub ink: Color,
    pub accent: Color,
    pub dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            paper: Color::Rgb(237, 232, 222),
            ink: Color::Rgb(64, 64, 64),
            accent: Color::Rgb(233, 179, 97),
            dim: Color::Rgb(140, 136, 128),
        }
    }
}

impl Theme {
    /// Large headings.
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.paper)
            .add_modifier(Modifier::BOLD)
    }

    /// Secondary copy under a heading.
    pub fn subtitle_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    /// Body text.
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.paper)
    }

    /// Selected elements.
    pub fn accent_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hints and footers.
    pub fn hint_style(&self) -> Style {
        Style::default()
            .fg(self.dim)
            .add_modifier(Modifier::DIM)
    }

    /// Card borders; selected cards glow gold.
    pub fn border_style(&self, selected: bool) -> Style {
        if selected {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.dim)
        }
    }
}
