//! Full-screen transition interstitial.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use crate::ui::theme::Theme;

/// The pause between two nodes: a title, a line of copy, and a continue
/// affordance that fade in one after another.
pub struct TransitionWidget<'a> {
    title: &'a str,
    subtitle: &'a str,
    theme: &'a Theme,
    show_title: bool,
    show_subtitle: bool,
    show_continue: bool,
}

impl<'a> TransitionWidget<'a> {
    pub fn new(title: &'a str, subtitle: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            subtitle,
            theme,
            show_title: true,
            show_subtitle: true,
            show_continue: true,
        }
    }

    pub fn stages(mut self, title: bool, subtitle: bool, show_continue: bool) -> Self {
        self.show_title = title;
        self.show_subtitle = subtitle;
        self.show_continue = show_continue;
        self
    }
}

impl Widget for TransitionWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // The interstitial replaces whatever screen was underneath.
        Clear.render(area, buf);

        let mut lines = vec![Line::from(""); (area.height as usize / 2).saturating_sub(2)];

        if self.show_title {
            lines.push(Line::from(Span::styled(
                self.title.to_string(),
                self.theme.title_style(),
            )));
        } else {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(""));

        if self.show_subtitle {
            lines.push(Line::from(Span::styled(
                self.subtitle.to_string(),
                self.theme.subtitle_style(),
            )));
        } else {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(""));

        if self.show_continue {
            lines.push(Line::from(Span::styled(
                "[Enter] Continue",
                self.theme.hint_style(),
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
