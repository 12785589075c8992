//! Write-back composer widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
};

use crate::ui::theme::Theme;

/// The free-form message editor shown over the write-back screen.
pub struct ComposerWidget<'a> {
    message: &'a str,
    status: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> ComposerWidget<'a> {
    pub fn new(message: &'a str, theme: &'a Theme) -> Self {
        Self {
            message,
            status: None,
            theme,
        }
    }

    pub fn status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }
}

impl Widget for ComposerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Write back ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true))
            .padding(Padding::new(3, 3, 1, 1));

        let mut lines: Vec<Line> = Vec::new();

        if self.message.is_empty() {
            lines.push(Line::from(Span::styled(
                "Write your message...",
                self.theme.hint_style(),
            )));
        } else {
            for text_line in self.message.split('\n') {
                lines.push(Line::from(Span::styled(
                    text_line.to_string(),
                    self.theme.text_style(),
                )));
            }
        }
        // Cursor indicator at the end of the text.
        lines.push(Line::from(Span::styled("▌", self.theme.accent_style())));

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Ctrl+S] Send   [Esc] Cancel",
            self.theme.hint_style(),
        )));

        if let Some(status) = self.status {
            lines.push(Line::from(Span::styled(
                status.to_string(),
                self.theme.accent_style(),
            )));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
