//! Flippable postcard widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
};

use postcards_api::Postcard;

use crate::ui::theme::Theme;

/// A postcard card, front or back.
pub struct PostcardWidget<'a> {
    postcard: &'a Postcard,
    user_name: &'a str,
    theme: &'a Theme,
    flipped: bool,
    show_flip_hint: bool,
}

impl<'a> PostcardWidget<'a> {
    pub fn new(postcard: &'a Postcard, theme: &'a Theme) -> Self {
        Self {
            postcard,
            user_name: "",
            theme,
            flipped: false,
            show_flip_hint: true,
        }
    }

    pub fn user_name(mut self, user_name: &'a str) -> Self {
        self.user_name = user_name;
        self
    }

    pub fn flipped(mut self, flipped: bool) -> Self {
        self.flipped = flipped;
        self
    }

    pub fn show_flip_hint(mut self, show: bool) -> Self {
        self.show_flip_hint = show;
        self
    }

    fn front_lines(&self) -> Vec<Line<'a>> {
        let mut lines = vec![Line::from("")];

        for paragraph in self.postcard.message.split('\n') {
            lines.push(Line::from(Span::styled(
                paragraph.to_string(),
                self.theme.text_style(),
            )));
        }

        lines
    }

    fn back_lines(&self) -> Vec<Line<'a>> {
        let to = if self.user_name.is_empty() {
            "you".to_string()
        } else {
            self.user_name.to_string()
        };
        let from = if self.postcard.from.is_empty() {
            "Nowhere"
        } else {
            &self.postcard.from
        };

        vec![
            Line::from(""),
            Line::from(Span::styled(format!("To: {to}"), self.theme.text_style())),
            Line::from(""),
            Line::from(Span::styled(
                match &self.postcard.illustration {
                    Some(illustration) => format!("[ illustration: {illustration} ]"),
                    None => "[ illustration ]".to_string(),
                },
                self.theme.hint_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("From: {from}"),
                self.theme.subtitle_style(),
            )),
        ]
    }
}

impl Widget for PostcardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let postmark = if self.postcard.postmarked.is_empty() {
            self.postcard.slug_id.clone()
        } else {
            self.postcard.postmarked.clone()
        };

        let side = if self.flipped { "back" } else { "front" };
        let mut title = format!(" {postmark} · {side} ");
        if self.show_flip_hint {
            title.push_str("[f to flip] ");
        }

        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false))
            .padding(Padding::new(4, 4, 1, 1));

        let lines = if self.flipped {
            self.back_lines()
        } else {
            self.front_lines()
        };

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
