//! Two-branch choice menu widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
};

use postcards_core::Choice;

use crate::ui::theme::Theme;

/// A chapter's choice menu: heading plus two selectable memory cards.
pub struct ChoiceMenuWidget<'a> {
    title: &'a str,
    subtitle: &'a str,
    choices: &'a [Choice],
    selected: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> ChoiceMenuWidget<'a> {
    pub fn new(title: &'a str, subtitle: &'a str, choices: &'a [Choice], theme: &'a Theme) -> Self {
        Self {
            title,
            subtitle,
            choices,
            selected: None,
            theme,
        }
    }

    pub fn selected(mut self, selected: Option<&'a str>) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for ChoiceMenuWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(8),
                Constraint::Length(2),
            ])
            .split(area);

        let heading = vec![
            Line::from(Span::styled(self.title.to_string(), self.theme.title_style())),
            Line::from(Span::styled(
                self.subtitle.to_string(),
                self.theme.subtitle_style(),
            )),
        ];
        Paragraph::new(heading)
            .alignment(Alignment::Center)
            .render(rows[0], buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        for (index, choice) in self.choices.iter().take(2).enumerate() {
            let is_selected = self.selected == Some(choice.id);

            let block = Block::default()
                .title(format!(" [{}] ", index + 1))
                .borders(Borders::ALL)
                .border_style(self.theme.border_style(is_selected))
                .padding(Padding::new(2, 2, 1, 1));

            let title_style = if is_selected {
                self.theme.accent_style()
            } else {
                self.theme.text_style()
            };

            let lines = vec![
                Line::from(""),
                Line::from(Span::styled("[ illustration ]", self.theme.hint_style())),
                Line::from(""),
                Line::from(Span::styled(choice.title, title_style)),
                Line::from(Span::styled(choice.subtitle, self.theme.subtitle_style())),
            ];

            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false })
                .render(columns[index], buf);
        }

        let hint = if self.selected.is_some() {
            "[Enter] Continue with this memory"
        } else {
            "Pick a memory with 1 or 2"
        };
        Paragraph::new(Line::from(Span::styled(hint, self.theme.hint_style())))
            .alignment(Alignment::Center)
            .render(rows[2], buf);
    }
}
