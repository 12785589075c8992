//! Top-level render dispatch.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
    Frame,
};

use crate::app::{App, RevealStage, Screen, WRITE_BACK_TILES};
use crate::ui::widgets::{ChoiceMenuWidget, ComposerWidget, PostcardWidget, TransitionWidget};

/// Render the current frame.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    match app.screen {
        Screen::Title => render_title(f, app, area),
        Screen::NamePrompt => render_name_prompt(f, app, area),
        Screen::Postcard => render_postcard(f, app, area),
        Screen::Choices => render_choices(f, app, area),
        Screen::WriteBack => render_write_back(f, app, area),
        Screen::Composer => render_composer(f, app, area),
        Screen::Sent => render_sent(f, app, area),
        Screen::NotFound => render_not_found(f, app, area),
        Screen::LoadError => render_load_error(f, app, area),
    }

    // A pending interstitial covers whatever was underneath.
    if let Some(transition) = &app.transition {
        TransitionWidget::new(&transition.title, &transition.subtitle, &app.theme)
            .stages(
                app.reveal.is_visible(RevealStage::Title),
                app.reveal.is_visible(RevealStage::Subtitle),
                app.reveal.is_visible(RevealStage::Controls),
            )
            .render(area, f.buffer_mut());
    }
}

/// Center a fixed-size box within an area.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// A staged line: shown only once its reveal stage is visible.
fn staged<'a>(app: &App, stage: RevealStage, line: Line<'a>) -> Line<'a> {
    if app.reveal.is_visible(stage) {
        line
    } else {
        Line::from("")
    }
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(""),
        staged(
            app,
            RevealStage::Title,
            Line::from(Span::styled(
                "P O S T C A R D S   F R O M   N O W H E R E",
                app.theme.title_style(),
            )),
        ),
        Line::from(""),
        staged(
            app,
            RevealStage::Subtitle,
            Line::from(Span::styled(
                "A journey through letters and memories",
                app.theme.subtitle_style(),
            )),
        ),
        Line::from(""),
        Line::from(""),
        staged(
            app,
            RevealStage::Controls,
            Line::from(Span::styled(
                "[Enter] Begin your journey    [q] Leave",
                app.theme.hint_style(),
            )),
        ),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(centered(area, area.width, 10), f.buffer_mut());
}

fn render_name_prompt(f: &mut Frame, app: &App, area: Rect) {
    let modal = centered(area, 60.min(area.width), 9);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true))
        .padding(Padding::new(2, 2, 1, 0));

    let name_line = if app.input_buffer.is_empty() {
        Line::from(Span::styled("Write your name", app.theme.hint_style()))
    } else {
        Line::from(vec![
            Span::styled(app.input_buffer.clone(), app.theme.text_style()),
            Span::styled("▌", app.theme.accent_style()),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            "Who are the postcards addressed to?",
            app.theme.title_style(),
        )),
        Line::from(Span::styled(
            "The postcards will remember this name",
            app.theme.subtitle_style(),
        )),
        Line::from(""),
        name_line,
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Start    [Esc] Back",
            app.theme.hint_style(),
        )),
    ];

    Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .render(modal, f.buffer_mut());
}

fn render_postcard(f: &mut Frame, app: &App, area: Rect) {
    let Some(journey) = &app.journey else {
        return;
    };
    let Some(postcard) = journey.current_postcard() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(centered(area, 76.min(area.width), area.height));

    let on_entry = journey.current_node() == postcards_core::ENTRY_NODE;
    PostcardWidget::new(postcard, &app.theme)
        .user_name(&journey.identity().user_name)
        .flipped(app.flipped)
        .show_flip_hint(!on_entry)
        .render(rows[0], f.buffer_mut());

    let hint = if on_entry {
        "[Enter] Continue    [h] Home    [q] Leave"
    } else {
        "[Enter] Continue    [f] Flip    [h] Home    [q] Leave"
    };
    Paragraph::new(Line::from(Span::styled(hint, app.theme.hint_style())))
        .alignment(Alignment::Center)
        .render(rows[1], f.buffer_mut());
}

fn render_choices(f: &mut Frame, app: &App, area: Rect) {
    let Some(journey) = &app.journey else {
        return;
    };
    let Some(choices) = journey.choices() else {
        return;
    };
    let (title, subtitle) = journey.choice_menu_copy().unwrap_or_default();

    ChoiceMenuWidget::new(&title, &subtitle, choices, &app.theme)
        .selected(app.selected_choice)
        .render(centered(area, 84.min(area.width), area.height), f.buffer_mut());
}

fn render_write_back(f: &mut Frame, app: &App, area: Rect) {
    let content = centered(area, 84.min(area.width), area.height);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(content);

    let heading = vec![
        staged(
            app,
            RevealStage::Title,
            Line::from(Span::styled(
                "If you ever find yourself here again, write back",
                app.theme.title_style(),
            )),
        ),
        Line::from(""),
        staged(
            app,
            RevealStage::Subtitle,
            Line::from(Span::styled(
                "The postcards have finished speaking — now it's your turn.",
                app.theme.subtitle_style(),
            )),
        ),
    ];
    Paragraph::new(heading)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .render(rows[0], f.buffer_mut());

    if app.reveal.is_visible(RevealStage::Body) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(rows[1]);

        for (index, (label, _asset)) in WRITE_BACK_TILES.iter().copied().enumerate() {
            let is_selected = app.selected_tile == Some(index);
            let block = Block::default()
                .title(format!(" [{}] ", index + 1))
                .borders(Borders::ALL)
                .border_style(app.theme.border_style(is_selected));

            let style = if is_selected {
                app.theme.accent_style()
            } else {
                app.theme.text_style()
            };

            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("[ illustration ]", app.theme.hint_style())),
                Line::from(""),
                Line::from(Span::styled(label, style)),
            ])
            .block(block)
            .alignment(Alignment::Center)
            .render(columns[index], f.buffer_mut());
        }
    }

    let hint = if app.selected_tile.is_some() {
        "[w] Write back    [b] Begin again    [q] Leave"
    } else {
        "Pick an illustration with 1-3    [b] Begin again    [q] Leave"
    };
    Paragraph::new(staged(
        app,
        RevealStage::Controls,
        Line::from(Span::styled(hint, app.theme.hint_style())),
    ))
    .alignment(Alignment::Center)
    .render(rows[2], f.buffer_mut());
}

fn render_composer(f: &mut Frame, app: &App, area: Rect) {
    ComposerWidget::new(&app.input_buffer, &app.theme)
        .status(app.status.as_deref())
        .render(centered(area, 72.min(area.width), 16), f.buffer_mut());
}

fn render_sent(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        staged(
            app,
            RevealStage::Title,
            Line::from(Span::styled("Your postcard is on its way", app.theme.title_style())),
        ),
        Line::from(""),
        staged(
            app,
            RevealStage::Subtitle,
            Line::from(Span::styled(
                "Someone, somewhere, will find it at the end of their journey.",
                app.theme.subtitle_style(),
            )),
        ),
        Line::from(""),
        staged(
            app,
            RevealStage::Controls,
            Line::from(Span::styled(
                "[Enter] Begin again    [q] Leave",
                app.theme.hint_style(),
            )),
        ),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(centered(area, area.width, 8), f.buffer_mut());
}

fn render_not_found(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("Postcard not found", app.theme.title_style())),
        Line::from(""),
        Line::from(Span::styled(
            "This address doesn't exist — not even in Nowhere.",
            app.theme.subtitle_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Home    [q] Leave",
            app.theme.hint_style(),
        )),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(centered(area, area.width, 8), f.buffer_mut());
}

fn render_load_error(f: &mut Frame, app: &App, area: Rect) {
    let error = app.load_error.as_deref().unwrap_or("Something went wrong");

    let lines = vec![
        Line::from(Span::styled(
            "The postcards couldn't be delivered",
            app.theme.title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(error.to_string(), app.theme.subtitle_style())),
        Line::from(""),
        Line::from(Span::styled(
            "[r] Try again    [Enter] Home    [q] Leave",
            app.theme.hint_style(),
        )),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .render(centered(area, area.width, 9), f.buffer_mut());
}
