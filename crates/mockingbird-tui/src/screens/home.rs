//! Home screen - product card, message input, and suggestion cards.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::App;
use crate::layout::{centered_rect, main_layout};
use crate::screens::Screen;
use crate::text::wrap_text;
use crate::widgets::{InputBar, KeyHint, StatusBar};

/// The home screen.
pub struct HomeScreen;

impl Screen for HomeScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (main_area, status_area) = main_layout(area);

        render_home_content(app, main_area, buf);

        let hints = vec![
            KeyHint::new("Enter", "Start chat"),
            KeyHint::new("Esc", "Quit"),
        ];
        let mut status_bar = StatusBar::new("Home", &app.theme).hints(hints);
        if let Some(notification) = &app.notification {
            status_bar = status_bar.right(notification);
        }
        status_bar.render(status_area, buf);
    }
}

fn render_home_content(app: &App, area: Rect, buf: &mut Buffer) {
    let content_area = centered_rect(70, 80, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // banner
            Constraint::Length(3), // input
            Constraint::Length(1), // gap
            Constraint::Min(6),    // suggestion cards
        ])
        .split(content_area);

    render_banner(app, rows[0], buf);
    render_input(app, rows[1], buf);
    render_suggestions(app, rows[3], buf);
}

fn render_banner(app: &App, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled(
            "mockingbird",
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Your AI assistant for getting things done",
            Style::default().fg(app.theme.subtext),
        )),
        Line::from(Span::styled(
            "(a canned demo: every reply is scripted)",
            Style::default().fg(app.theme.muted),
        )),
    ];
    Paragraph::new(lines)
        .centered()
        .render(area, buf);
}

fn render_input(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(app.borders.focused())
        .border_style(Style::default().fg(app.theme.border_focused))
        .style(Style::default().bg(app.theme.base));
    let inner = block.inner(area);
    block.render(area, buf);

    InputBar::new(&app.input, &app.theme, &app.icons)
        .placeholder("Send a message...")
        .focused(true)
        .render(inner, buf);
}

fn render_suggestions(app: &App, area: Rect, buf: &mut Buffer) {
    if app.script.suggestions.is_empty() {
        return;
    }

    #[allow(clippy::cast_possible_truncation)]
    let count = app.script.suggestions.len() as u32;
    let constraints: Vec<Constraint> =
        (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (suggestion, column) in app.script.suggestions.iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(app.borders.normal())
            .border_style(Style::default().fg(app.theme.border))
            .style(Style::default().bg(app.theme.base));
        let inner = block.inner(*column);
        block.render(*column, buf);

        if inner.width < 4 || inner.height < 2 {
            continue;
        }

        let mut lines = vec![
            Line::from(Span::styled(
                suggestion.title.clone(),
                Style::default()
                    .fg(app.theme.secondary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for wrapped in wrap_text(&suggestion.detail, inner.width as usize) {
            lines.push(Line::from(Span::styled(
                wrapped,
                Style::default().fg(app.theme.subtext),
            )));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}
