//! Chat screen - sidebar, transcript with input, and the tool panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::line,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::{App, Focus};
use crate::layout::{chat_columns, main_layout};
use crate::screens::Screen;
use crate::widgets::{InputBar, KeyHint, Sidebar, StatusBar, ToolPanel, Transcript};

/// Height of the input area inside the conversation column.
const INPUT_HEIGHT: u16 = 3;

/// Height of the divider between transcript and input.
const DIVIDER_HEIGHT: u16 = 1;

/// The chat screen.
pub struct ChatScreen;

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (main_area, status_area) = main_layout(area);
        let (sidebar_area, conversation_area, tools_area) =
            chat_columns(main_area, app.sidebar_open, app.tool_panel_open);

        if sidebar_area.width > 0 {
            Sidebar::new(
                app.store.conversations(),
                &app.theme,
                &app.icons,
                &app.borders,
            )
            .active(app.store.active_index())
            .cursor(app.sidebar_index)
            .focused(app.focus == Focus::Sidebar)
            .render(sidebar_area, buf);
        }

        render_conversation_column(app, conversation_area, buf);

        if tools_area.width > 0 {
            ToolPanel::new(&app.tools, &app.theme, &app.icons, &app.borders)
                .focused(app.focus == Focus::Tools)
                .render(tools_area, buf);
        }

        render_status_bar(app, status_area, buf);
    }
}

/// Transcript above a divider, input below, like a chat client.
fn render_conversation_column(app: &App, area: Rect, buf: &mut Buffer) {
    if area.height < INPUT_HEIGHT + DIVIDER_HEIGHT + 3 {
        // Not enough room for the split; the transcript wins.
        render_transcript(app, area, buf);
        return;
    }

    let transcript_height = area.height - INPUT_HEIGHT - DIVIDER_HEIGHT;
    let transcript_area = Rect::new(area.x, area.y, area.width, transcript_height);
    let divider_area = Rect::new(area.x, area.y + transcript_height, area.width, DIVIDER_HEIGHT);
    let input_area = Rect::new(
        area.x,
        area.y + transcript_height + DIVIDER_HEIGHT,
        area.width,
        INPUT_HEIGHT,
    );

    render_transcript(app, transcript_area, buf);
    render_divider(app, divider_area, buf);

    InputBar::new(&app.input, &app.theme, &app.icons)
        .placeholder("Send a message...")
        .focused(app.focus == Focus::Input)
        .locked(app.is_revealing(), app.tick)
        .render(input_area, buf);
}

fn render_transcript(app: &App, area: Rect, buf: &mut Buffer) {
    Transcript::new(app.store.active(), &app.theme, &app.icons, &app.borders)
        .reveal(app.reveal.as_ref().map(|r| r.fragments()))
        .scroll(app.scroll, app.follow)
        .focused(app.focus == Focus::Input)
        .tick(app.tick)
        .render(area, buf);
}

fn render_divider(app: &App, area: Rect, buf: &mut Buffer) {
    if area.width == 0 {
        return;
    }
    let divider = line::HORIZONTAL.repeat(area.width as usize);
    Paragraph::new(vec![Line::from(Span::styled(
        divider,
        Style::default().fg(app.theme.border),
    ))])
    .render(area, buf);
}

fn render_status_bar(app: &App, area: Rect, buf: &mut Buffer) {
    let mut hints = vec![KeyHint::new("Enter", "Send")];
    if app.is_revealing() {
        hints.push(KeyHint::new("Esc", "Skip"));
    } else if app.tool_panel_open {
        hints.push(KeyHint::new("Esc", "Close panel"));
    } else {
        hints.push(KeyHint::new("Esc", "Home"));
    }
    hints.push(KeyHint::new("Tab", "Focus"));
    hints.push(KeyHint::new("^B", "Sidebar"));
    hints.push(KeyHint::new("^T", "Tools"));
    hints.push(KeyHint::new("^N", "New chat"));
    hints.push(KeyHint::new("?", "Help"));

    let mode = match app.focus {
        Focus::Input => "Chat",
        Focus::Sidebar => "Sidebar",
        Focus::Tools => "Tools",
    };

    let mut status_bar = StatusBar::new(mode, &app.theme).hints(hints);
    if let Some(notification) = &app.notification {
        status_bar = status_bar.right(notification);
    }
    status_bar.render(area, buf);
}
