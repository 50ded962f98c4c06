//! Screen definitions for the mockingbird TUI.

pub mod chat;
pub mod home;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::app::App;
use crate::layout::centered_fixed;

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the help overlay.
pub fn render_help_overlay(app: &App, area: Rect, buf: &mut Buffer) {
    let help_text = r"
  Chat
    Enter             Send message
    Esc               Skip typing / close panel / back
    Tab / Shift+Tab   Cycle focused pane
    Ctrl+B            Toggle sidebar
    Ctrl+T            Toggle tool panel
    Ctrl+N            New chat
    Ctrl+Y            Copy last message

  Sidebar / Tools
    j/k or Up/Down    Move / scroll
    Enter             Select conversation / restart replay
    1 2 3             Tool tabs
    q                 Quit

  [Press any key to close]
";

    let width = 52.min(area.width.saturating_sub(4));
    let height = 20.min(area.height.saturating_sub(4));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(app.theme.primary))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_focused))
        .style(Style::default().bg(app.theme.base).fg(app.theme.text));

    Paragraph::new(help_text).block(block).render(overlay_area, buf);
}
