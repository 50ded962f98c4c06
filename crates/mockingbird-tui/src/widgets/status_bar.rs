//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::text::visual_width;
use crate::theme::Theme;

/// A key hint for the status bar.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Status bar displayed at the bottom of the screen.
#[derive(Debug, Clone)]
pub struct StatusBar<'a> {
    mode: &'a str,
    hints: Vec<KeyHint>,
    right_text: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new(mode: &'a str, theme: &'a Theme) -> Self {
        Self {
            mode,
            hints: Vec::new(),
            right_text: None,
            theme,
        }
    }

    /// Add key hints.
    #[must_use]
    pub fn hints(mut self, hints: Vec<KeyHint>) -> Self {
        self.hints = hints;
        self
    }

    /// Set right-aligned text (notifications).
    #[must_use]
    pub fn right(mut self, text: &'a str) -> Self {
        self.right_text = Some(text);
        self
    }
}

impl Widget for StatusBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        // Fill the bar background
        for x in area.x..area.x.saturating_add(area.width) {
            buf[(x, area.y)].set_char(' ').set_bg(self.theme.surface);
        }

        let mut spans = Vec::new();

        // Mode indicator on an accent background
        spans.push(Span::styled(
            format!(" {} ", self.mode),
            Style::default()
                .fg(self.theme.base)
                .bg(self.theme.primary)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(" ", Style::default().bg(self.theme.surface)));

        for hint in &self.hints {
            spans.push(Span::styled(
                format!(" {} ", hint.key),
                Style::default()
                    .fg(self.theme.text)
                    .bg(self.theme.overlay)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {} ", hint.label),
                Style::default().fg(self.theme.subtext).bg(self.theme.surface),
            ));
        }

        let left_line = Line::from(spans);
        buf.set_line(area.x, area.y, &left_line, area.width);

        if let Some(text) = self.right_text {
            let text_width = visual_width(text) as u16;
            if text_width < area.width {
                let x = area.x + area.width - text_width - 1;
                buf.set_string(
                    x,
                    area.y,
                    text,
                    Style::default().fg(self.theme.warning).bg(self.theme.surface),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(bar: StatusBar<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_mode_and_hints_rendered() {
        let theme = Theme::default();
        let bar = StatusBar::new("Chat", &theme).hints(vec![
            KeyHint::new("?", "Help"),
            KeyHint::new("q", "Quit"),
        ]);
        let out = render_to_string(bar, 40);
        assert!(out.contains("Chat"));
        assert!(out.contains("Help"));
        assert!(out.contains("Quit"));
    }

    #[test]
    fn test_right_text_rendered() {
        let theme = Theme::default();
        let bar = StatusBar::new("Chat", &theme).right("Copied to clipboard");
        let out = render_to_string(bar, 60);
        assert!(out.contains("Copied to clipboard"));
    }

    #[test]
    fn test_zero_height_is_noop() {
        let theme = Theme::default();
        let bar = StatusBar::new("Chat", &theme);
        let area = Rect::new(0, 0, 10, 0);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
    }
}
