//! Conversation sidebar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use mockingbird_core::Conversation;

use crate::text::truncate_to_width;
use crate::theme::{BorderSet, IconSet, Theme};

/// Sidebar listing the conversations, two lines per entry
/// (title, then a muted preview of the last message).
pub struct Sidebar<'a> {
    conversations: &'a [Conversation],
    /// Index of the active conversation, if it is listed.
    active: Option<usize>,
    /// Sidebar cursor position.
    cursor: usize,
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
    focused: bool,
}

impl<'a> Sidebar<'a> {
    /// Create a new sidebar.
    pub fn new(
        conversations: &'a [Conversation],
        theme: &'a Theme,
        icons: &'a IconSet,
        borders: &'a BorderSet,
    ) -> Self {
        Self {
            conversations,
            active: None,
            cursor: 0,
            theme,
            icons,
            borders,
            focused: false,
        }
    }

    /// Mark the active conversation.
    #[must_use]
    pub fn active(mut self, active: Option<usize>) -> Self {
        self.active = active;
        self
    }

    /// Set the cursor position.
    #[must_use]
    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    /// Set whether the sidebar has focus.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.theme.border_focused)
        } else {
            Style::default().fg(self.theme.border)
        };
        let border_set = if self.focused {
            self.borders.focused()
        } else {
            self.borders.normal()
        };

        let block = Block::default()
            .title(" Conversations ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_set(border_set)
            .border_style(border_style)
            .style(Style::default().bg(self.theme.base));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 1 || inner.width < 2 {
            return;
        }

        let width = inner.width as usize - 1;
        let mut lines: Vec<Line<'_>> = Vec::new();

        if self.conversations.is_empty() {
            lines.push(Line::from(Span::styled(
                " No conversations yet",
                Style::default().fg(self.theme.muted),
            )));
        }

        for (i, conversation) in self.conversations.iter().enumerate() {
            let is_active = self.active == Some(i);
            let is_cursor = self.focused && self.cursor == i;

            let marker = if is_active {
                self.icons.assistant()
            } else {
                self.icons.conversation()
            };
            let mut title_style = Style::default().fg(if is_active {
                self.theme.primary
            } else {
                self.theme.text
            });
            if is_cursor {
                title_style = title_style
                    .bg(self.theme.surface)
                    .add_modifier(Modifier::BOLD);
            }

            let title = truncate_to_width(&conversation.title, width.saturating_sub(2));
            lines.push(Line::from(vec![
                Span::styled(format!("{marker} "), Style::default().fg(self.theme.primary)),
                Span::styled(title, title_style),
            ]));

            let preview = truncate_to_width(&conversation.last_preview(), width.saturating_sub(2));
            let mut preview_style = Style::default().fg(self.theme.muted);
            if is_cursor {
                preview_style = preview_style.bg(self.theme.surface);
            }
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(preview, preview_style),
            ]));
            lines.push(Line::from(""));
        }

        // Keep the cursor in view: three lines per entry.
        let entry_height = 3;
        let visible_entries = (inner.height as usize / entry_height).max(1);
        let first_visible = if self.cursor >= visible_entries {
            self.cursor + 1 - visible_entries
        } else {
            0
        };
        let skip = first_visible * entry_height;

        let visible: Vec<Line<'_>> = lines
            .into_iter()
            .skip(skip)
            .take(inner.height as usize)
            .collect();
        Paragraph::new(visible).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockingbird_core::Message;

    fn sample_conversations() -> Vec<Conversation> {
        vec![
            Conversation::seeded("Code Analysis", vec![Message::user("analyze this")]),
            Conversation::seeded(
                "A very long conversation title that will not fit",
                vec![Message::user("and a very long preview line that overflows")],
            ),
        ]
    }

    fn render_to_string(sidebar: Sidebar<'_>, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        sidebar.render(area, &mut buf);
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_renders_titles_and_previews() {
        let conversations = sample_conversations();
        let theme = Theme::default();
        let icons = IconSet::default();
        let borders = BorderSet::default();

        let sidebar = Sidebar::new(&conversations, &theme, &icons, &borders).active(Some(0));
        let out = render_to_string(sidebar, 30, 12);

        assert!(out.contains("Conversations"));
        assert!(out.contains("Code Analysis"));
        assert!(out.contains("analyze this"));
        // Long lines are truncated with an ellipsis marker
        assert!(out.contains("..."));
    }

    #[test]
    fn test_empty_list_placeholder() {
        let conversations: Vec<Conversation> = Vec::new();
        let theme = Theme::default();
        let icons = IconSet::default();
        let borders = BorderSet::default();

        let sidebar = Sidebar::new(&conversations, &theme, &icons, &borders);
        let out = render_to_string(sidebar, 30, 8);
        assert!(out.contains("No conversations yet"));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let conversations = sample_conversations();
        let theme = Theme::default();
        let icons = IconSet::default();
        let borders = BorderSet::default();

        let sidebar = Sidebar::new(&conversations, &theme, &icons, &borders);
        render_to_string(sidebar, 3, 2);
    }
}
