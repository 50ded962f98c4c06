//! Tool panel widget: tab bar plus the active canned replay.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use mockingbird_core::{ToolKind, ToolReplay};

use crate::theme::{BorderSet, IconSet, Theme};

/// Tool panel showing one of three canned replays.
pub struct ToolPanel<'a> {
    replay: &'a ToolReplay,
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
    focused: bool,
}

impl<'a> ToolPanel<'a> {
    /// Create a new tool panel.
    pub fn new(
        replay: &'a ToolReplay,
        theme: &'a Theme,
        icons: &'a IconSet,
        borders: &'a BorderSet,
    ) -> Self {
        Self {
            replay,
            theme,
            icons,
            borders,
            focused: false,
        }
    }

    /// Set whether the panel has focus.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn tool_color(&self, kind: ToolKind) -> ratatui::style::Color {
        match kind {
            ToolKind::Search => self.theme.search,
            ToolKind::Files => self.theme.files,
            ToolKind::Terminal => self.theme.terminal,
        }
    }

    /// Tab bar with digit hints, the active tab highlighted.
    fn tab_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, kind) in ToolKind::ALL.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", Style::default().fg(self.theme.muted)));
            }
            let selected = kind == self.replay.active();
            let number_style = if selected {
                Style::default()
                    .fg(self.tool_color(kind))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted)
            };
            spans.push(Span::styled(format!("[{}] ", i + 1), number_style));
            let title_style = if selected {
                Style::default()
                    .fg(self.tool_color(kind))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.subtext)
            };
            spans.push(Span::styled(kind.label().to_string(), title_style));
        }
        Line::from(spans)
    }

    fn body_lines(&self) -> Vec<Line<'static>> {
        match self.replay.active() {
            ToolKind::Search => self
                .replay
                .search_content()
                .split('\n')
                .map(|line| {
                    Line::from(Span::styled(
                        line.to_string(),
                        Style::default().fg(self.theme.text),
                    ))
                })
                .collect(),
            ToolKind::Files => self
                .replay
                .visible_files()
                .iter()
                .map(|file| {
                    Line::from(vec![
                        Span::styled(
                            format!("{} ", self.icons.tool(ToolKind::Files)),
                            Style::default().fg(self.theme.files),
                        ),
                        Span::styled(file.clone(), Style::default().fg(self.theme.text)),
                    ])
                })
                .collect(),
            ToolKind::Terminal => self
                .replay
                .terminal_content()
                .split('\n')
                .map(|line| {
                    // Command lines stand out from their output.
                    let style = if line.starts_with('$') {
                        Style::default()
                            .fg(self.theme.terminal)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(self.theme.success)
                    };
                    Line::from(Span::styled(line.to_string(), style.bg(self.theme.overlay)))
                })
                .collect(),
        }
    }
}

impl Widget for ToolPanel<'_> {
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
            .title(" Tools ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_set(border_set)
            .border_style(border_style)
            .style(Style::default().bg(self.theme.base));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 || inner.width < 2 {
            return;
        }

        // Tab bar on the first line, body below a one-line gap.
        buf.set_line(inner.x, inner.y, &self.tab_line(), inner.width);

        let body_area = Rect::new(
            inner.x,
            inner.y + 2,
            inner.width,
            inner.height.saturating_sub(2),
        );
        let visible = body_area.height as usize;
        let lines = self.body_lines();
        // Tail the content once it overflows, like a real pane would.
        let start = lines.len().saturating_sub(visible);
        let window: Vec<Line<'static>> = lines.into_iter().skip(start).take(visible).collect();
        Paragraph::new(window).render(body_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockingbird_core::ToolPayloads;

    fn replay() -> ToolReplay {
        ToolReplay::new(
            ToolPayloads {
                search_text: "Found results:\n1. Alpha\n2. Beta".to_string(),
                files: vec!["src/main.rs".to_string(), "src/lib.rs".to_string()],
                terminal_text: "$ cargo check\nFinished".to_string(),
            },
            1,
            1,
        )
    }

    fn render_to_string(panel: ToolPanel<'_>, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);
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
    fn test_tab_bar_lists_all_tools() {
        let replay = replay();
        let (theme, icons, borders) = (Theme::default(), IconSet::default(), BorderSet::default());
        let out = render_to_string(ToolPanel::new(&replay, &theme, &icons, &borders), 44, 12);
        assert!(out.contains("[1] Search"));
        assert!(out.contains("[2] Files"));
        assert!(out.contains("[3] Terminal"));
    }

    #[test]
    fn test_search_body_streams() {
        let mut replay = replay();
        replay.skip_to_end();
        let (theme, icons, borders) = (Theme::default(), IconSet::default(), BorderSet::default());
        let out = render_to_string(ToolPanel::new(&replay, &theme, &icons, &borders), 44, 12);
        assert!(out.contains("Found results:"));
        assert!(out.contains("1. Alpha"));
    }

    #[test]
    fn test_files_body_lists_revealed_items() {
        let mut replay = replay();
        replay.select(ToolKind::Files);
        replay.tick();
        let (theme, icons, borders) = (Theme::default(), IconSet::default(), BorderSet::default());
        let out = render_to_string(ToolPanel::new(&replay, &theme, &icons, &borders), 44, 12);
        assert!(out.contains("src/main.rs"));
        assert!(!out.contains("src/lib.rs"));
    }

    #[test]
    fn test_terminal_body() {
        let mut replay = replay();
        replay.select(ToolKind::Terminal);
        replay.skip_to_end();
        let (theme, icons, borders) = (Theme::default(), IconSet::default(), BorderSet::default());
        let out = render_to_string(ToolPanel::new(&replay, &theme, &icons, &borders), 44, 12);
        assert!(out.contains("$ cargo check"));
        assert!(out.contains("Finished"));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let replay = replay();
        let (theme, icons, borders) = (Theme::default(), IconSet::default(), BorderSet::default());
        render_to_string(ToolPanel::new(&replay, &theme, &icons, &borders), 3, 2);
    }
}
