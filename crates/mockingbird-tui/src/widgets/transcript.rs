//! Transcript widget: the message list plus the in-flight reveal.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use mockingbird_core::{Conversation, Fragment, Message, Role};

use crate::text::{render_markdown, wrap_styled_lines, wrap_text};
use crate::theme::{BorderSet, IconSet, Theme};

/// Indent applied to message content under its header line.
const CONTENT_INDENT: &str = "  ";

/// Transcript pane rendering the active conversation.
///
/// Completed assistant messages render as markdown; the in-flight reveal
/// renders raw with a trailing cursor so the typing animation stays stable
/// while markdown structure is still incomplete.
pub struct Transcript<'a> {
    conversation: &'a Conversation,
    /// Revealed prefix of the reply being typed, if any.
    reveal: Option<&'a [Fragment]>,
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
    scroll: usize,
    follow: bool,
    focused: bool,
    tick: usize,
}

impl<'a> Transcript<'a> {
    /// Create a new transcript widget.
    pub fn new(
        conversation: &'a Conversation,
        theme: &'a Theme,
        icons: &'a IconSet,
        borders: &'a BorderSet,
    ) -> Self {
        Self {
            conversation,
            reveal: None,
            theme,
            icons,
            borders,
            scroll: 0,
            follow: true,
            focused: false,
            tick: 0,
        }
    }

    /// Set the in-flight reveal fragments.
    #[must_use]
    pub fn reveal(mut self, reveal: Option<&'a [Fragment]>) -> Self {
        self.reveal = reveal;
        self
    }

    /// Set scroll state.
    #[must_use]
    pub fn scroll(mut self, scroll: usize, follow: bool) -> Self {
        self.scroll = scroll;
        self.follow = follow;
        self
    }

    /// Set whether the pane has focus.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the animation tick (drives the typing cursor).
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    fn role_color(&self, role: Role) -> ratatui::style::Color {
        match role {
            Role::User => self.theme.user,
            Role::Assistant => self.theme.assistant,
        }
    }

    fn header_line(&self, role: Role, time: &str) -> Line<'static> {
        let (symbol, name) = match role {
            Role::User => (self.icons.user(), "You"),
            Role::Assistant => (self.icons.assistant(), "Assistant"),
        };
        Line::from(vec![
            Span::styled(
                format!("{symbol} {name}"),
                Style::default()
                    .fg(self.role_color(role))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {time}"),
                Style::default().fg(self.theme.muted),
            ),
        ])
    }

    fn tool_button_line(&self, tool: mockingbird_core::ToolKind, label: &str) -> Line<'static> {
        let color = match tool {
            mockingbird_core::ToolKind::Search => self.theme.search,
            mockingbird_core::ToolKind::Files => self.theme.files,
            mockingbird_core::ToolKind::Terminal => self.theme.terminal,
        };
        Line::from(vec![
            Span::raw(CONTENT_INDENT),
            Span::styled(
                format!("[{} {label}]", self.icons.tool(tool)),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ])
    }

    /// Lines for a committed message.
    fn message_lines(&self, message: &Message, width: usize) -> Vec<Line<'static>> {
        let local: DateTime<Local> = message.timestamp.into();
        let time = local.format("%H:%M").to_string();
        let mut lines = vec![self.header_line(message.role, &time)];

        for fragment in &message.fragments {
            match fragment {
                Fragment::Text(text) => match message.role {
                    Role::Assistant => {
                        let rendered = render_markdown(text, self.theme);
                        for line in wrap_styled_lines(rendered, width) {
                            lines.push(indent_line(line));
                        }
                    }
                    Role::User => {
                        for raw_line in text.lines() {
                            for wrapped in wrap_text(raw_line, width) {
                                lines.push(Line::from(vec![
                                    Span::raw(CONTENT_INDENT),
                                    Span::styled(wrapped, Style::default().fg(self.theme.text)),
                                ]));
                            }
                        }
                    }
                },
                Fragment::ToolButton { tool, label } => {
                    lines.push(self.tool_button_line(*tool, label));
                }
            }
        }

        lines.push(Line::from(""));
        lines
    }

    /// Lines for the in-flight reveal (raw text, trailing cursor).
    fn reveal_lines(&self, fragments: &[Fragment], width: usize) -> Vec<Line<'static>> {
        let mut lines = vec![self.header_line(Role::Assistant, self.icons.spinner(self.tick / 8))];

        for fragment in fragments {
            match fragment {
                Fragment::Text(text) => {
                    // `lines()` drops a trailing empty line; split keeps it so
                    // the cursor lands where the next character will.
                    for raw_line in text.split('\n') {
                        if raw_line.is_empty() {
                            lines.push(Line::from(Span::raw(CONTENT_INDENT)));
                            continue;
                        }
                        for wrapped in wrap_text(raw_line, width) {
                            lines.push(Line::from(vec![
                                Span::raw(CONTENT_INDENT),
                                Span::styled(wrapped, Style::default().fg(self.theme.text)),
                            ]));
                        }
                    }
                }
                Fragment::ToolButton { tool, label } => {
                    lines.push(self.tool_button_line(*tool, label));
                }
            }
        }

        // Blinking cursor at the end of the last line.
        if self.tick % 16 < 8 {
            let cursor = Span::styled(
                self.icons.cursor(),
                Style::default().fg(self.theme.assistant),
            );
            if let Some(last) = lines.last_mut() {
                last.spans.push(cursor);
            }
        }

        lines.push(Line::from(""));
        lines
    }
}

fn indent_line(mut line: Line<'static>) -> Line<'static> {
    line.spans.insert(0, Span::raw(CONTENT_INDENT));
    line
}

impl Widget for Transcript<'_> {
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
            .title(format!(" {} ", self.conversation.title))
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_set(border_set)
            .border_style(border_style)
            .style(Style::default().bg(self.theme.base));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 1 || inner.width < 4 {
            return;
        }

        let width = inner.width as usize - CONTENT_INDENT.len();
        let mut lines: Vec<Line<'static>> = Vec::new();

        if self.conversation.messages.is_empty() && self.reveal.is_none() {
            lines.push(Line::from(Span::styled(
                "Send a message to start the conversation.",
                Style::default().fg(self.theme.muted),
            )));
        }

        for message in &self.conversation.messages {
            lines.extend(self.message_lines(message, width));
        }
        if let Some(fragments) = self.reveal {
            lines.extend(self.reveal_lines(fragments, width));
        }

        // Clamp scroll; follow pins to the bottom.
        let visible = inner.height as usize;
        let max_start = lines.len().saturating_sub(visible);
        let start = if self.follow {
            max_start
        } else {
            self.scroll.min(max_start)
        };

        let window: Vec<Line<'static>> =
            lines.into_iter().skip(start).take(visible).collect();
        Paragraph::new(window).render(inner, buf);
    }
}
