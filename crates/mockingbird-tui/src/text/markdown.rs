//! Markdown rendering using pulldown-cmark.
//!
//! Converts a completed assistant message into styled ratatui Lines.
//! Handles the subset chat replies actually use: headings, emphasis,
//! inline code, code blocks, and bullet/numbered lists.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::theme::Theme;

use super::styles::MarkdownStyles;

/// Render markdown text to styled ratatui Lines.
pub fn render_markdown(input: &str, theme: &Theme) -> Vec<Line<'static>> {
    let parser = Parser::new_ext(input, Options::empty());
    let mut renderer = MarkdownRenderer::new(MarkdownStyles::from_theme(theme));
    renderer.run(parser);
    renderer.lines
}

/// Internal renderer that processes pulldown-cmark events.
struct MarkdownRenderer {
    lines: Vec<Line<'static>>,
    styles: MarkdownStyles,
    /// Stack of active styles for nested formatting.
    style_stack: Vec<Style>,
    current_spans: Vec<Span<'static>>,
    /// Stack of list counters: None for bullets, Some(next number) for
    /// ordered lists.
    list_stack: Vec<Option<u64>>,
    in_code_block: bool,
    /// Pending list marker to prepend to the next text.
    pending_marker: Option<String>,
}

impl MarkdownRenderer {
    fn new(styles: MarkdownStyles) -> Self {
        Self {
            lines: Vec::new(),
            styles,
            style_stack: Vec::new(),
            current_spans: Vec::new(),
            list_stack: Vec::new(),
            in_code_block: false,
            pending_marker: None,
        }
    }

    fn run<'a>(&mut self, parser: impl Iterator<Item = Event<'a>>) {
        for event in parser {
            self.handle_event(event);
        }
        self.flush_line();
    }

    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush_line();
                self.style_stack.push(self.heading_style(level));
            }
            Event::End(TagEnd::Heading(_)) => {
                self.flush_line();
                self.style_stack.pop();
            }

            Event::Start(Tag::Emphasis) => self.style_stack.push(self.styles.emphasis),
            Event::Start(Tag::Strong) => self.style_stack.push(self.styles.strong),
            Event::End(TagEnd::Emphasis | TagEnd::Strong) => {
                self.style_stack.pop();
            }

            Event::Start(Tag::CodeBlock(_)) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                self.flush_line();
                self.in_code_block = false;
            }

            Event::Start(Tag::List(start)) => {
                self.flush_line();
                self.list_stack.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.list_stack.pop();
            }

            Event::Start(Tag::Item) => {
                self.flush_line();
                let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
                let marker = match self.list_stack.last_mut() {
                    Some(Some(number)) => {
                        let marker = format!("{indent}{number}. ");
                        *number += 1;
                        marker
                    }
                    _ => format!("{indent}\u{2022} "),
                };
                self.pending_marker = Some(marker);
            }
            Event::End(TagEnd::Item) => {
                self.flush_line();
                self.pending_marker = None;
            }

            Event::End(TagEnd::Paragraph) => {
                self.flush_line();
                // Blank line between paragraphs
                self.lines.push(Line::from(""));
            }

            Event::Text(text) => self.add_text(&text),

            Event::Code(code) => {
                self.take_marker();
                self.current_spans
                    .push(Span::styled(format!("`{code}`"), self.styles.code));
            }

            Event::SoftBreak => self.add_text(" "),
            Event::HardBreak => self.flush_line(),

            _ => {}
        }
    }

    fn add_text(&mut self, text: &str) {
        if self.in_code_block {
            for line in text.lines() {
                self.current_spans
                    .push(Span::styled(format!("  {line}"), self.styles.code_block));
                self.flush_line();
            }
            return;
        }

        self.take_marker();
        let style = self.current_style();
        self.current_spans.push(Span::styled(text.to_string(), style));
    }

    fn take_marker(&mut self) {
        if let Some(marker) = self.pending_marker.take() {
            self.current_spans
                .push(Span::styled(marker, self.styles.list_marker));
        }
    }

    fn current_style(&self) -> Style {
        let mut style = self.styles.text;
        for s in &self.style_stack {
            style = style.patch(*s);
        }
        style
    }

    fn heading_style(&self, level: HeadingLevel) -> Style {
        match level {
            HeadingLevel::H1 => self.styles.h1,
            HeadingLevel::H2 => self.styles.h2,
            _ => self.styles.h3,
        }
    }

    fn flush_line(&mut self) {
        if !self.current_spans.is_empty() {
            let spans = std::mem::take(&mut self.current_spans);
            self.lines.push(Line::from(spans));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered_text(input: &str) -> Vec<String> {
        render_markdown(input, &Theme::default())
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_render_simple_text() {
        let lines = rendered_text("Hello, world!");
        assert_eq!(lines[0], "Hello, world!");
    }

    #[test]
    fn test_render_heading() {
        let lines = rendered_text("# Title");
        assert_eq!(lines[0], "Title");
    }

    #[test]
    fn test_render_bold_and_italic() {
        let lines = render_markdown("**bold** and *italic*", &Theme::default());
        assert!(!lines.is_empty());
        let styles: Vec<Style> = lines[0].spans.iter().map(|s| s.style).collect();
        assert!(styles.len() >= 3, "bold, plain, italic runs expected");
    }

    #[test]
    fn test_render_inline_code() {
        let lines = rendered_text("Use `cargo` here");
        assert!(lines[0].contains("`cargo`"));
    }

    #[test]
    fn test_render_code_block() {
        let lines = rendered_text("```\nfn main() {}\n```");
        assert!(lines.iter().any(|l| l.contains("fn main() {}")));
    }

    #[test]
    fn test_render_bullet_list() {
        let lines = rendered_text("- first\n- second");
        assert!(lines[0].starts_with('\u{2022}'));
        assert!(lines[0].contains("first"));
        assert!(lines[1].contains("second"));
    }

    #[test]
    fn test_render_numbered_list_counts() {
        let lines = rendered_text("1. alpha\n2. beta\n3. gamma");
        assert!(lines[0].starts_with("1. "));
        assert!(lines[1].starts_with("2. "));
        assert!(lines[2].starts_with("3. "));
    }

    #[test]
    fn test_render_numbered_list_custom_start() {
        let lines = rendered_text("4. four\n5. five");
        assert!(lines[0].starts_with("4. "));
        assert!(lines[1].starts_with("5. "));
    }

    #[test]
    fn test_render_multiple_paragraphs() {
        let lines = rendered_text("First paragraph.\n\nSecond paragraph.");
        assert!(lines.len() >= 3);
        assert!(lines.iter().any(String::is_empty));
    }

    #[test]
    fn test_render_empty() {
        assert!(render_markdown("", &Theme::default()).is_empty());
    }
}
