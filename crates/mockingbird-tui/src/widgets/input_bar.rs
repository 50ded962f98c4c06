//! Input bar widget and its editing state.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{IconSet, Theme};

/// Editing state for the input bar: content, cursor, and submit history.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// The text content.
    pub content: String,
    /// Cursor position (character index).
    pub cursor: usize,
    /// Previously submitted inputs for Up/Down recall.
    history: Vec<String>,
    /// Current history index (-1 = editing a new input).
    history_index: isize,
    /// Saved in-progress input while navigating history.
    saved_input: String,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Check if the content is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let byte_idx = self.byte_index();
        self.content.insert(byte_idx, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        let byte_idx = self.byte_index();
        self.content.insert_str(byte_idx, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.byte_index();
            self.content.remove(byte_idx);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.content.chars().count() {
            let byte_idx = self.byte_index();
            self.content.remove(byte_idx);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.content.chars().count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.content.chars().count();
    }

    /// Take the content, recording it in history.
    pub fn submit(&mut self) -> String {
        let content = std::mem::take(&mut self.content);
        self.cursor = 0;
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.history_index = -1;
        self.saved_input.clear();
        content
    }

    /// Recall the previous history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        if self.history_index == -1 {
            self.saved_input = self.content.clone();
        }

        let next = self.history_index + 1;
        #[allow(clippy::cast_sign_loss)]
        if (next as usize) < self.history.len() {
            self.history_index = next;
            #[allow(clippy::cast_sign_loss)]
            {
                self.content = self.history[self.history.len() - 1 - next as usize].clone();
            }
            self.cursor = self.content.chars().count();
        }
    }

    /// Recall the next history entry (toward the in-progress input).
    pub fn history_next(&mut self) {
        if self.history_index <= 0 {
            if self.history_index == 0 {
                self.content = std::mem::take(&mut self.saved_input);
                self.cursor = self.content.chars().count();
            }
            self.history_index = -1;
            return;
        }

        self.history_index -= 1;
        #[allow(clippy::cast_sign_loss)]
        {
            self.content =
                self.history[self.history.len() - 1 - self.history_index as usize].clone();
        }
        self.cursor = self.content.chars().count();
    }

    /// Byte index of the cursor into `content`.
    fn byte_index(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map_or(self.content.len(), |(i, _)| i)
    }
}

/// The input bar rendered at the bottom of the conversation pane.
pub struct InputBar<'a> {
    state: &'a InputState,
    theme: &'a Theme,
    icons: &'a IconSet,
    placeholder: &'a str,
    focused: bool,
    /// Reveal in flight: editing is locked, show the waiting indicator.
    locked: bool,
    /// Tick for the waiting spinner.
    tick: usize,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar.
    pub fn new(state: &'a InputState, theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            state,
            theme,
            icons,
            placeholder: "Send a message...",
            focused: false,
            locked: false,
            tick: 0,
        }
    }

    /// Set the placeholder shown when the input is empty.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set whether the input has focus.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Lock the input while a reveal is in flight.
    #[must_use]
    pub fn locked(mut self, locked: bool, tick: usize) -> Self {
        self.locked = locked;
        self.tick = tick;
        self
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }

        let prompt = "> ";

        if self.locked {
            let line = Line::from(vec![
                Span::styled(prompt, Style::default().fg(self.theme.muted)),
                Span::styled(
                    self.icons.spinner(self.tick),
                    Style::default().fg(self.theme.assistant),
                ),
                Span::styled(
                    " assistant is typing (Esc to skip)",
                    Style::default().fg(self.theme.muted),
                ),
            ]);
            Paragraph::new(vec![line]).render(area, buf);
            return;
        }

        let mut spans = vec![Span::styled(
            prompt,
            Style::default().fg(self.theme.primary),
        )];

        if self.state.is_empty() {
            if self.focused {
                spans.push(Span::styled(
                    self.icons.cursor(),
                    Style::default().fg(self.theme.text),
                ));
            }
            spans.push(Span::styled(
                self.placeholder,
                Style::default().fg(self.theme.muted),
            ));
            Paragraph::new(vec![Line::from(spans)]).render(area, buf);
            return;
        }

        // Content with the cursor spliced in at its character position.
        let text_style = Style::default().fg(self.theme.text);
        let mut cursor_drawn = false;
        let mut run = String::new();
        for (i, ch) in self.state.content().chars().enumerate() {
            if self.focused && i == self.state.cursor {
                spans.push(Span::styled(std::mem::take(&mut run), text_style));
                spans.push(Span::styled("|", Style::default().fg(self.theme.primary)));
                cursor_drawn = true;
            }
            run.push(ch);
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, text_style));
        }
        if self.focused && !cursor_drawn {
            spans.push(Span::styled(
                self.icons.cursor(),
                Style::default().fg(self.theme.text),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut state = InputState::new();
        assert!(state.is_empty());

        state.insert('H');
        state.insert('i');
        assert_eq!(state.content(), "Hi");
        assert_eq!(state.cursor, 2);

        state.backspace();
        assert_eq!(state.content(), "H");

        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn test_cursor_movement_and_mid_insert() {
        let mut state = InputState::new();
        state.insert_str("Hello");

        state.move_left();
        state.move_left();
        assert_eq!(state.cursor, 3);

        state.insert('X');
        assert_eq!(state.content(), "HelXlo");

        state.move_home();
        assert_eq!(state.cursor, 0);
        state.move_end();
        assert_eq!(state.cursor, 6);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut state = InputState::new();
        state.insert_str("héllo");
        assert_eq!(state.cursor, 5);

        state.move_left();
        state.move_left();
        state.move_left();
        state.move_left();
        state.delete();
        assert_eq!(state.content(), "hllo");
    }

    #[test]
    fn test_is_blank() {
        let mut state = InputState::new();
        assert!(state.is_blank());
        state.insert_str("   \t ");
        assert!(state.is_blank());
        assert!(!state.is_empty());
        state.insert('x');
        assert!(!state.is_blank());
    }

    #[test]
    fn test_submit_records_history() {
        let mut state = InputState::new();

        state.insert_str("first");
        assert_eq!(state.submit(), "first");
        assert!(state.is_empty());

        state.insert_str("second");
        state.submit();

        state.history_prev();
        assert_eq!(state.content(), "second");
        state.history_prev();
        assert_eq!(state.content(), "first");
        state.history_next();
        assert_eq!(state.content(), "second");
    }

    #[test]
    fn test_blank_submit_not_recorded() {
        let mut state = InputState::new();
        state.insert_str("   ");
        state.submit();
        state.history_prev();
        assert!(state.is_empty());
    }

    #[test]
    fn test_history_restores_in_progress_input() {
        let mut state = InputState::new();
        state.insert_str("sent");
        state.submit();

        state.insert_str("draft");
        state.history_prev();
        assert_eq!(state.content(), "sent");
        state.history_next();
        assert_eq!(state.content(), "draft");
    }
}
