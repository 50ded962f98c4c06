//! Style configuration for markdown rendering.

use ratatui::style::{Modifier, Style};

use crate::theme::Theme;

/// Styles applied to rendered markdown elements.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownStyles {
    pub text: Style,
    pub strong: Style,
    pub emphasis: Style,
    pub code: Style,
    pub code_block: Style,
    pub list_marker: Style,
    pub h1: Style,
    pub h2: Style,
    pub h3: Style,
}

impl MarkdownStyles {
    /// Build markdown styles from the theme palette.
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            text: Style::default().fg(theme.text),
            strong: Style::default().add_modifier(Modifier::BOLD),
            emphasis: Style::default().add_modifier(Modifier::ITALIC),
            code: Style::default().fg(theme.secondary).bg(theme.surface),
            code_block: Style::default().fg(theme.subtext).bg(theme.surface),
            list_marker: Style::default().fg(theme.primary),
            h1: Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
            h2: Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::BOLD),
            h3: Style::default().add_modifier(Modifier::BOLD),
        }
    }
}
