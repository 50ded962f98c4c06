//! Icon sets with Unicode and ASCII fallback.

use mockingbird_core::ToolKind;

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Standard Unicode symbols (default).
    #[default]
    Unicode,
    /// ASCII-only fallback for maximum compatibility.
    Ascii,
}

/// Icon set based on configured mode.
#[derive(Debug, Clone)]
pub struct IconSet {
    mode: IconMode,
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new(IconMode::default())
    }
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    // === Speaker symbols ===

    pub fn user(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{203a}", // ›
            IconMode::Ascii => ">",
        }
    }

    pub fn assistant(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{25cf}", // ●
            IconMode::Ascii => "*",
        }
    }

    // === Sidebar ===

    pub fn conversation(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{2022}", // •
            IconMode::Ascii => "-",
        }
    }

    // === Tool panel ===

    pub fn tool(&self, kind: ToolKind) -> &'static str {
        match (kind, self.mode) {
            (ToolKind::Search, IconMode::Unicode) => "\u{2315}", // ⌕
            (ToolKind::Search, IconMode::Ascii) => "/",
            (ToolKind::Files, IconMode::Unicode) => "\u{25a4}", // ▤
            (ToolKind::Files, IconMode::Ascii) => "=",
            (ToolKind::Terminal, IconMode::Unicode) => "\u{276f}", // ❯
            (ToolKind::Terminal, IconMode::Ascii) => "$",
        }
    }

    // === Typing animation ===

    /// Cursor block shown at the end of an in-flight reveal.
    pub fn cursor(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{258c}", // ▌
            IconMode::Ascii => "_",
        }
    }

    /// Spinner frame for the given tick.
    pub fn spinner(&self, tick: usize) -> &'static str {
        const UNICODE: [&str; 4] = ["\u{280b}", "\u{2819}", "\u{2838}", "\u{2834}"];
        const ASCII: [&str; 4] = ["|", "/", "-", "\\"];
        match self.mode {
            IconMode::Unicode => UNICODE[tick % UNICODE.len()],
            IconMode::Ascii => ASCII[tick % ASCII.len()],
        }
    }
}
