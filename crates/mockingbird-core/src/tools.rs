//! Tool panel replay state machine.
//!
//! The tool panel replays one of three canned content blocks: search
//! results, a file list, or a terminal transcript. Selecting a category
//! resets all three buffers and starts exactly one replay; search and
//! terminal text stream character-by-character while the file list reveals
//! one item per interval. No search, file, or command execution occurs.

use serde::{Deserialize, Serialize};

/// Default cadence for streamed tool text (ticks per character).
pub const TOOL_TEXT_CADENCE: u32 = 1;

/// Default cadence for the file list (ticks per revealed item).
pub const TOOL_ITEM_CADENCE: u32 = 25;

/// Tool panel categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Search,
    Files,
    Terminal,
}

impl ToolKind {
    /// All categories in tab order.
    pub const ALL: [ToolKind; 3] = [ToolKind::Search, ToolKind::Files, ToolKind::Terminal];

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Search => "Search",
            ToolKind::Files => "Files",
            ToolKind::Terminal => "Terminal",
        }
    }

    /// Tab index (0-based, matching the digit key minus one).
    pub fn index(self) -> usize {
        match self {
            ToolKind::Search => 0,
            ToolKind::Files => 1,
            ToolKind::Terminal => 2,
        }
    }

    /// Category for a tab index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Canned payloads the tool panel replays.
#[derive(Debug, Clone)]
pub struct ToolPayloads {
    /// Search tab text, streamed per character.
    pub search_text: String,
    /// File list, revealed per item.
    pub files: Vec<String>,
    /// Terminal tab text, streamed per character.
    pub terminal_text: String,
}

/// Replay state for the tool panel.
///
/// At most one tab has a running replay; the others stay empty until
/// selected. Like the reveal sequencer this is owned, tick-driven state.
#[derive(Debug, Clone)]
pub struct ToolReplay {
    payloads: ToolPayloads,
    active: ToolKind,
    /// Characters of the active text payload (empty for the file list).
    pending: Vec<char>,
    /// Streamed text buffer for the active tab.
    buffer: String,
    /// Number of file list items revealed.
    visible_files: usize,
    text_cadence: u32,
    item_cadence: u32,
    tick: u32,
}

impl ToolReplay {
    /// Create a replay with the search tab active and already streaming.
    pub fn new(payloads: ToolPayloads, text_cadence: u32, item_cadence: u32) -> Self {
        let mut replay = Self {
            payloads,
            active: ToolKind::Search,
            pending: Vec::new(),
            buffer: String::new(),
            visible_files: 0,
            text_cadence: text_cadence.max(1),
            item_cadence: item_cadence.max(1),
            tick: 0,
        };
        replay.select(ToolKind::Search);
        replay
    }

    /// The active category.
    pub fn active(&self) -> ToolKind {
        self.active
    }

    /// Select a category: reset every buffer, then start that replay.
    ///
    /// Re-selecting the active category restarts it from the beginning.
    pub fn select(&mut self, kind: ToolKind) {
        tracing::debug!(tool = kind.label(), "tool replay reset");
        self.buffer.clear();
        self.visible_files = 0;
        self.pending.clear();
        self.tick = 0;
        self.active = kind;

        match kind {
            ToolKind::Search => {
                self.pending = self.payloads.search_text.chars().rev().collect();
            }
            ToolKind::Terminal => {
                self.pending = self.payloads.terminal_text.chars().rev().collect();
            }
            ToolKind::Files => {}
        }
    }

    /// Streamed text for the search tab (empty unless active).
    pub fn search_content(&self) -> &str {
        match self.active {
            ToolKind::Search => &self.buffer,
            _ => "",
        }
    }

    /// Streamed text for the terminal tab (empty unless active).
    pub fn terminal_content(&self) -> &str {
        match self.active {
            ToolKind::Terminal => &self.buffer,
            _ => "",
        }
    }

    /// Revealed file list items (empty unless the files tab is active).
    pub fn visible_files(&self) -> &[String] {
        match self.active {
            ToolKind::Files => &self.payloads.files[..self.visible_files],
            _ => &[],
        }
    }

    /// Whether the active replay has finished.
    pub fn is_done(&self) -> bool {
        match self.active {
            ToolKind::Search | ToolKind::Terminal => self.pending.is_empty(),
            ToolKind::Files => self.visible_files >= self.payloads.files.len(),
        }
    }

    /// Advance one tick. Returns true if anything new was revealed.
    pub fn tick(&mut self) -> bool {
        if self.is_done() {
            return false;
        }

        self.tick += 1;
        let cadence = match self.active {
            ToolKind::Search | ToolKind::Terminal => self.text_cadence,
            ToolKind::Files => self.item_cadence,
        };
        if self.tick < cadence {
            return false;
        }
        self.tick = 0;

        match self.active {
            ToolKind::Search | ToolKind::Terminal => {
                if let Some(ch) = self.pending.pop() {
                    self.buffer.push(ch);
                }
            }
            ToolKind::Files => {
                self.visible_files += 1;
            }
        }
        true
    }

    /// Reveal everything remaining in the active replay at once.
    pub fn skip_to_end(&mut self) {
        match self.active {
            ToolKind::Search | ToolKind::Terminal => {
                while let Some(ch) = self.pending.pop() {
                    self.buffer.push(ch);
                }
            }
            ToolKind::Files => {
                self.visible_files = self.payloads.files.len();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payloads() -> ToolPayloads {
        ToolPayloads {
            search_text: "found: a".to_string(),
            files: vec!["one.rs".to_string(), "two.rs".to_string()],
            terminal_text: "$ ls\nok".to_string(),
        }
    }

    fn drain(replay: &mut ToolReplay) {
        for _ in 0..10_000 {
            if replay.is_done() {
                return;
            }
            replay.tick();
        }
        panic!("replay did not finish");
    }

    #[test]
    fn test_tool_kind_indexing() {
        assert_eq!(ToolKind::from_index(0), Some(ToolKind::Search));
        assert_eq!(ToolKind::from_index(2), Some(ToolKind::Terminal));
        assert_eq!(ToolKind::from_index(3), None);
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_index(kind.index()), Some(kind));
        }
    }

    #[test]
    fn test_search_streams_to_completion() {
        let mut replay = ToolReplay::new(payloads(), 1, 1);
        drain(&mut replay);
        assert_eq!(replay.search_content(), "found: a");
        assert_eq!(replay.terminal_content(), "");
        assert!(replay.visible_files().is_empty());
    }

    #[test]
    fn test_select_resets_all_buffers() {
        let mut replay = ToolReplay::new(payloads(), 1, 1);
        drain(&mut replay);

        replay.select(ToolKind::Files);
        assert_eq!(replay.search_content(), "");
        assert_eq!(replay.terminal_content(), "");
        assert!(replay.visible_files().is_empty());

        drain(&mut replay);
        assert_eq!(replay.visible_files(), ["one.rs", "two.rs"]);
    }

    #[test]
    fn test_files_reveal_per_item_cadence() {
        let mut replay = ToolReplay::new(payloads(), 1, 3);
        replay.select(ToolKind::Files);
        replay.tick();
        replay.tick();
        assert!(replay.visible_files().is_empty());
        replay.tick();
        assert_eq!(replay.visible_files(), ["one.rs"]);
    }

    #[test]
    fn test_terminal_streams_characters() {
        let mut replay = ToolReplay::new(payloads(), 1, 1);
        replay.select(ToolKind::Terminal);
        replay.tick();
        replay.tick();
        assert_eq!(replay.terminal_content(), "$ ");
        drain(&mut replay);
        assert_eq!(replay.terminal_content(), "$ ls\nok");
    }

    #[test]
    fn test_reselect_restarts_replay() {
        let mut replay = ToolReplay::new(payloads(), 1, 1);
        drain(&mut replay);
        assert!(replay.is_done());

        replay.select(ToolKind::Search);
        assert!(!replay.is_done());
        assert_eq!(replay.search_content(), "");
    }

    #[test]
    fn test_skip_to_end() {
        let mut replay = ToolReplay::new(payloads(), 5, 5);
        replay.select(ToolKind::Terminal);
        replay.skip_to_end();
        assert!(replay.is_done());
        assert_eq!(replay.terminal_content(), "$ ls\nok");
    }

    #[test]
    fn test_done_tick_is_inert() {
        let mut replay = ToolReplay::new(payloads(), 1, 1);
        drain(&mut replay);
        assert!(!replay.tick());
        assert_eq!(replay.search_content(), "found: a");
    }
}
