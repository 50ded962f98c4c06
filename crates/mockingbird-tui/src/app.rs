//! Application state and update logic for the mockingbird TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use mockingbird_core::{
    ConversationStore, DemoScript, RevealSequencer, ScriptError, ToolKind, ToolReplay,
};

use crate::event::Action;
use crate::theme::{BorderSet, IconMode, IconSet, Theme};
use crate::widgets::InputState;

/// Tick rate of the event loop in milliseconds.
pub const TICK_RATE_MS: u64 = 20;

/// Ticks a notification stays visible (~3 seconds at the 20 ms tick rate).
const NOTIFICATION_TICKS: usize = 150;

/// Lines scrolled per page key.
const SCROLL_PAGE: usize = 10;

/// The current screen being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Chat,
}

/// Which pane receives navigation keys on the chat screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Sidebar,
    Tools,
}

/// Animation speed selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    /// Original pacing: tens of milliseconds per character.
    #[default]
    Normal,
    /// Quicker pacing for demos.
    Fast,
    /// No animation; content appears fully revealed.
    Instant,
}

impl Speed {
    /// Ticks per character for chat replies.
    pub fn chat_cadence(self) -> u32 {
        match self {
            Speed::Normal => mockingbird_core::reveal::CHAT_CADENCE,
            Speed::Fast | Speed::Instant => 1,
        }
    }

    /// Ticks per character for streamed tool text.
    pub fn tool_text_cadence(self) -> u32 {
        mockingbird_core::tools::TOOL_TEXT_CADENCE
    }

    /// Ticks per revealed file list item.
    pub fn tool_item_cadence(self) -> u32 {
        match self {
            Speed::Normal => mockingbird_core::tools::TOOL_ITEM_CADENCE,
            Speed::Fast => 5,
            Speed::Instant => 1,
        }
    }

    /// Whether animations are bypassed entirely.
    pub fn is_instant(self) -> bool {
        self == Speed::Instant
    }
}

/// Startup options passed from the CLI.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub theme: Theme,
    pub icon_mode: IconMode,
    pub speed: Speed,
}

/// Application state.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Current screen.
    pub screen: Screen,

    /// Focused pane on the chat screen.
    pub focus: Focus,

    /// Color palette.
    pub theme: Theme,

    /// Icon set (Unicode or ASCII).
    pub icons: IconSet,

    /// Border set (Unicode or ASCII).
    pub borders: BorderSet,

    /// Animation speed.
    pub speed: Speed,

    /// The embedded demo script.
    pub script: DemoScript,

    /// Conversation list and active pointer.
    pub store: ConversationStore,

    /// In-flight reveal of the canned assistant reply, if any.
    pub reveal: Option<RevealSequencer>,

    /// Tool panel replay state.
    pub tools: ToolReplay,

    /// Whether the sidebar is visible.
    pub sidebar_open: bool,

    /// Whether the tool panel is visible.
    pub tool_panel_open: bool,

    /// Sidebar cursor (index into the conversation list).
    pub sidebar_index: usize,

    /// Input bar editing state.
    pub input: InputState,

    /// Transcript scroll offset (clamped during rendering).
    pub scroll: usize,

    /// Whether the transcript follows new content.
    pub follow: bool,

    /// Tick counter for animations.
    pub tick: usize,

    /// Notification message shown in the status bar.
    pub notification: Option<String>,

    /// Ticks remaining until the notification clears.
    notification_ttl: usize,
}

impl App {
    /// Create a new app from the embedded demo script.
    pub fn new(options: Options) -> Result<Self, ScriptError> {
        let script = DemoScript::embedded()?;
        Ok(Self::with_script(script, options))
    }

    /// Create an app from an already-loaded script.
    pub fn with_script(script: DemoScript, options: Options) -> Self {
        let store = ConversationStore::from_seed(script.seed_conversations());
        let tools = ToolReplay::new(
            script.tool_payloads(),
            options.speed.tool_text_cadence(),
            options.speed.tool_item_cadence(),
        );
        Self {
            should_quit: false,
            show_help: false,
            screen: Screen::Home,
            focus: Focus::Input,
            theme: options.theme,
            icons: IconSet::new(options.icon_mode),
            borders: BorderSet::new(options.icon_mode),
            speed: options.speed,
            script,
            store,
            reveal: None,
            tools,
            sidebar_open: true,
            tool_panel_open: false,
            sidebar_index: 0,
            input: InputState::new(),
            scroll: 0,
            follow: true,
            tick: 0,
            notification: None,
            notification_ttl: 0,
        }
    }

    /// Create an app for tests (embedded script, default options).
    pub fn new_for_test() -> Self {
        Self::new(Options::default()).expect("embedded script must load")
    }

    /// Whether a reveal is in flight.
    pub fn is_revealing(&self) -> bool {
        self.reveal.is_some()
    }

    // === Input routing ===

    /// Handle a key while the input bar (or home input) has focus.
    ///
    /// Returns true if the key was consumed; otherwise the caller converts
    /// it to an [`Action`]. Control-modified keys, Esc, and Tab always fall
    /// through so global bindings keep working.
    pub fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        if matches!(key.code, KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab) {
            return false;
        }

        // Editing is locked while the assistant is "typing".
        if self.screen == Screen::Chat && self.is_revealing() {
            return true;
        }

        match key.code {
            KeyCode::Enter => {
                if !self.input.is_blank() {
                    let content = self.input.submit();
                    match self.screen {
                        Screen::Home => self.start_chat_with(content),
                        Screen::Chat => self.submit_message(content),
                    }
                } else {
                    // Ignored per the empty-submission rule; keep the draft.
                }
                true
            }
            KeyCode::Char(c) => {
                self.input.insert(c);
                true
            }
            KeyCode::Backspace => {
                self.input.backspace();
                true
            }
            KeyCode::Delete => {
                self.input.delete();
                true
            }
            KeyCode::Left => {
                self.input.move_left();
                true
            }
            KeyCode::Right => {
                self.input.move_right();
                true
            }
            KeyCode::Home => {
                self.input.move_home();
                true
            }
            KeyCode::End => {
                self.input.move_end();
                true
            }
            KeyCode::Up => {
                // History recall on an empty input; otherwise scroll.
                if self.input.is_empty() {
                    self.input.history_prev();
                    true
                } else {
                    false
                }
            }
            KeyCode::Down => {
                if self.input.is_empty() {
                    self.input.history_next();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    // === Actions ===

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // While help is showing, any key closes it.
        if self.show_help {
            self.show_help = false;
            return;
        }

        match self.screen {
            Screen::Home => self.handle_home_action(action),
            Screen::Chat => self.handle_chat_action(action),
        }
    }

    fn handle_home_action(&mut self, action: Action) {
        match action {
            Action::Back => {
                self.should_quit = true;
            }
            Action::NewChat => {
                // Jump straight into an empty chat.
                self.store.new_chat();
                self.enter_chat();
            }
            _ => {}
        }
    }

    #[allow(clippy::too_many_lines)]
    fn handle_chat_action(&mut self, action: Action) {
        match action {
            Action::Back => {
                if self.is_revealing() {
                    // Esc skips the typing animation.
                    self.finish_reveal_now();
                } else if self.tool_panel_open {
                    self.close_tools();
                } else {
                    self.screen = Screen::Home;
                    self.focus = Focus::Input;
                }
            }
            Action::Select => match self.focus {
                Focus::Sidebar => self.select_sidebar_conversation(),
                Focus::Tools => {
                    // Enter restarts the active replay.
                    let active = self.tools.active();
                    self.select_tool(active);
                }
                Focus::Input => {}
            },
            Action::Up => match self.focus {
                Focus::Sidebar => {
                    self.sidebar_index = self.sidebar_index.saturating_sub(1);
                }
                Focus::Input | Focus::Tools => self.scroll_up(1),
            },
            Action::Down => match self.focus {
                Focus::Sidebar => {
                    let last = self.store.conversations().len().saturating_sub(1);
                    if self.sidebar_index < last {
                        self.sidebar_index += 1;
                    }
                }
                Focus::Input | Focus::Tools => self.scroll_down(1),
            },
            Action::PageUp => self.scroll_up(SCROLL_PAGE),
            Action::PageDown => self.scroll_down(SCROLL_PAGE),
            Action::Left => {
                if self.focus == Focus::Tools {
                    self.cycle_tool(-1);
                }
            }
            Action::Right => {
                if self.focus == Focus::Tools {
                    self.cycle_tool(1);
                }
            }
            Action::NextFocus => self.cycle_focus(true),
            Action::PrevFocus => self.cycle_focus(false),
            Action::NewChat => {
                self.finish_reveal_now();
                self.store.new_chat();
                self.focus = Focus::Input;
                self.scroll = 0;
                self.follow = true;
            }
            Action::ToggleSidebar => self.toggle_sidebar(),
            Action::ToggleTools => {
                if self.tool_panel_open {
                    self.close_tools();
                } else {
                    let active = self.tools.active();
                    self.select_tool(active);
                    self.focus = Focus::Tools;
                }
            }
            Action::ToggleFollow => {
                self.follow = !self.follow;
            }
            Action::Tool(index) => {
                if let Some(kind) = ToolKind::from_index(index) {
                    self.select_tool(kind);
                }
            }
            Action::CopyLast => self.copy_last_message(),
            Action::Quit | Action::Help | Action::None => {}
        }
    }

    // === Chat flow ===

    /// Leave the home screen for the chat screen and submit the first message.
    fn start_chat_with(&mut self, initial: String) {
        self.store.new_chat();
        self.enter_chat();
        self.submit_message(initial);
    }

    fn enter_chat(&mut self) {
        self.screen = Screen::Chat;
        self.focus = Focus::Input;
        self.scroll = 0;
        self.follow = true;
    }

    /// Append a user message and start revealing the canned reply.
    ///
    /// Blank submissions are ignored (the only input validation there is).
    pub fn submit_message(&mut self, text: String) {
        if text.trim().is_empty() {
            return;
        }

        // A queued reveal never overlaps a running one.
        self.finish_reveal_now();

        self.store.push_user(text);
        self.follow = true;

        let sequencer = RevealSequencer::new(
            &self.script.reply.text,
            self.script.reply_directives(),
            self.speed.chat_cadence(),
        );
        if self.speed.is_instant() {
            self.store.push_assistant(sequencer.into_fragments());
        } else {
            self.reveal = Some(sequencer);
        }
    }

    /// Finish an in-flight reveal immediately and commit its message.
    pub fn finish_reveal_now(&mut self) {
        if let Some(sequencer) = self.reveal.take() {
            self.store.push_assistant(sequencer.into_fragments());
            self.follow = true;
        }
    }

    fn select_sidebar_conversation(&mut self) {
        // The reveal belongs to the conversation being left; commit it first.
        self.finish_reveal_now();
        if self.store.select_index(self.sidebar_index) {
            self.scroll = 0;
            self.follow = true;
        }
    }

    // === Tool panel ===

    /// Select a tool tab: resets all replay buffers and opens the panel.
    pub fn select_tool(&mut self, kind: ToolKind) {
        self.tools.select(kind);
        if self.speed.is_instant() {
            self.tools.skip_to_end();
        }
        self.tool_panel_open = true;
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn cycle_tool(&mut self, direction: isize) {
        let count = ToolKind::ALL.len() as isize;
        let current = self.tools.active().index() as isize;
        let next = ((current + direction).rem_euclid(count)) as usize;
        if let Some(kind) = ToolKind::from_index(next) {
            self.select_tool(kind);
        }
    }

    fn close_tools(&mut self) {
        self.tool_panel_open = false;
        if self.focus == Focus::Tools {
            self.focus = Focus::Input;
        }
    }

    // === Layout toggles ===

    fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
        if self.sidebar_open {
            self.sidebar_index = self.store.active_index().unwrap_or(0);
        } else if self.focus == Focus::Sidebar {
            self.focus = Focus::Input;
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let mut order = vec![Focus::Input];
        if self.sidebar_open {
            order.push(Focus::Sidebar);
        }
        if self.tool_panel_open {
            order.push(Focus::Tools);
        }

        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.focus = order[next];

        if self.focus == Focus::Sidebar {
            self.sidebar_index = self.store.active_index().unwrap_or(0);
        }
    }

    // === Scrolling ===

    fn scroll_up(&mut self, amount: usize) {
        if self.follow {
            // Leave follow mode from the bottom of the transcript.
            self.follow = false;
            self.scroll = self.estimated_transcript_lines();
        }
        self.scroll = self.scroll.saturating_sub(amount);
    }

    fn scroll_down(&mut self, amount: usize) {
        // Rendering clamps precisely; this bound just stops runaway growth.
        let max = self.estimated_transcript_lines();
        self.scroll = (self.scroll + amount).min(max);
    }

    /// Rough upper bound of transcript lines (rendering clamps precisely).
    fn estimated_transcript_lines(&self) -> usize {
        let conversation = self.store.active();
        let mut lines = 0;
        for message in &conversation.messages {
            lines += message.text().lines().count() + message.fragments.len() + 2;
        }
        if let Some(reveal) = &self.reveal {
            lines += reveal.fragments().len() + 4;
        }
        lines
    }

    // === Clipboard ===

    fn copy_last_message(&mut self) {
        let Some(message) = self.store.active().messages.last() else {
            self.set_notification("Nothing to copy".to_string());
            return;
        };
        let text = message.text();

        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => self.set_notification("Copied to clipboard".to_string()),
            Err(e) => self.set_notification(format!("Copy failed: {e}")),
        }
    }

    // === Ticking ===

    /// Advance one tick: animations, reveal commit, notification expiry.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }

        let reveal_done = match &mut self.reveal {
            Some(reveal) => {
                reveal.tick();
                reveal.is_done()
            }
            None => false,
        };
        if reveal_done {
            self.finish_reveal_now();
        }

        if self.tool_panel_open {
            self.tools.tick();
        }
    }

    /// Set a transient notification message.
    fn set_notification(&mut self, msg: String) {
        self.notification = Some(msg);
        self.notification_ttl = NOTIFICATION_TICKS;
    }
}
