//! Conversation store for the chat mockup.
//!
//! A conversation is a titled, ordered list of messages. The store keeps the
//! full list plus a single "active conversation" pointer. A freshly created
//! conversation (from the New Chat action or the home screen) stays out of
//! the list until its first message commits; from then on it is listed like
//! any other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tools::ToolKind;

/// Maximum characters of a derived conversation title.
const TITLE_MAX: usize = 30;

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing into the input bar.
    User,
    /// The simulated assistant.
    Assistant,
}

/// A renderable unit of message content.
///
/// Most messages are a single `Text` fragment; assistant replies may carry
/// interactive `ToolButton` fragments spliced in by the reveal sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Plain text (may span multiple lines).
    Text(String),
    /// An inline button that opens a tool panel tab.
    ToolButton { tool: ToolKind, label: String },
}

impl Fragment {
    /// Create a text fragment.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Create a tool button fragment.
    pub fn tool_button(tool: ToolKind, label: impl Into<String>) -> Self {
        Self::ToolButton {
            tool,
            label: label.into(),
        }
    }
}

/// A single message in a conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Role of the message author.
    pub role: Role,
    /// Ordered content fragments.
    pub fragments: Vec<Fragment>,
    /// When the message was appended.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a user message from plain text.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            fragments: vec![Fragment::text(text)],
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message from already-revealed fragments.
    pub fn assistant(fragments: Vec<Fragment>) -> Self {
        Self {
            role: Role::Assistant,
            fragments,
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message from plain text (used for seeded history).
    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self::assistant(vec![Fragment::text(text)])
    }

    /// Concatenated text content, skipping tool buttons.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for fragment in &self.fragments {
            if let Fragment::Text(t) = fragment {
                out.push_str(t);
            }
        }
        out
    }

    /// First line of the text content (for sidebar previews).
    pub fn preview(&self) -> String {
        self.text().lines().next().unwrap_or("").to_string()
    }
}

/// Opaque conversation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationId(Uuid);

impl ConversationId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A titled, ordered list of messages.
#[derive(Debug, Clone)]
pub struct Conversation {
    /// Unique identifier.
    pub id: ConversationId,
    /// Human-readable title.
    pub title: String,
    /// Messages in insertion order.
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty, untitled conversation.
    pub fn new() -> Self {
        Self {
            id: ConversationId::new(),
            title: "New Chat".to_string(),
            messages: Vec::new(),
        }
    }

    /// Create a seeded conversation with a fixed title and history.
    pub fn seeded(title: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            id: ConversationId::new(),
            title: title.into(),
            messages,
        }
    }

    /// Append a message, deriving the title from the first user message.
    pub fn push(&mut self, message: Message) {
        if self.messages.is_empty() && message.role == Role::User {
            self.title = derive_title(&message.text());
        }
        self.messages.push(message);
    }

    /// Preview of the most recent message (empty string if none).
    pub fn last_preview(&self) -> String {
        self.messages.last().map(Message::preview).unwrap_or_default()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

fn derive_title(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let mut title: String = first_line.chars().take(TITLE_MAX).collect();
    if first_line.chars().count() > TITLE_MAX {
        title.push_str("...");
    }
    if title.is_empty() {
        title.push_str("New Chat");
    }
    title
}

/// In-memory conversation list with an active pointer.
///
/// Invariant: the active conversation is always one of the listed entries
/// (by id), or the single fresh conversation that has not committed a
/// message yet.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    /// Active-but-unlisted conversation, if any.
    fresh: Option<Conversation>,
    /// Id of the active listed conversation (ignored while `fresh` is set).
    active: ConversationId,
}

impl ConversationStore {
    /// Create a store with a single fresh conversation active.
    pub fn new() -> Self {
        let fresh = Conversation::new();
        let active = fresh.id;
        Self {
            conversations: Vec::new(),
            fresh: Some(fresh),
            active,
        }
    }

    /// Create a store from seeded conversations, activating the first.
    ///
    /// Falls back to [`ConversationStore::new`] when the seed is empty.
    pub fn from_seed(seed: Vec<Conversation>) -> Self {
        match seed.first() {
            Some(first) => {
                let active = first.id;
                Self {
                    conversations: seed,
                    fresh: None,
                    active,
                }
            }
            None => Self::new(),
        }
    }

    /// Listed conversations in render order.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Id of the active conversation.
    pub fn active_id(&self) -> ConversationId {
        self.fresh.as_ref().map_or(self.active, |c| c.id)
    }

    /// Whether the active conversation is fresh (not yet listed).
    pub fn is_fresh_active(&self) -> bool {
        self.fresh.is_some()
    }

    /// The active conversation.
    pub fn active(&self) -> &Conversation {
        if let Some(fresh) = &self.fresh {
            return fresh;
        }
        self.conversations
            .iter()
            .find(|c| c.id == self.active)
            .unwrap_or_else(|| unreachable!("active id always resolves to a conversation"))
    }

    fn active_mut(&mut self) -> &mut Conversation {
        if let Some(fresh) = &mut self.fresh {
            return fresh;
        }
        let active = self.active;
        self.conversations
            .iter_mut()
            .find(|c| c.id == active)
            .unwrap_or_else(|| unreachable!("active id always resolves to a conversation"))
    }

    /// Start a fresh conversation and make it active.
    ///
    /// An existing empty fresh conversation is simply replaced.
    pub fn new_chat(&mut self) {
        let fresh = Conversation::new();
        tracing::debug!(id = %fresh.id, "new chat");
        self.active = fresh.id;
        self.fresh = Some(fresh);
    }

    /// Activate a listed conversation by id. Returns false if unknown.
    ///
    /// An uncommitted fresh conversation is discarded on switch.
    pub fn select(&mut self, id: ConversationId) -> bool {
        if self.conversations.iter().any(|c| c.id == id) {
            self.fresh = None;
            self.active = id;
            true
        } else {
            false
        }
    }

    /// Activate a listed conversation by index. Returns false if out of range.
    pub fn select_index(&mut self, index: usize) -> bool {
        match self.conversations.get(index) {
            Some(c) => {
                let id = c.id;
                self.select(id)
            }
            None => false,
        }
    }

    /// Index of the active conversation in the list (None while fresh).
    pub fn active_index(&self) -> Option<usize> {
        if self.fresh.is_some() {
            return None;
        }
        self.conversations.iter().position(|c| c.id == self.active)
    }

    /// Append a user message to the active conversation.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(Message::user(text));
    }

    /// Append an assistant message to the active conversation.
    pub fn push_assistant(&mut self, fragments: Vec<Fragment>) {
        self.push(Message::assistant(fragments));
    }

    /// Append a message; a fresh conversation joins the list on first commit.
    fn push(&mut self, message: Message) {
        self.active_mut().push(message);
        if let Some(fresh) = self.fresh.take() {
            tracing::debug!(id = %fresh.id, title = %fresh.title, "listing fresh conversation");
            self.active = fresh.id;
            self.conversations.push(fresh);
        }
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> ConversationStore {
        ConversationStore::from_seed(vec![
            Conversation::seeded("First", vec![Message::user("hello")]),
            Conversation::seeded("Second", vec![Message::user("hi there")]),
        ])
    }

    #[test]
    fn test_message_text_and_preview() {
        let msg = Message::assistant(vec![
            Fragment::text("Line one\nLine two "),
            Fragment::tool_button(ToolKind::Search, "Search context"),
            Fragment::text("tail"),
        ]);
        assert_eq!(msg.text(), "Line one\nLine two tail");
        assert_eq!(msg.preview(), "Line one");
    }

    #[test]
    fn test_title_derived_from_first_user_message() {
        let mut conv = Conversation::new();
        conv.push(Message::user("Build a markdown to HTML converter please"));
        assert!(conv.title.starts_with("Build a markdown"));
        assert!(conv.title.ends_with("..."));
    }

    #[test]
    fn test_title_not_rederived() {
        let mut conv = Conversation::new();
        conv.push(Message::user("First topic"));
        conv.push(Message::user("Second topic"));
        assert_eq!(conv.title, "First topic");
    }

    #[test]
    fn test_fresh_store_starts_unlisted() {
        let store = ConversationStore::new();
        assert!(store.is_fresh_active());
        assert!(store.conversations().is_empty());
        assert!(store.active().messages.is_empty());
    }

    #[test]
    fn test_fresh_joins_list_on_first_commit() {
        let mut store = ConversationStore::new();
        let fresh_id = store.active_id();

        store.push_user("hello world");

        assert!(!store.is_fresh_active());
        assert_eq!(store.conversations().len(), 1);
        assert_eq!(store.active_id(), fresh_id);
        assert_eq!(store.active().messages.len(), 1);
    }

    #[test]
    fn test_seeded_store_activates_first() {
        let store = seeded_store();
        assert!(!store.is_fresh_active());
        assert_eq!(store.active().title, "First");
        assert_eq!(store.active_index(), Some(0));
    }

    #[test]
    fn test_select_known_and_unknown() {
        let mut store = seeded_store();
        let second = store.conversations()[1].id;
        assert!(store.select(second));
        assert_eq!(store.active().title, "Second");

        let unknown = ConversationId::new();
        assert!(!store.select(unknown));
        assert_eq!(store.active().title, "Second");
    }

    #[test]
    fn test_select_discards_empty_fresh() {
        let mut store = seeded_store();
        store.new_chat();
        assert!(store.is_fresh_active());

        assert!(store.select_index(0));
        assert!(!store.is_fresh_active());
        // The abandoned fresh conversation never reached the list
        assert_eq!(store.conversations().len(), 2);
    }

    #[test]
    fn test_new_chat_then_commit_appends_to_list() {
        let mut store = seeded_store();
        store.new_chat();
        store.push_user("a new topic");
        store.push_assistant(vec![Fragment::text("reply")]);

        assert_eq!(store.conversations().len(), 3);
        assert_eq!(store.active_index(), Some(2));
        assert_eq!(store.active().messages.len(), 2);
        assert_eq!(store.active().title, "a new topic");
    }

    #[test]
    fn test_messages_preserve_order() {
        let mut store = ConversationStore::new();
        store.push_user("one");
        store.push_assistant(vec![Fragment::text("two")]);
        store.push_user("three");

        let roles: Vec<Role> = store.active().messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(store.active().last_preview(), "three");
    }
}
