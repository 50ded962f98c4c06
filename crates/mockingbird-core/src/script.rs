//! The embedded demo script.
//!
//! Every canned string the mockup displays lives in one JSON document
//! compiled into the binary: the seeded sample conversations, the assistant
//! reply with its fragment directives, the home screen suggestion cards,
//! and the three tool panel payloads. Nothing is read from disk or the
//! environment at runtime.

use serde::{Deserialize, Serialize};

use crate::conversation::{Conversation, Fragment, Message, Role};
use crate::reveal::RevealDirective;
use crate::tools::{ToolKind, ToolPayloads};

const EMBEDDED_SCRIPT: &str = include_str!("demo_script.json");

/// A suggestion card shown on the home screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub detail: String,
}

/// A seeded message in the demo script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMessage {
    pub role: Role,
    pub text: String,
}

/// A seeded conversation in the demo script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConversation {
    pub title: String,
    pub messages: Vec<SeedMessage>,
}

/// The canned assistant reply: text plus splice directives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyScript {
    pub text: String,
    #[serde(default)]
    pub directives: Vec<ReplyDirective>,
}

/// A splice directive as stored in the script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyDirective {
    /// Character index into the reply text.
    pub offset: usize,
    /// Tool panel tab the button opens.
    pub tool: ToolKind,
    /// Button label.
    pub label: String,
}

/// The full demo script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoScript {
    pub suggestions: Vec<Suggestion>,
    pub conversations: Vec<SeedConversation>,
    pub reply: ReplyScript,
    pub search_text: String,
    pub files: Vec<String>,
    pub terminal_text: String,
}

impl DemoScript {
    /// Decode and validate the embedded script.
    pub fn embedded() -> Result<Self, ScriptError> {
        Self::from_json(EMBEDDED_SCRIPT)
    }

    /// Decode and validate a script from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    /// Serialize the script back to pretty JSON (for the `script` command).
    pub fn to_json(&self) -> Result<String, ScriptError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the seeded conversations for the store.
    pub fn seed_conversations(&self) -> Vec<Conversation> {
        self.conversations
            .iter()
            .map(|seed| {
                let messages = seed
                    .messages
                    .iter()
                    .map(|m| match m.role {
                        Role::User => Message::user(m.text.clone()),
                        Role::Assistant => Message::assistant_text(m.text.clone()),
                    })
                    .collect();
                Conversation::seeded(seed.title.clone(), messages)
            })
            .collect()
    }

    /// Build the reveal directives for the canned reply.
    pub fn reply_directives(&self) -> Vec<RevealDirective> {
        self.reply
            .directives
            .iter()
            .map(|d| RevealDirective::new(d.offset, Fragment::tool_button(d.tool, d.label.clone())))
            .collect()
    }

    /// Build the tool panel payloads.
    pub fn tool_payloads(&self) -> ToolPayloads {
        ToolPayloads {
            search_text: self.search_text.clone(),
            files: self.files.clone(),
            terminal_text: self.terminal_text.clone(),
        }
    }

    fn validate(&self) -> Result<(), ScriptError> {
        if self.reply.text.is_empty() {
            return Err(ScriptError::Invalid("reply text is empty".into()));
        }
        let reply_chars = self.reply.text.chars().count();
        let mut last_offset = 0usize;
        for (i, directive) in self.reply.directives.iter().enumerate() {
            if i > 0 && directive.offset < last_offset {
                return Err(ScriptError::Invalid(format!(
                    "reply directive {i} out of order (offset {} after {last_offset})",
                    directive.offset
                )));
            }
            if directive.offset >= reply_chars {
                return Err(ScriptError::Invalid(format!(
                    "reply directive {i} offset {} past end of text ({reply_chars} chars)",
                    directive.offset
                )));
            }
            last_offset = directive.offset;
        }

        if self.search_text.is_empty() {
            return Err(ScriptError::Invalid("search text is empty".into()));
        }
        if self.terminal_text.is_empty() {
            return Err(ScriptError::Invalid("terminal text is empty".into()));
        }
        if self.files.is_empty() {
            return Err(ScriptError::Invalid("file list is empty".into()));
        }
        Ok(())
    }
}

/// Errors decoding or validating the demo script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// JSON decode error.
    #[error("script parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Structurally valid JSON with inconsistent content.
    #[error("invalid script: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_script_is_valid() {
        let script = DemoScript::embedded().expect("embedded script must decode");
        assert_eq!(script.suggestions.len(), 3);
        assert_eq!(script.conversations.len(), 3);
        assert_eq!(script.reply.directives.len(), 3);
        assert_eq!(script.files.len(), 6);
    }

    #[test]
    fn test_embedded_directives_cover_all_tools() {
        let script = DemoScript::embedded().unwrap();
        let tools: Vec<ToolKind> = script.reply.directives.iter().map(|d| d.tool).collect();
        for kind in ToolKind::ALL {
            assert!(tools.contains(&kind), "missing directive for {kind:?}");
        }
    }

    #[test]
    fn test_seed_conversations_preserve_history() {
        let script = DemoScript::embedded().unwrap();
        let seeds = script.seed_conversations();
        assert_eq!(seeds[0].title, "Code Analysis");
        assert_eq!(seeds[0].messages.len(), 2);
        assert_eq!(seeds[0].messages[0].role, Role::User);
        assert_eq!(seeds[0].messages[1].role, Role::Assistant);
    }

    #[test]
    fn test_reply_directives_match_script_order() {
        let script = DemoScript::embedded().unwrap();
        let directives = script.reply_directives();
        let offsets: Vec<usize> = directives.iter().map(|d| d.offset).collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        assert_eq!(offsets, sorted);
    }

    #[test]
    fn test_to_json_round_trips() {
        let script = DemoScript::embedded().unwrap();
        let json = script.to_json().unwrap();
        let restored = DemoScript::from_json(&json).unwrap();
        assert_eq!(restored.reply.text, script.reply.text);
        assert_eq!(restored.files, script.files);
    }

    #[test]
    fn test_rejects_out_of_order_directives() {
        let json = r#"{
            "suggestions": [],
            "conversations": [],
            "reply": {
                "text": "hello world",
                "directives": [
                    { "offset": 5, "tool": "search", "label": "a" },
                    { "offset": 2, "tool": "files", "label": "b" }
                ]
            },
            "search_text": "s",
            "files": ["f"],
            "terminal_text": "t"
        }"#;
        let err = DemoScript::from_json(json).unwrap_err();
        assert!(matches!(err, ScriptError::Invalid(_)));
    }

    #[test]
    fn test_rejects_offset_past_end() {
        let json = r#"{
            "suggestions": [],
            "conversations": [],
            "reply": {
                "text": "hi",
                "directives": [
                    { "offset": 2, "tool": "search", "label": "a" }
                ]
            },
            "search_text": "s",
            "files": ["f"],
            "terminal_text": "t"
        }"#;
        let err = DemoScript::from_json(json).unwrap_err();
        assert!(matches!(err, ScriptError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = DemoScript::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn test_rejects_empty_payloads() {
        let json = r#"{
            "suggestions": [],
            "conversations": [],
            "reply": { "text": "hi", "directives": [] },
            "search_text": "",
            "files": ["f"],
            "terminal_text": "t"
        }"#;
        let err = DemoScript::from_json(json).unwrap_err();
        assert!(matches!(err, ScriptError::Invalid(_)));
    }
}
