//! Conversation domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant. Older clients call this role `bot`.
    #[serde(alias = "bot")]
    Assistant,
    /// System-generated message.
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

/// Message timestamp as either epoch milliseconds or an ISO 8601 string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

/// A single message in a conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

/// Lifecycle of a conversation's title.
///
/// ```text
/// Initial ──generate──▶ Generated ──improve──▶ Improved ──improve──▶ Improved
///    │                      │                      │
///    └──────────────set_manual_title───────────────┴──▶ Locked
///                                                       │
///                          Generated ◀──clear_manual_lock┘
/// ```
///
/// `message_count` is the number of messages the conversation had when the
/// title was last set. It is `None` for titles imported without that count;
/// such titles are never due for an update by message count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TitleState {
    /// No title has been produced or chosen yet
    #[default]
    Initial,
    /// Title produced from the opening message
    Generated { message_count: Option<usize> },
    /// Title refined from the wider conversation
    Improved { message_count: Option<usize> },
    /// Title chosen by the user; automatic updates are disabled
    Locked { message_count: Option<usize> },
}

impl TitleState {
    pub fn is_locked(&self) -> bool {
        matches!(self, TitleState::Locked { .. })
    }

    /// Message count at the time the title was last set.
    pub fn message_count(&self) -> Option<usize> {
        match self {
            TitleState::Initial => None,
            TitleState::Generated { message_count }
            | TitleState::Improved { message_count }
            | TitleState::Locked { message_count } => *message_count,
        }
    }
}

/// One accepted title in a conversation's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleHistoryEntry {
    pub title: String,
    pub message_count: usize,
    pub timestamp: DateTime<Utc>,
}

/// A conversation as seen by the title engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation identifier
    pub id: String,
    /// Current title, if any
    pub title: Option<String>,
    #[serde(default)]
    pub title_state: TitleState,
    /// Accepted titles, oldest first
    #[serde(default)]
    pub title_history: Vec<TitleHistoryEntry>,
    /// Topics detected when the title was last improved
    #[serde(default)]
    pub last_topics: Vec<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Declared language code, if known
    #[serde(default)]
    pub language: Option<String>,
}

impl Conversation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn user_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.is_user())
    }

    /// All user messages joined by newlines.
    pub fn user_text(&self) -> String {
        self.user_messages()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_title_locked(&self) -> bool {
        self.title_state.is_locked()
    }

    /// Applies an automatically produced title.
    ///
    /// `improved` selects between the `Generated` and `Improved` states.
    /// Returns `false` without touching anything when the title is locked.
    pub fn apply_generated_title(&mut self, title: impl Into<String>, improved: bool) -> bool {
        if self.is_title_locked() {
            return false;
        }
        let message_count = Some(self.message_count());
        self.title_state = if improved {
            TitleState::Improved { message_count }
        } else {
            TitleState::Generated { message_count }
        };
        self.set_title(title.into());
        true
    }

    /// Sets a user-chosen title and locks it against automatic changes.
    pub fn set_manual_title(&mut self, title: impl Into<String>) {
        self.title_state = TitleState::Locked {
            message_count: Some(self.message_count()),
        };
        self.set_title(title.into());
    }

    /// Re-enables automatic title updates after a manual edit.
    pub fn clear_manual_lock(&mut self) {
        if let TitleState::Locked { message_count } = self.title_state {
            self.title_state = TitleState::Generated { message_count };
        }
    }

    fn set_title(&mut self, title: String) {
        let is_repeat = self
            .title_history
            .last()
            .is_some_and(|entry| entry.title == title);
        if !is_repeat {
            self.title_history.push(TitleHistoryEntry {
                title: title.clone(),
                message_count: self.message_count(),
                timestamp: Utc::now(),
            });
        }
        self.title = Some(title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(n: usize) -> Conversation {
        Conversation::new("c1")
            .with_messages((0..n).map(|i| Message::user(format!("m{i}"))).collect())
    }

    #[test]
    fn test_bot_role_alias() {
        let msg: Message = serde_json::from_str(r#"{"role":"bot","content":"hi"}"#).unwrap();
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(serde_json::to_string(&msg.role).unwrap(), r#""assistant""#);
    }

    #[test]
    fn test_timestamp_accepts_number_and_string() {
        let a: Message =
            serde_json::from_str(r#"{"role":"user","content":"a","timestamp":1700000000000}"#)
                .unwrap();
        let b: Message = serde_json::from_str(
            r#"{"role":"user","content":"b","timestamp":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(a.timestamp, Some(Timestamp::Millis(1_700_000_000_000)));
        assert!(matches!(b.timestamp, Some(Timestamp::Text(_))));
    }

    #[test]
    fn test_generated_title_records_history() {
        let mut conv = conversation(2);
        assert!(conv.apply_generated_title("Música", false));
        assert_eq!(conv.title.as_deref(), Some("Música"));
        assert_eq!(conv.title_state, TitleState::Generated { message_count: Some(2) });
        assert_eq!(conv.title_history.len(), 1);
    }

    #[test]
    fn test_history_skips_repeated_title() {
        let mut conv = conversation(2);
        conv.apply_generated_title("Música", false);
        conv.messages.push(Message::user("more"));
        conv.apply_generated_title("Música", true);
        assert_eq!(conv.title_history.len(), 1);
        assert_eq!(conv.title_state, TitleState::Improved { message_count: Some(3) });

        conv.apply_generated_title("Música y cine", true);
        assert_eq!(conv.title_history.len(), 2);
        assert_eq!(conv.title_history.last().unwrap().title, "Música y cine");
    }

    #[test]
    fn test_manual_title_locks_until_cleared() {
        let mut conv = conversation(3);
        conv.set_manual_title("Mi título");
        assert!(conv.is_title_locked());
        assert!(!conv.apply_generated_title("Otro", true));
        assert_eq!(conv.title.as_deref(), Some("Mi título"));

        conv.clear_manual_lock();
        assert_eq!(conv.title_state, TitleState::Generated { message_count: Some(3) });
        assert!(conv.apply_generated_title("Otro", true));
    }

    #[test]
    fn test_user_text_joins_user_messages_only() {
        let conv = Conversation::new("c").with_messages(vec![
            Message::user("uno"),
            Message::assistant("respuesta"),
            Message::user("dos"),
        ]);
        assert_eq!(conv.user_text(), "uno\ndos");
    }
}
