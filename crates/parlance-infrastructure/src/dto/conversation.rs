//! Conversation record DTOs and migrator.

use chrono::{DateTime, Utc};
use parlance_core::conversation::{Conversation, Message, TitleHistoryEntry, TitleState};
use parlance_core::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use version_migrate::{FromDomain, IntoDomain, Migrator, Versioned};

/// Entity name the conversation migrator is registered under.
pub const CONVERSATION_ENTITY: &str = "conversation";

/// Schema assumed for records that carry no `version` key.
pub const CONVERSATION_RECORD_VERSION: &str = "1.0.0";

/// Stored title history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleHistoryRecord {
    pub title: String,
    pub message_count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Conversation record V1.0.0, the camelCase shape shared with clients.
///
/// The title lifecycle is flattened into `titleEdited`, `titleImproved` and
/// `titleGeneratedAt` (the message count when the title was set).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct ConversationRecordV1 {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_edited: bool,
    #[serde(default)]
    pub title_improved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_generated_at: Option<usize>,
    #[serde(default)]
    pub title_history: Vec<TitleHistoryRecord>,
    #[serde(default)]
    pub last_topics: Vec<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Records without `titleGeneratedAt` fall back to the last history entry.
/// When neither is present the count stays unknown.
impl IntoDomain<Conversation> for ConversationRecordV1 {
    fn into_domain(self) -> Conversation {
        let message_count = self
            .title_generated_at
            .or_else(|| self.title_history.last().map(|h| h.message_count));
        let title_state = match (&self.title, self.title_edited, self.title_improved) {
            (None, false, _) => TitleState::Initial,
            (_, true, _) => TitleState::Locked { message_count },
            (Some(_), false, true) => TitleState::Improved { message_count },
            (Some(_), false, false) => TitleState::Generated { message_count },
        };

        Conversation {
            id: self.id,
            title: self.title,
            title_state,
            title_history: self
                .title_history
                .into_iter()
                .map(|h| TitleHistoryEntry {
                    title: h.title,
                    message_count: h.message_count,
                    timestamp: h.timestamp,
                })
                .collect(),
            last_topics: self.last_topics,
            messages: self.messages,
            language: self.language,
        }
    }
}

impl FromDomain<Conversation> for ConversationRecordV1 {
    fn from_domain(conversation: Conversation) -> Self {
        ConversationRecordV1 {
            title_edited: conversation.title_state.is_locked(),
            title_improved: matches!(conversation.title_state, TitleState::Improved { .. }),
            title_generated_at: conversation.title_state.message_count(),
            id: conversation.id,
            title: conversation.title,
            title_history: conversation
                .title_history
                .into_iter()
                .map(|h| TitleHistoryRecord {
                    title: h.title,
                    message_count: h.message_count,
                    timestamp: h.timestamp,
                })
                .collect(),
            last_topics: conversation.last_topics,
            messages: conversation.messages,
            language: conversation.language,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for conversation records.
pub fn create_conversation_migrator() -> Result<Migrator> {
    let migrator = version_migrate::migrator!("conversation" => [
        ConversationRecordV1,
        Conversation
    ], save = true)?;
    Ok(migrator)
}

/// Reads a conversation from a JSON record.
///
/// Records written by clients usually carry no `version` key; those are read
/// as the current schema.
pub fn conversation_from_json(migrator: &Migrator, mut value: Value) -> Result<Conversation> {
    if let Some(object) = value.as_object_mut() {
        object
            .entry("version")
            .or_insert_with(|| Value::from(CONVERSATION_RECORD_VERSION));
    }
    Ok(migrator.load_flat_from(CONVERSATION_ENTITY, value)?)
}

/// Serializes a conversation as a versioned JSON record.
pub fn conversation_to_json(migrator: &Migrator, conversation: &Conversation) -> Result<String> {
    Ok(migrator.save_domain_flat(CONVERSATION_ENTITY, conversation)?)
}
