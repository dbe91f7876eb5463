//! AsyncDirStorage-based ConversationRepository implementation.

use async_trait::async_trait;
use std::path::Path;
use version_migrate::{AsyncDirStorage, FormatStrategy};

use parlance_core::conversation::{Conversation, ConversationRepository};
use parlance_core::error::{ParlanceError, Result};

use crate::dto::{CONVERSATION_ENTITY, create_conversation_migrator};
use crate::storage::{is_missing, open_dir_storage, validate_id};

const DOMAIN: &str = "conversations";

/// Stores each conversation as a versioned camelCase JSON record.
///
/// Directory structure:
/// ```text
/// base_dir/
/// └── conversations/
///     ├── <conversation-id-1>.json
///     └── <conversation-id-2>.json
/// ```
pub struct AsyncDirConversationRepository {
    storage: AsyncDirStorage,
}

impl AsyncDirConversationRepository {
    /// Opens the conversation directory under `base_dir`, creating it if needed.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let storage = open_dir_storage(
            base_dir.as_ref(),
            DOMAIN,
            create_conversation_migrator()?,
            FormatStrategy::Json,
        )
        .await?;
        Ok(Self { storage })
    }

    /// Directory holding the conversation records.
    pub fn dir(&self) -> &Path {
        self.storage.base_path()
    }
}

#[async_trait]
impl ConversationRepository for AsyncDirConversationRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Conversation>> {
        validate_id("conversation id", id)?;
        match self
            .storage
            .load::<Conversation>(CONVERSATION_ENTITY, id)
            .await
        {
            Ok(conversation) => Ok(Some(conversation)),
            Err(e) if is_missing(&e) => Ok(None),
            Err(e) => Err(ParlanceError::from(e)),
        }
    }

    async fn save(&self, conversation: &Conversation) -> Result<()> {
        validate_id("conversation id", &conversation.id)?;
        self.storage
            .save(CONVERSATION_ENTITY, &conversation.id, conversation)
            .await
            .map_err(|e| {
                ParlanceError::data_access(format!(
                    "Failed to save conversation '{}': {}",
                    conversation.id, e
                ))
            })
    }
}
