//! Conversation repository trait.

use async_trait::async_trait;

use super::Conversation;
use crate::error::Result;

/// Key-value persistence boundary for conversations.
///
/// Implementations only need to load and store whole conversations by id;
/// callers are responsible for serializing concurrent writes to the same id.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Finds a conversation by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Conversation>>;

    /// Saves (inserts or replaces) a conversation.
    async fn save(&self, conversation: &Conversation) -> Result<()>;
}
