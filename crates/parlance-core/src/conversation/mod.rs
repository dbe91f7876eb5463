//! Conversation domain module.
//!
//! - `model`: messages, the [`Conversation`] aggregate and its [`TitleState`]
//! - `repository`: persistence boundary for conversations
//! - `search`: snippet lookup over a message list

mod model;
mod repository;
mod search;

pub use model::{Conversation, Message, MessageRole, Timestamp, TitleHistoryEntry, TitleState};
pub use repository::ConversationRepository;
pub use search::{Snippet, find_snippet, find_snippets};
