//! Storage representations of domain types.
//!
//! Each DTO is versioned through `version-migrate` so that older files keep
//! loading after the format changes.

mod conversation;
mod template;

pub use conversation::{
    CONVERSATION_ENTITY, CONVERSATION_RECORD_VERSION, ConversationRecordV1, TitleHistoryRecord,
    conversation_from_json, conversation_to_json, create_conversation_migrator,
};
pub use template::{TEMPLATE_ENTITY, TemplateFileV1, create_template_migrator};
