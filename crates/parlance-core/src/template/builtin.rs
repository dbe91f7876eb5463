//! Templates shipped with Parlance.
//!
//! These are seeded into a fresh template directory and used by tests; a
//! deployment is free to override any of them.

use super::Template;

pub const BASE_SYSTEM: &str = "base_system";
pub const FORMAT_INSTRUCTIONS: &str = "format_instructions";
pub const ENTITY_PROCESSING: &str = "entity_processing";
pub const DOCUMENT_PROCESSING: &str = "document_processing";
pub const MEMORY_CONTEXT: &str = "memory_context";

/// Returns the built-in templates.
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template::new(
            BASE_SYSTEM,
            "You are a helpful and knowledgeable assistant. Answer accurately, say so when \
             you are unsure, and use the context below when it is relevant.",
        ),
        Template::new(
            FORMAT_INSTRUCTIONS,
            "Format answers in Markdown when it improves readability. Prefer short \
             paragraphs and use lists for sequential steps.",
        ),
        Template::new(
            ENTITY_PROCESSING,
            "The conversation mentions these entities:\n{{entities}}\n\
             Use them to keep your answer specific.",
        ),
        Template::new(
            DOCUMENT_PROCESSING,
            "The user has shared these documents:\n{{documents}}\n\
             Refer to them when they help answer the question.",
        ),
        Template::new(
            MEMORY_CONTEXT,
            "Relevant earlier exchanges with this user:\n{{memory_items}}\n\
             Keep your answer consistent with them.",
        ),
    ]
}
