//! Context-to-prompt assembly.
//!
//! [`PromptAssembler`] turns a raw context map into the role-tagged message
//! list sent to the model: one system message built from optional sections,
//! followed by the trimmed conversation history.

mod assembler;
mod config;
mod placeholders;
mod sections;
mod similarity;

pub use assembler::{PromptAssembler, PromptSection};
pub use config::{PromptConfig, TemplateNames, UserConfig};
pub use placeholders::PlaceholderRenderer;
pub use sections::{document_line, entity_line, memory_line};
pub use similarity::is_very_similar;
