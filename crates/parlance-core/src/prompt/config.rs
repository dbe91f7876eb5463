use crate::template::builtin;
use serde::{Deserialize, Serialize};

/// Names of the templates each section reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateNames {
    pub base_system: String,
    pub format_instructions: String,
    pub entity_processing: String,
    pub document_processing: String,
    pub memory_context: String,
}

impl Default for TemplateNames {
    fn default() -> Self {
        Self {
            base_system: builtin::BASE_SYSTEM.to_string(),
            format_instructions: builtin::FORMAT_INSTRUCTIONS.to_string(),
            entity_processing: builtin::ENTITY_PROCESSING.to_string(),
            document_processing: builtin::DOCUMENT_PROCESSING.to_string(),
            memory_context: builtin::MEMORY_CONTEXT.to_string(),
        }
    }
}

impl TemplateNames {
    /// Every configured name, in section order.
    pub fn all(&self) -> [&str; 5] {
        [
            self.base_system.as_str(),
            self.format_instructions.as_str(),
            self.entity_processing.as_str(),
            self.document_processing.as_str(),
            self.memory_context.as_str(),
        ]
    }
}

/// Prompt assembly settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Most recent history messages appended after the system message
    pub max_history_messages: usize,
    /// Characters of a remembered user message quoted in the memory section
    pub memory_excerpt_chars: usize,
    /// Entities listed per memory item
    pub memory_entities_shown: usize,
    /// Key concepts listed per document
    pub document_concepts_shown: usize,
    /// Word-overlap ratio above which a user system prompt is a duplicate
    pub similarity_threshold: f64,
    /// System line used when the base template is unavailable
    pub default_persona: String,
    pub templates: TemplateNames,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_history_messages: 10,
            memory_excerpt_chars: 100,
            memory_entities_shown: 3,
            document_concepts_shown: 5,
            similarity_threshold: 0.7,
            default_persona: "You are a helpful assistant.".to_string(),
            templates: TemplateNames::default(),
        }
    }
}

/// Per-request settings supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserConfig {
    /// Custom system prompt configured by the user
    pub system_prompt: Option<String>,
    /// Preferred response language code
    pub language: Option<String>,
}
