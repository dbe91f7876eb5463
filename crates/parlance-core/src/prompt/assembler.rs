//! System message assembly.

use super::config::{PromptConfig, UserConfig};
use super::placeholders::PlaceholderRenderer;
use super::sections::{conversational_state_directive, language_directive};
use super::similarity::is_very_similar;
use crate::context::{ContextLimits, ContextMap, ContextNormalizer, EnhancedContext};
use crate::conversation::Message;
use crate::error::Result;
use crate::language::{Language, LanguageDetector, LanguageRegistry};
use crate::template::TemplateStore;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Sections of the system message, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PromptSection {
    BaseSystem,
    FormatInstructions,
    Entities,
    Documents,
    Memory,
    ConversationalState,
    Language,
    UserPrompt,
}

/// Builds the message list for a generation request.
///
/// The assembler owns an immutable template snapshot and is safe to share
/// across requests.
pub struct PromptAssembler {
    templates: Arc<TemplateStore>,
    registry: Arc<LanguageRegistry>,
    detector: LanguageDetector,
    normalizer: ContextNormalizer,
    renderer: PlaceholderRenderer,
    config: PromptConfig,
}

impl PromptAssembler {
    pub fn new(
        templates: Arc<TemplateStore>,
        registry: Arc<LanguageRegistry>,
        limits: ContextLimits,
        config: PromptConfig,
    ) -> Self {
        Self {
            templates,
            detector: LanguageDetector::new(registry.clone()),
            registry,
            normalizer: ContextNormalizer::new(limits),
            renderer: PlaceholderRenderer::standard(&config),
            config,
        }
    }

    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    /// Turns a raw context map into `[system, ...history]`.
    ///
    /// Never fails: a context map that cannot be interpreted degrades to the
    /// base system line followed by whatever history can be salvaged.
    pub fn build_prompt(&self, raw_context: &Value, user: &UserConfig) -> Vec<Message> {
        match ContextMap::from_value(raw_context) {
            Ok(context) => {
                let enhanced = self.normalizer.normalize(context);
                self.build_from_context(&enhanced, user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "context map unusable, falling back to bare history");
                self.fallback_prompt(raw_context)
            }
        }
    }

    /// Assembles the prompt from an already normalized context.
    pub fn build_from_context(&self, context: &EnhancedContext, user: &UserConfig) -> Vec<Message> {
        let mut messages = vec![Message::system(self.build_system_message(context, user))];
        messages.extend(self.trim_history(&context.recent_messages));
        messages
    }

    /// Concatenates every section that applies, separated by blank lines.
    ///
    /// A section that fails is logged and left out; the others still render.
    pub fn build_system_message(&self, context: &EnhancedContext, user: &UserConfig) -> String {
        let mut parts = Vec::new();
        for section in PromptSection::iter() {
            match self.render_section(section, context, user) {
                Ok(Some(text)) if !text.trim().is_empty() => parts.push(text),
                Ok(_) => {}
                Err(e) if section == PromptSection::BaseSystem => {
                    tracing::warn!(
                        error = %e,
                        "base system template unavailable, using default persona"
                    );
                    parts.push(self.config.default_persona.clone());
                }
                Err(e) => {
                    tracing::warn!(section = %section, error = %e, "prompt section skipped");
                }
            }
        }
        tracing::debug!(sections = parts.len(), "system message assembled");
        parts.join("\n\n")
    }

    /// The most recent `max_history_messages` messages, oldest first.
    pub fn trim_history(&self, messages: &[Message]) -> Vec<Message> {
        let skip = messages.len().saturating_sub(self.config.max_history_messages);
        messages[skip..].to_vec()
    }

    fn render_section(
        &self,
        section: PromptSection,
        context: &EnhancedContext,
        user: &UserConfig,
    ) -> Result<Option<String>> {
        let names = &self.config.templates;
        match section {
            PromptSection::BaseSystem => self.plain_template(&names.base_system),
            PromptSection::FormatInstructions => self.plain_template(&names.format_instructions),
            PromptSection::Entities if !context.entities.is_empty() => {
                self.filled_template(&names.entity_processing, context)
            }
            PromptSection::Documents if !context.documents.is_empty() => {
                self.filled_template(&names.document_processing, context)
            }
            PromptSection::Memory if !context.memory.is_empty() => {
                self.filled_template(&names.memory_context, context)
            }
            PromptSection::ConversationalState => Ok(context
                .message_structure
                .as_ref()
                .and_then(|s| conversational_state_directive(s, context.sentiment.as_ref()))),
            PromptSection::Language => Ok(self
                .response_language(context, user)
                .filter(|lang| *lang != self.registry.default_language())
                .map(|lang| language_directive(self.registry.profile(lang)))),
            PromptSection::UserPrompt => Ok(self.user_prompt(user)),
            _ => Ok(None),
        }
    }

    fn plain_template(&self, name: &str) -> Result<Option<String>> {
        Ok(Some(self.templates.get(name)?.content.clone()))
    }

    fn filled_template(&self, name: &str, context: &EnhancedContext) -> Result<Option<String>> {
        let template = self.templates.get(name)?;
        Ok(Some(self.renderer.render(&template.content, context)))
    }

    /// Declared language (user, then context) or the one detected in the
    /// current message. Unsupported declared codes yield `None`.
    fn response_language(&self, context: &EnhancedContext, user: &UserConfig) -> Option<Language> {
        let declared = user
            .language
            .as_deref()
            .or(context.language.as_deref())
            .map(str::trim)
            .filter(|code| !code.is_empty());

        match declared {
            Some(code) => {
                let language = Language::from_code(code);
                if language.is_none() {
                    tracing::debug!(code, "unsupported response language, no directive");
                }
                language
            }
            None if context.current_message.trim().is_empty() => None,
            None => Some(self.detector.detect(&context.current_message)),
        }
    }

    fn user_prompt(&self, user: &UserConfig) -> Option<String> {
        let custom = user.system_prompt.as_deref()?.trim();
        if custom.is_empty() {
            return None;
        }
        if is_very_similar(custom, &self.base_line(), self.config.similarity_threshold) {
            tracing::debug!("user system prompt duplicates the base template, skipped");
            return None;
        }
        Some(custom.to_string())
    }

    fn base_line(&self) -> String {
        self.templates
            .get(&self.config.templates.base_system)
            .map(|t| t.content.clone())
            .unwrap_or_else(|_| self.config.default_persona.clone())
    }

    fn fallback_prompt(&self, raw_context: &Value) -> Vec<Message> {
        let history = ContextMap::recent_messages_lenient(raw_context);
        let mut messages = vec![Message::system(self.base_line())];
        messages.extend(self.trim_history(&history));
        messages
    }
}

impl fmt::Debug for PromptAssembler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptAssembler")
            .field("templates", &self.templates.len())
            .field("default_language", &self.registry.default_language())
            .field("renderer", &self.renderer)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::MessageRole;
    use crate::template::{Template, builtin, builtin_templates};
    use serde_json::json;

    fn assembler_with(templates: Vec<Template>) -> PromptAssembler {
        PromptAssembler::new(
            Arc::new(TemplateStore::from_templates(templates)),
            Arc::new(LanguageRegistry::default()),
            ContextLimits::default(),
            PromptConfig::default(),
        )
    }

    fn assembler() -> PromptAssembler {
        assembler_with(builtin_templates())
    }

    fn content_of(name: &str) -> String {
        builtin_templates()
            .into_iter()
            .find(|t| t.name == name)
            .map(|t| t.content)
            .unwrap()
    }

    #[test]
    fn test_minimal_context_has_base_and_format() {
        let messages =
            assembler().build_prompt(&json!({"currentMessage": "Hola"}), &UserConfig::default());

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(
            messages[0].content,
            format!(
                "{}\n\n{}",
                content_of(builtin::BASE_SYSTEM),
                content_of(builtin::FORMAT_INSTRUCTIONS)
            )
        );
    }

    #[test]
    fn test_sections_render_in_order() {
        let raw = json!({
            "currentMessage": "¿Cómo funciona esto?",
            "entities": [{"name": "Rust", "type": "language", "confidence": 0.9}],
            "documents": [
                {"name": "guide.pdf", "summary": "A guide", "keyConcepts": ["ownership"]}
            ],
            "memory": {"shortTerm": [{"userMessage": "Háblame de Rust", "relevance": 0.9}]},
            "messageStructure": {"isQuestion": true, "questionType": "how-to"}
        });
        let system = &assembler().build_prompt(&raw, &UserConfig::default())[0].content;

        let base = system.find("helpful and knowledgeable").unwrap();
        let format = system.find("Markdown").unwrap();
        let entities = system.find("- Rust (language)").unwrap();
        let documents = system.find("- guide.pdf: A guide [Key concepts: ownership]").unwrap();
        let memory = system.find("- User asked about: \"Háblame de Rust\"").unwrap();
        let state = system.find("The user is asking a how-to question.").unwrap();
        assert!(base < format && format < entities && entities < documents);
        assert!(documents < memory && memory < state);
        assert!(!system.contains("Respond in"));
    }

    #[test]
    fn test_missing_entity_template_keeps_other_sections() {
        let templates = builtin_templates()
            .into_iter()
            .filter(|t| t.name != builtin::ENTITY_PROCESSING)
            .collect();
        let raw = json!({
            "currentMessage": "Hola",
            "entities": [{"name": "Rust", "type": "language", "confidence": 0.9}]
        });
        let messages = assembler_with(templates).build_prompt(&raw, &UserConfig::default());
        let system = &messages[0].content;

        assert!(system.starts_with(&content_of(builtin::BASE_SYSTEM)));
        assert!(system.contains(&content_of(builtin::FORMAT_INSTRUCTIONS)));
        assert!(!system.contains("- Rust"));
    }

    #[test]
    fn test_missing_base_template_uses_persona() {
        let messages = assembler_with(Vec::new()).build_prompt(&json!({}), &UserConfig::default());
        assert_eq!(messages[0].content, "You are a helpful assistant.");
    }

    #[test]
    fn test_malformed_context_falls_back_to_history() {
        let mut history: Vec<Value> = (0..12)
            .map(|i| json!({"role": "user", "content": format!("m{i}")}))
            .collect();
        history.push(json!({"role": "bot", "content": "respuesta"}));
        let raw = json!({"entities": "not a list", "recentMessages": history});

        let messages = assembler().build_prompt(&raw, &UserConfig::default());

        assert_eq!(messages.len(), 11);
        assert_eq!(messages[0].content, content_of(builtin::BASE_SYSTEM));
        assert_eq!(messages[1].content, "m3");
        assert_eq!(messages[10].role, MessageRole::Assistant);
        assert_eq!(messages[10].content, "respuesta");
    }

    #[test]
    fn test_non_object_context_falls_back() {
        let messages = assembler().build_prompt(&json!("garbage"), &UserConfig::default());
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::System);
    }

    #[test]
    fn test_history_trimmed_and_bot_normalized() {
        let history: Vec<Value> = (0..15)
            .map(|i| {
                let role = if i % 2 == 0 { "user" } else { "bot" };
                json!({"role": role, "content": format!("m{i}")})
            })
            .collect();
        let raw = json!({"currentMessage": "m14", "recentMessages": history});

        let messages = assembler().build_prompt(&raw, &UserConfig::default());

        assert_eq!(messages.len(), 11);
        assert_eq!(messages[1].content, "m5");
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[10].content, "m14");
    }

    #[test]
    fn test_language_directive_for_non_default_language() {
        let raw = json!({"currentMessage": "What is the best way to learn this?"});
        let system = &assembler().build_prompt(&raw, &UserConfig::default())[0].content;
        assert!(system.contains("Respond in English"));

        let declared = UserConfig {
            language: Some("es".into()),
            ..Default::default()
        };
        let system = &assembler().build_prompt(&raw, &declared)[0].content;
        assert!(!system.contains("Respond in"));

        let unknown = UserConfig {
            language: Some("xx".into()),
            ..Default::default()
        };
        let system = &assembler().build_prompt(&raw, &unknown)[0].content;
        assert!(!system.contains("Respond in"));
    }

    #[test]
    fn test_user_prompt_appended_unless_similar() {
        let custom = UserConfig {
            system_prompt: Some("Always answer like a pirate.".into()),
            ..Default::default()
        };
        let system = &assembler().build_prompt(&json!({}), &custom)[0].content;
        assert!(system.ends_with("Always answer like a pirate."));

        let duplicate = UserConfig {
            system_prompt: Some(content_of(builtin::BASE_SYSTEM).to_uppercase()),
            ..Default::default()
        };
        let system = &assembler().build_prompt(&json!({}), &duplicate)[0].content;
        assert_eq!(system.matches("helpful and knowledgeable").count(), 1);
    }

    #[test]
    fn test_unknown_placeholder_survives() {
        let mut templates = builtin_templates();
        templates.push(Template::new(
            builtin::ENTITY_PROCESSING,
            "Hi {{user_name}}:\n{{entities}}",
        ));
        let raw = json!({"entities": [{"name": "Rust", "type": "", "confidence": 0.9}]});
        let messages = assembler_with(templates).build_prompt(&raw, &UserConfig::default());
        let system = &messages[0].content;
        assert!(system.contains("Hi {{user_name}}:\n- Rust"));
    }
}
