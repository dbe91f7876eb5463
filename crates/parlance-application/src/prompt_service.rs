//! Prompt assembly use case.

use parlance_core::config::ParlanceConfig;
use parlance_core::conversation::Message;
use parlance_core::language::LanguageRegistry;
use parlance_core::prompt::{PromptAssembler, UserConfig};
use parlance_core::template::{TemplateRepository, TemplateStore};
use serde_json::Value;
use std::sync::Arc;

/// Builds prompts from a template snapshot taken once at construction.
#[derive(Debug)]
pub struct PromptService {
    assembler: PromptAssembler,
}

impl PromptService {
    /// Reads the configured templates from `repository` and prepares the
    /// assembler. Templates that cannot be read are logged and their
    /// sections skipped.
    pub async fn load(
        repository: &dyn TemplateRepository,
        registry: Arc<LanguageRegistry>,
        config: &ParlanceConfig,
    ) -> Self {
        let names = config.prompt.templates.all();
        let store = TemplateStore::load(repository, &names).await;
        if !store.contains(&config.prompt.templates.base_system) {
            tracing::warn!(
                template = %config.prompt.templates.base_system,
                "base system template missing, prompts will use the default persona"
            );
        }
        Self {
            assembler: PromptAssembler::new(
                Arc::new(store),
                registry,
                config.context.clone(),
                config.prompt.clone(),
            ),
        }
    }

    /// `[system, ...history]` for a raw context map. Never fails.
    pub fn build_prompt(&self, context: &Value, user: &UserConfig) -> Vec<Message> {
        self.assembler.build_prompt(context, user)
    }

    pub fn assembler(&self) -> &PromptAssembler {
        &self.assembler
    }
}
