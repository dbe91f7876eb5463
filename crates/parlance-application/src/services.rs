//! Wiring of the use-case services.

use crate::{PromptService, TitleService};
use parlance_core::analysis::FrequencyTable;
use parlance_core::config::ParlanceConfig;
use parlance_core::conversation::ConversationRepository;
use parlance_core::error::Result;
use parlance_core::language::{LanguageDetector, LanguageRegistry};
use parlance_core::template::TemplateRepository;
use parlance_core::title::TitleComposer;
use parlance_infrastructure::{
    AsyncDirConversationRepository, AsyncDirTemplateRepository, InMemoryConversationRepository,
    InMemoryTemplateRepository, ParlancePaths,
};
use std::sync::Arc;

/// Every service sharing one language registry and configuration.
pub struct ParlanceServices {
    pub config: ParlanceConfig,
    pub registry: Arc<LanguageRegistry>,
    pub prompts: PromptService,
    pub titles: TitleService,
}

impl ParlanceServices {
    /// Builds the services over arbitrary repositories.
    pub async fn with_repositories(
        config: ParlanceConfig,
        templates: &dyn TemplateRepository,
        conversations: Arc<dyn ConversationRepository>,
    ) -> Self {
        let registry = Arc::new(LanguageRegistry::builtin(config.default_language));
        let prompts = PromptService::load(templates, registry.clone(), &config).await;
        let composer = TitleComposer::new(
            registry.clone(),
            Arc::new(FrequencyTable::builtin()),
            config.title.clone(),
        );
        Self {
            titles: TitleService::new(conversations, composer),
            prompts,
            registry,
            config,
        }
    }

    /// Services backed by the template and conversation directories under
    /// `paths`. Missing built-in templates are seeded first.
    ///
    /// # Errors
    ///
    /// Returns an error when the directories cannot be created or seeded.
    pub async fn open(paths: &ParlancePaths, config: ParlanceConfig) -> Result<Self> {
        let templates = AsyncDirTemplateRepository::new(paths.base_dir()).await?;
        templates.seed_builtin().await?;
        let conversations = AsyncDirConversationRepository::new(paths.base_dir()).await?;
        Ok(Self::with_repositories(config, &templates, Arc::new(conversations)).await)
    }

    /// Services over built-in templates and an empty in-memory store.
    pub async fn in_memory(config: ParlanceConfig) -> Self {
        Self::with_repositories(
            config,
            &InMemoryTemplateRepository::with_builtin(),
            Arc::new(InMemoryConversationRepository::new()),
        )
        .await
    }

    pub fn detector(&self) -> LanguageDetector {
        LanguageDetector::new(self.registry.clone())
    }
}
