//! In-memory repositories for tests, demos and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use parlance_core::conversation::{Conversation, ConversationRepository};
use parlance_core::error::Result;
use parlance_core::template::{Template, TemplateRepository, builtin_templates};

/// Templates held in a map.
#[derive(Debug, Default)]
pub struct InMemoryTemplateRepository {
    templates: RwLock<HashMap<String, Template>>,
}

impl InMemoryTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with the built-in templates.
    pub fn with_builtin() -> Self {
        Self::from_templates(builtin_templates())
    }

    pub fn from_templates(templates: impl IntoIterator<Item = Template>) -> Self {
        Self {
            templates: RwLock::new(
                templates
                    .into_iter()
                    .map(|t| (t.name.clone(), t))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn list_templates(&self) -> Result<Vec<Template>> {
        let mut templates: Vec<Template> = self.templates.read().await.values().cloned().collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    async fn get_template(&self, name: &str) -> Result<Option<Template>> {
        Ok(self.templates.read().await.get(name).cloned())
    }

    async fn save_template(&self, template: Template) -> Result<()> {
        self.templates
            .write()
            .await
            .insert(template.name.clone(), template);
        Ok(())
    }
}

/// Conversations held in a map keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryConversationRepository {
    conversations: RwLock<HashMap<String, Conversation>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Conversation>> {
        Ok(self.conversations.read().await.get(id).cloned())
    }

    async fn save(&self, conversation: &Conversation) -> Result<()> {
        self.conversations
            .write()
            .await
            .insert(conversation.id.clone(), conversation.clone());
        Ok(())
    }
}
