//! Template repository trait.

use async_trait::async_trait;

use super::Template;
use crate::error::Result;

/// Repository for named prompt templates.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Lists all available templates.
    async fn list_templates(&self) -> Result<Vec<Template>>;

    /// Gets a specific template by name.
    async fn get_template(&self, name: &str) -> Result<Option<Template>>;

    /// Adds or updates a template.
    async fn save_template(&self, template: Template) -> Result<()>;
}
