use super::{Template, TemplateRepository};
use crate::error::{ParlanceError, Result};
use std::collections::HashMap;

/// Immutable snapshot of the templates the prompt pipeline needs.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: HashMap<String, Template>,
}

impl TemplateStore {
    pub fn from_templates(templates: impl IntoIterator<Item = Template>) -> Self {
        Self {
            templates: templates
                .into_iter()
                .map(|t| (t.name.clone(), t))
                .collect(),
        }
    }

    /// Reads `names` from `repository`.
    ///
    /// Templates that are missing or fail to load are logged and left out;
    /// the sections that need them are skipped at assembly time.
    pub async fn load(repository: &dyn TemplateRepository, names: &[&str]) -> Self {
        let mut templates = HashMap::new();
        for name in names {
            match repository.get_template(name).await {
                Ok(Some(template)) => {
                    templates.insert(name.to_string(), template);
                }
                Ok(None) => {
                    tracing::warn!(template = %name, "template not found");
                }
                Err(e) => {
                    tracing::warn!(template = %name, error = %e, "failed to load template");
                }
            }
        }
        tracing::debug!(loaded = templates.len(), requested = names.len(), "template store loaded");
        Self { templates }
    }

    /// Looks up a template by name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the template was not loaded.
    pub fn get(&self, name: &str) -> Result<&Template> {
        self.templates
            .get(name)
            .ok_or_else(|| ParlanceError::not_found("template", name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
