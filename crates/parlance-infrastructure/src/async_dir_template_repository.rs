//! AsyncDirStorage-based TemplateRepository implementation.

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use version_migrate::{AsyncDirStorage, FormatStrategy, MigrationError};

use parlance_core::error::{ParlanceError, Result};
use parlance_core::template::{Template, TemplateRepository, builtin_templates};

use crate::dto::{TEMPLATE_ENTITY, create_template_migrator};
use crate::storage::{is_missing, open_dir_storage, validate_id};

const DOMAIN: &str = "templates";
const EXTENSION: &str = "toml";

/// Template repository storing one TOML file per template.
///
/// Directory structure:
/// ```text
/// base_dir/
/// └── templates/
///     ├── base_system.toml
///     ├── entity_processing.toml
///     └── <template-name>.toml
/// ```
pub struct AsyncDirTemplateRepository {
    storage: AsyncDirStorage,
}

impl AsyncDirTemplateRepository {
    /// Opens the template directory under `base_dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error when the directory cannot be created.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let storage = open_dir_storage(
            base_dir.as_ref(),
            DOMAIN,
            create_template_migrator()?,
            FormatStrategy::Toml,
        )
        .await?;
        Ok(Self { storage })
    }

    /// Writes the built-in templates that do not exist yet.
    ///
    /// Returns the names of the templates written. Existing files are never
    /// overwritten, even unreadable ones.
    pub async fn seed_builtin(&self) -> Result<Vec<String>> {
        let mut written = Vec::new();
        for template in builtin_templates() {
            if !matches!(self.get_template(&template.name).await, Ok(None)) {
                continue;
            }
            written.push(template.name.clone());
            self.save_template(template).await?;
        }
        if !written.is_empty() {
            tracing::info!(
                dir = %self.dir().display(),
                templates = ?written,
                "seeded built-in templates"
            );
        }
        Ok(written)
    }

    /// Directory holding the template files.
    pub fn dir(&self) -> &Path {
        self.storage.base_path()
    }

    async fn load(&self, name: &str) -> std::result::Result<Template, MigrationError> {
        let mut template: Template = self.storage.load(TEMPLATE_ENTITY, name).await?;
        if template.name.is_empty() {
            template.name = name.to_string();
        }
        Ok(template)
    }

    async fn stored_names(&self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(self.dir()).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl TemplateRepository for AsyncDirTemplateRepository {
    /// Unreadable files are logged and skipped.
    async fn list_templates(&self) -> Result<Vec<Template>> {
        let names = self.stored_names().await?;
        let mut templates = Vec::with_capacity(names.len());
        for name in names {
            match self.load(&name).await {
                Ok(template) => templates.push(template),
                Err(e) => {
                    tracing::warn!(template = %name, error = %e, "skipping unreadable template");
                }
            }
        }
        Ok(templates)
    }

    async fn get_template(&self, name: &str) -> Result<Option<Template>> {
        validate_id("template name", name)?;
        match self.load(name).await {
            Ok(template) => Ok(Some(template)),
            Err(e) if is_missing(&e) => Ok(None),
            Err(e) => Err(ParlanceError::from(e)),
        }
    }

    async fn save_template(&self, template: Template) -> Result<()> {
        validate_id("template name", &template.name)?;
        self.storage
            .save(TEMPLATE_ENTITY, &template.name, &template)
            .await
            .map_err(|e| {
                ParlanceError::io(format!("Failed to save template '{}': {}", template.name, e))
            })?;
        tracing::debug!(template = %template.name, "template saved");
        Ok(())
    }
}
