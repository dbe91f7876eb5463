//! Template file DTOs and migrator.

use parlance_core::error::Result;
use parlance_core::template::Template;
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Migrator, Versioned};

/// Entity name the template migrator is registered under.
pub const TEMPLATE_ENTITY: &str = "template";

/// Template file V1.0.0
///
/// ```toml
/// version = "1.0.0"
/// name = "entity_processing"
/// description = "Lists the entities mentioned so far"
/// content = """
/// The conversation mentions these entities:
/// {{entities}}
/// """
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct TemplateFileV1 {
    /// Falls back to the file stem when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
}

/// A file without a name yields an empty one; the repository fills in the
/// file stem.
impl IntoDomain<Template> for TemplateFileV1 {
    fn into_domain(self) -> Template {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_default();
        Template::new(name, self.content)
    }
}

impl FromDomain<Template> for TemplateFileV1 {
    fn from_domain(template: Template) -> Self {
        TemplateFileV1 {
            name: Some(template.name),
            description: None,
            content: template.content,
        }
    }
}

/// Creates a Migrator for template files.
pub fn create_template_migrator() -> Result<Migrator> {
    let migrator =
        version_migrate::migrator!("template" => [TemplateFileV1, Template], save = true)?;
    Ok(migrator)
}
