use serde::{Deserialize, Serialize};

/// A named text template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Template name used for lookup (e.g. `entity_processing`)
    pub name: String,
    /// Template body, possibly containing `{{placeholder}}` tokens
    pub content: String,
}

impl Template {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}
