use crate::context::ContextLimits;
use crate::error::{ParlanceError, Result};
use crate::language::Language;
use crate::prompt::PromptConfig;
use crate::title::TitleConfig;
use serde::{Deserialize, Serialize};

/// Root of `config.toml`.
///
/// Every section is optional; anything left out keeps its default.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ParlanceConfig {
    /// Language used when detection is inconclusive
    pub default_language: Language,
    pub context: ContextLimits,
    pub prompt: PromptConfig,
    pub title: TitleConfig,
}

impl ParlanceConfig {
    /// Parses a TOML document. Blank input yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when the document is not valid TOML or a
    /// value has the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(content).map_err(|e| ParlanceError::config(e.to_string()))
    }

    /// Serializes to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(ParlanceConfig::from_toml_str("").unwrap(), ParlanceConfig::default());
        assert_eq!(ParlanceConfig::from_toml_str("  \n").unwrap(), ParlanceConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = ParlanceConfig::from_toml_str(
            r#"
default_language = "en"

[context]
max_entities = 4

[title]
max_title_length = 50
"#,
        )
        .unwrap();

        assert_eq!(config.default_language, Language::En);
        assert_eq!(config.context.max_entities, 4);
        assert_eq!(config.context.max_topics, 5);
        assert_eq!(config.title.max_title_length, 50);
        assert_eq!(config.title.max_message_title_length, 60);
        assert_eq!(config.prompt.max_history_messages, 10);
    }

    #[test]
    fn test_template_names_override() {
        let config = ParlanceConfig::from_toml_str(
            r#"
[prompt.templates]
base_system = "persona_pirate"
"#,
        )
        .unwrap();
        assert_eq!(config.prompt.templates.base_system, "persona_pirate");
        assert_eq!(config.prompt.templates.memory_context, "memory_context");
    }

    #[test]
    fn test_malformed_is_config_error() {
        let err = ParlanceConfig::from_toml_str("[context\nmax_entities = ").unwrap_err();
        assert!(err.is_config());

        let err = ParlanceConfig::from_toml_str("[context]\nmax_entities = \"many\"").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_round_trip_defaults() {
        let text = ParlanceConfig::default().to_toml_string().unwrap();
        assert_eq!(ParlanceConfig::from_toml_str(&text).unwrap(), ParlanceConfig::default());
    }
}
