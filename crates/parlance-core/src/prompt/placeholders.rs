//! Placeholder substitution for section templates.

use super::config::PromptConfig;
use super::sections::{document_line, entity_line, memory_line};
use crate::context::EnhancedContext;
use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern is valid")
});

type Renderer = Box<dyn Fn(&EnhancedContext) -> String + Send + Sync>;

/// Ordered map from placeholder name to renderer.
///
/// Substitution is a single pass over the template, so text produced by a
/// renderer is never itself scanned for placeholders. Tokens without a
/// registered renderer are left exactly as written.
pub struct PlaceholderRenderer {
    renderers: Vec<(String, Renderer)>,
}

impl PlaceholderRenderer {
    /// A renderer with no placeholders registered.
    pub fn empty() -> Self {
        Self {
            renderers: Vec::new(),
        }
    }

    /// The `entities`, `documents` and `memory_items` renderers.
    pub fn standard(config: &PromptConfig) -> Self {
        let concepts = config.document_concepts_shown;
        let excerpt = config.memory_excerpt_chars;
        let memory_entities = config.memory_entities_shown;

        Self::empty()
            .with("entities", |ctx: &EnhancedContext| {
                ctx.entities
                    .iter()
                    .map(entity_line)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .with("documents", move |ctx: &EnhancedContext| {
                ctx.documents
                    .iter()
                    .map(|d| document_line(d, concepts))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .with("memory_items", move |ctx: &EnhancedContext| {
                ctx.memory
                    .iter()
                    .filter_map(|m| memory_line(m, excerpt, memory_entities))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
    }

    /// Registers `renderer` under `name`, replacing an existing entry in place.
    pub fn with<F>(mut self, name: &str, renderer: F) -> Self
    where
        F: Fn(&EnhancedContext) -> String + Send + Sync + 'static,
    {
        let boxed: Renderer = Box::new(renderer);
        match self.renderers.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = boxed,
            None => self.renderers.push((name.to_string(), boxed)),
        }
        self
    }

    /// Registered placeholder names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.renderers.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Fills every known placeholder in `content` from `context`.
    pub fn render(&self, content: &str, context: &EnhancedContext) -> String {
        PLACEHOLDER
            .replace_all(content, |caps: &Captures| {
                match self.renderers.iter().find(|(n, _)| n == &caps[1]) {
                    Some((_, render)) => render(context),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

impl fmt::Debug for PlaceholderRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderRenderer")
            .field("placeholders", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Entity;

    fn context() -> EnhancedContext {
        EnhancedContext {
            entities: vec![
                Entity::new("Rust", "language", 0.9),
                Entity::new("Mozilla", "organization", 0.8),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_standard_names_in_order() {
        let renderer = PlaceholderRenderer::standard(&PromptConfig::default());
        assert_eq!(renderer.names(), vec!["entities", "documents", "memory_items"]);
    }

    #[test]
    fn test_render_known_placeholder() {
        let renderer = PlaceholderRenderer::standard(&PromptConfig::default());
        let out = renderer.render("Known:\n{{entities}}\nEnd", &context());
        assert_eq!(out, "Known:\n- Rust (language)\n- Mozilla (organization)\nEnd");
    }

    #[test]
    fn test_unknown_placeholders_left_verbatim() {
        let renderer = PlaceholderRenderer::standard(&PromptConfig::default());
        let out = renderer.render("{{ user_name }} / {{entities}} / {{unknown}}", &context());
        assert!(out.starts_with("{{ user_name }} / - Rust"));
        assert!(out.ends_with("/ {{unknown}}"));
    }

    #[test]
    fn test_rendered_text_is_not_rescanned() {
        let renderer = PlaceholderRenderer::empty()
            .with("a", |_: &EnhancedContext| "{{b}}".to_string())
            .with("b", |_: &EnhancedContext| "B".to_string());
        assert_eq!(renderer.render("{{a}}{{b}}", &EnhancedContext::default()), "{{b}}B");
    }

    #[test]
    fn test_with_replaces_in_place() {
        let renderer = PlaceholderRenderer::standard(&PromptConfig::default())
            .with("entities", |_: &EnhancedContext| "custom".to_string());
        assert_eq!(renderer.names(), vec!["entities", "documents", "memory_items"]);
        assert_eq!(renderer.render("{{entities}}", &context()), "custom");
    }
}
