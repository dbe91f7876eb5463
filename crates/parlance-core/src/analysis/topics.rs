use crate::language::{Language, LanguageProfile, LanguageRegistry};
use crate::text::{char_len, fold_accents};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// A named group of base topic names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCategory {
    pub name: String,
    pub topics: Vec<String>,
}

/// Categorized topic corpus for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCorpus {
    categories: Vec<TopicCategory>,
}

impl TopicCorpus {
    pub fn new(categories: Vec<TopicCategory>) -> Self {
        Self { categories }
    }

    /// Every topic in corpus order, each name yielded once.
    pub fn topics(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for topic in self.categories.iter().flat_map(|c| c.topics.iter()) {
            if !seen.contains(&topic.as_str()) {
                seen.push(topic.as_str());
            }
        }
        seen
    }

    /// Category name a topic belongs to, if any.
    pub fn category_of(&self, topic: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.topics.iter().any(|t| t == topic))
            .map(|c| c.name.as_str())
    }
}

/// A topic with its matchers precompiled.
#[derive(Debug, Clone)]
struct CompiledTopic {
    name: String,
    lowered: String,
    boundary: Option<Regex>,
    forms: Vec<String>,
}

impl CompiledTopic {
    fn compile(name: &str, profile: &LanguageProfile) -> Self {
        let lowered = name.to_lowercase();
        let boundary = if char_len(name) > 3 {
            let pattern = format!(r"\b{}\b", regex::escape(&fold_accents(name)));
            match Regex::new(&pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(topic = name, error = %e, "failed to compile topic pattern");
                    None
                }
            }
        } else {
            None
        };
        let forms = (profile.derive_forms)(&lowered);
        Self {
            name: name.to_string(),
            lowered,
            boundary,
            forms,
        }
    }

    /// (a) substring, (b) accent-insensitive word boundary, (c) derived form
    /// as a substring.
    fn matches(&self, scan: &ScanText) -> bool {
        if scan.lowered.contains(&self.lowered) {
            return true;
        }
        if let Some(re) = &self.boundary {
            if re.is_match(&scan.folded) {
                return true;
            }
        }
        self.forms.iter().any(|form| scan.lowered.contains(form.as_str()))
    }
}

/// Input text prepared once for all topic checks.
struct ScanText {
    lowered: String,
    folded: String,
}

impl ScanText {
    fn new(text: &str) -> Self {
        Self {
            lowered: text.to_lowercase(),
            folded: fold_accents(text),
        }
    }
}

/// Matches free text against the topic corpus of each registered language.
#[derive(Debug, Clone)]
pub struct TopicMatcher {
    registry: Arc<LanguageRegistry>,
    compiled: HashMap<Language, Vec<CompiledTopic>>,
}

impl TopicMatcher {
    /// Precompiles the corpus of every profile in `registry`.
    pub fn new(registry: Arc<LanguageRegistry>) -> Self {
        let compiled = registry
            .profiles()
            .map(|profile| {
                let topics = profile
                    .topics
                    .topics()
                    .into_iter()
                    .map(|t| CompiledTopic::compile(t, profile))
                    .collect();
                (profile.language, topics)
            })
            .collect();
        Self { registry, compiled }
    }

    /// Base names of the topics found in `text`, in corpus order, without
    /// duplicates.
    pub fn match_topics(&self, text: &str, language: Language) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let language = self.registry.profile(language).language;
        let Some(topics) = self.compiled.get(&language) else {
            return Vec::new();
        };

        let scan = ScanText::new(text);
        let found: Vec<String> = topics
            .iter()
            .filter(|t| t.matches(&scan))
            .map(|t| t.name.clone())
            .collect();

        tracing::debug!(?language, topics = ?found, "topics matched");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> TopicMatcher {
        TopicMatcher::new(Arc::new(LanguageRegistry::default()))
    }

    #[test]
    fn test_direct_match() {
        let topics =
            matcher().match_topics("Me gusta la programación y la música", Language::Es);
        assert_eq!(topics, vec!["programación", "música"]);
    }

    #[test]
    fn test_accent_insensitive_match() {
        let topics = matcher().match_topics("quiero aprender musica", Language::Es);
        assert_eq!(topics, vec!["música"]);
    }

    #[test]
    fn test_derived_forms_record_base_name() {
        let topics =
            matcher().match_topics("Los algoritmos y las aplicaciones", Language::Es);
        assert_eq!(topics, vec!["algoritmo", "aplicación"]);

        let topics =
            matcher().match_topics("I have been cooking and travelling", Language::En);
        assert!(topics.contains(&"cooking".to_string()));
        assert!(topics.contains(&"travel".to_string()));
    }

    #[test]
    fn test_multiword_topic() {
        let topics = matcher().match_topics(
            "What is artificial intelligence doing to finance?",
            Language::En,
        );
        assert_eq!(topics, vec!["artificial intelligence", "finance"]);
    }

    #[test]
    fn test_topic_inside_compound_word() {
        let topics =
            matcher().match_topics("Me interesa la astrofísica y la bioquímica", Language::Es);
        assert_eq!(topics, vec!["física", "química"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(matcher().match_topics("   ", Language::En).is_empty());
    }

    #[test]
    fn test_corpus_category_lookup() {
        let registry = LanguageRegistry::default();
        let corpus = &registry.profile(Language::Es).topics;
        assert_eq!(corpus.category_of("música"), Some("humanidades"));
        assert_eq!(corpus.category_of("nada"), None);
    }
}
