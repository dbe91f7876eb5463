//! Title generation and refinement.

use super::config::TitleConfig;
use super::policy::TitleUpdatePolicy;
use crate::analysis::{FrequencyTable, SignificantWordRanker, TopicMatcher};
use crate::context::Entity;
use crate::conversation::{Conversation, Message};
use crate::language::{Language, LanguageDetector, LanguageProfile, LanguageRegistry};
use crate::text::{capitalize_first, char_len, truncate_at_word, truncate_chars};
use std::collections::HashSet;
use std::sync::Arc;

const ELLIPSIS: &str = "...";

/// Per-call overrides for [`TitleComposer::generate_title`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TitleOptions {
    /// Language to title in; detected from the messages when absent
    pub language: Option<Language>,
}

impl TitleOptions {
    pub fn with_language(language: Language) -> Self {
        Self {
            language: Some(language),
        }
    }
}

/// Builds titles from messages, topics, entities and significant words.
#[derive(Debug, Clone)]
pub struct TitleComposer {
    registry: Arc<LanguageRegistry>,
    detector: LanguageDetector,
    matcher: Arc<TopicMatcher>,
    ranker: SignificantWordRanker,
    config: TitleConfig,
}

impl TitleComposer {
    pub fn new(
        registry: Arc<LanguageRegistry>,
        frequencies: Arc<FrequencyTable>,
        config: TitleConfig,
    ) -> Self {
        Self {
            detector: LanguageDetector::new(registry.clone()),
            matcher: Arc::new(TopicMatcher::new(registry.clone())),
            ranker: SignificantWordRanker::new(frequencies),
            registry,
            config,
        }
    }

    /// Composer over the built-in languages and frequency table.
    pub fn builtin(default_language: Language, config: TitleConfig) -> Self {
        Self::new(
            Arc::new(LanguageRegistry::builtin(default_language)),
            Arc::new(FrequencyTable::builtin()),
            config,
        )
    }

    pub fn config(&self) -> &TitleConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<LanguageRegistry> {
        &self.registry
    }

    /// Update policy sharing this composer's tables.
    pub fn update_policy(&self) -> TitleUpdatePolicy {
        TitleUpdatePolicy::new(
            self.registry.clone(),
            self.matcher.clone(),
            self.config.clone(),
        )
    }

    /// Title for a conversation from its opening user message.
    ///
    /// The first applicable rule wins: default title, question title, topic
    /// title, message title.
    pub fn generate_title(&self, messages: &[Message], options: &TitleOptions) -> String {
        let content = messages
            .iter()
            .find(|m| m.is_user())
            .map(|m| collapse_whitespace(&m.content))
            .unwrap_or_default();
        if content.is_empty() {
            let language = options
                .language
                .unwrap_or_else(|| self.registry.default_language());
            return self.registry.profile(language).default_title.clone();
        }
        let language = options
            .language
            .unwrap_or_else(|| self.detector.detect(&content));
        let profile = self.registry.profile(language);

        let title = if Self::is_question(&content, profile) {
            tracing::debug!("question title");
            self.question_title(&content)
        } else if let Some(title) =
            self.topic_title(&self.matcher.match_topics(&content, language), profile)
        {
            tracing::debug!("topic title");
            title
        } else {
            tracing::debug!("message title");
            self.message_title(&content, profile)
        };

        self.finish(&title)
    }

    /// Refines the title using the whole conversation and returns the
    /// resulting title.
    ///
    /// Tries, in order: a title naming people or organizations from
    /// `entities`, a topic title over every user message, a title from the
    /// most significant words. Keeps the current title when none applies.
    /// Locked titles and conversations with fewer than two messages are left
    /// untouched.
    pub fn improve_title(
        &self,
        conversation: &mut Conversation,
        entities: Option<&[Entity]>,
    ) -> String {
        let current = conversation
            .title
            .clone()
            .unwrap_or_else(|| self.registry.default_profile().default_title.clone());

        if conversation.is_title_locked() || conversation.message_count() < 2 {
            return current;
        }

        let text = conversation.user_text();
        let language = conversation
            .language
            .as_deref()
            .and_then(Language::from_code)
            .unwrap_or_else(|| self.detector.detect(&text));
        let profile = self.registry.profile(language);

        let candidate = match entities.and_then(|e| self.entity_title(e, profile)) {
            Some(title) => Some(title),
            None => {
                let topics = self.matcher.match_topics(&text, language);
                let title = self.topic_title(&topics, profile);
                conversation.last_topics = topics;
                title.or_else(|| self.ranked_title(&text, profile))
            }
        };

        match candidate.map(|t| self.finish(&t)) {
            Some(title) if conversation.title.as_deref() != Some(title.as_str()) => {
                tracing::debug!(conversation = %conversation.id, %title, "title improved");
                conversation.apply_generated_title(title.clone(), true);
                title
            }
            _ => current,
        }
    }

    /// Ends in `?` or opens with an interrogative of `profile`.
    fn is_question(text: &str, profile: &LanguageProfile) -> bool {
        text.ends_with('?') || profile.starts_with_interrogative(text)
    }

    fn question_title(&self, text: &str) -> String {
        let max = self.config.max_title_length;
        if char_len(text) <= max {
            return text.to_string();
        }
        let suffix = if text.ends_with('?') { "...?" } else { ELLIPSIS };
        truncate_at_word(text, max, suffix)
    }

    fn topic_title(&self, topics: &[String], profile: &LanguageProfile) -> Option<String> {
        match topics {
            [] => None,
            [only] => Some(format!("{} {}", profile.topic_prefix, only)),
            [first, second, third] => Some(format!(
                "{}, {} {} {}",
                capitalize_first(first),
                second,
                profile.conjunction,
                third
            )),
            [first, second, _, _, ..] => Some(format!(
                "{}, {} {}",
                capitalize_first(first),
                second,
                profile.other_topics_text
            )),
            two => Some(capitalize_first(&join_series(two, profile))),
        }
    }

    /// Opening message, shortened to its leading and significant words when
    /// it is too long.
    fn message_title(&self, text: &str, profile: &LanguageProfile) -> String {
        let max = self.config.max_message_title_length;
        if char_len(text) <= max {
            return text.to_string();
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        let selected: Vec<&str> = words
            .iter()
            .enumerate()
            .filter(|(i, w)| *i < self.config.preserved_leading_words || is_significant(w, profile))
            .map(|(_, w)| *w)
            .take(self.config.max_title_words)
            .collect();

        let budget = max.saturating_sub(char_len(ELLIPSIS));
        let mut out = String::new();
        let mut kept = 0;
        for word in &selected {
            let extra = usize::from(!out.is_empty()) + char_len(word);
            if char_len(&out) + extra > budget {
                break;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
            kept += 1;
        }
        if out.is_empty() {
            out = truncate_chars(text, budget).to_string();
        } else if kept == words.len() {
            return out;
        }

        let trimmed = out.trim_end_matches(|c: char| c.is_ascii_punctuation());
        format!("{trimmed}{ELLIPSIS}")
    }

    fn entity_title(&self, entities: &[Entity], profile: &LanguageProfile) -> Option<String> {
        let mut seen = HashSet::new();
        let names: Vec<String> = entities
            .iter()
            .filter(|e| e.is_person_or_organization() && !e.name.trim().is_empty())
            .filter(|e| seen.insert(e.key()))
            .take(self.config.max_title_entities)
            .map(|e| e.name.trim().to_string())
            .collect();
        if names.is_empty() {
            return None;
        }
        Some(format!("{} {}", profile.topic_prefix, join_series(&names, profile)))
    }

    fn ranked_title(&self, text: &str, profile: &LanguageProfile) -> Option<String> {
        let words = self.ranker.top_terms(text, profile, self.config.ranked_words);
        match words.as_slice() {
            [] => None,
            [only] => Some(format!("{} {}", profile.topic_prefix, only)),
            many => Some(capitalize_first(&join_series(many, profile))),
        }
    }

    /// Capitalizes and clamps a candidate title.
    fn finish(&self, title: &str) -> String {
        let capitalized = capitalize_first(title.trim());
        truncate_at_word(&capitalized, self.config.max_title_length, ELLIPSIS)
    }
}

/// `a`, `a y b`, `a, b y c` ...
fn join_series(items: &[String], profile: &LanguageProfile) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} {} {}", init.join(", "), profile.conjunction, last),
    }
}

fn is_significant(word: &str, profile: &LanguageProfile) -> bool {
    let core = word.trim_matches(|c: char| !c.is_alphanumeric());
    char_len(core) > 3 && !profile.is_common_word(core)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
