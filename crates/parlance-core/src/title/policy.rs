//! When to recompute a stored title.

use super::config::TitleConfig;
use crate::analysis::TopicMatcher;
use crate::conversation::{Conversation, TitleState};
use crate::language::{Language, LanguageDetector, LanguageRegistry};
use std::collections::HashSet;
use std::sync::Arc;

/// Decides whether a conversation's title should be regenerated.
#[derive(Debug, Clone)]
pub struct TitleUpdatePolicy {
    registry: Arc<LanguageRegistry>,
    detector: LanguageDetector,
    matcher: Arc<TopicMatcher>,
    config: TitleConfig,
}

impl TitleUpdatePolicy {
    pub fn new(
        registry: Arc<LanguageRegistry>,
        matcher: Arc<TopicMatcher>,
        config: TitleConfig,
    ) -> Self {
        Self {
            detector: LanguageDetector::new(registry.clone()),
            registry,
            matcher,
            config,
        }
    }

    /// Checked in order:
    ///
    /// 1. a locked title is never updated
    /// 2. a missing or generic title always is
    /// 3. enough messages arrived since the title was set
    /// 4. the topics drifted away from the ones recorded last time
    pub fn needs_title_update(&self, conversation: &Conversation) -> bool {
        if conversation.is_title_locked() {
            return false;
        }

        let title = conversation.title.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() || self.registry.is_generic_title(title) {
            return true;
        }

        if self.cadence_reached(conversation) {
            tracing::debug!(conversation = %conversation.id, "title update due by message count");
            return true;
        }

        if self.topics_drifted(conversation) {
            tracing::debug!(conversation = %conversation.id, "title update due to topic drift");
            return true;
        }

        false
    }

    fn cadence_reached(&self, conversation: &Conversation) -> bool {
        let since = match conversation.title_state {
            TitleState::Generated {
                message_count: Some(count),
            }
            | TitleState::Improved {
                message_count: Some(count),
            } => conversation.message_count().saturating_sub(count),
            _ => return false,
        };
        since >= self.config.min_update_messages
            && conversation.message_count() >= self.config.min_messages_for_update
    }

    /// Overlap between the recorded and current topics is less than half of
    /// the smaller set. Needs both sets to be non-empty.
    fn topics_drifted(&self, conversation: &Conversation) -> bool {
        if conversation.last_topics.is_empty() {
            return false;
        }
        let text = conversation.user_text();
        let language = conversation
            .language
            .as_deref()
            .and_then(Language::from_code)
            .unwrap_or_else(|| self.detector.detect(&text));

        let current: HashSet<String> = self
            .matcher
            .match_topics(&text, language)
            .into_iter()
            .collect();
        if current.is_empty() {
            return false;
        }
        let previous: HashSet<&str> = conversation
            .last_topics
            .iter()
            .map(String::as_str)
            .collect();

        let overlap = current.iter().filter(|t| previous.contains(t.as_str())).count();
        let smaller = current.len().min(previous.len());
        (overlap as f64) < smaller as f64 / 2.0
    }
}
