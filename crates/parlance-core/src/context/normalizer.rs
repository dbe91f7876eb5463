//! Filtering, deduplication and capping of the raw context map.

use super::model::{
    ContextMap, DocumentSummary, Entity, MemoryItem, MessageStructure, SentimentAnalysis,
};
use crate::conversation::Message;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Caps and thresholds applied by [`ContextNormalizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextLimits {
    pub max_entities: usize,
    pub min_entity_confidence: f64,
    pub max_topics: usize,
    pub min_topic_confidence: f64,
    pub max_global_topics: usize,
    pub max_short_term_memory: usize,
    pub min_short_term_relevance: f64,
    pub max_long_term_memory: usize,
    pub min_long_term_relevance: f64,
    pub max_document_concepts: usize,
    pub max_document_entities: usize,
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self {
            max_entities: 8,
            min_entity_confidence: 0.6,
            max_topics: 5,
            min_topic_confidence: 0.7,
            max_global_topics: 3,
            max_short_term_memory: 3,
            min_short_term_relevance: 0.7,
            max_long_term_memory: 2,
            min_long_term_relevance: 0.8,
            max_document_concepts: 5,
            max_document_entities: 5,
        }
    }
}

/// Bounded context handed to the prompt assembler.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedContext {
    pub current_message: String,
    pub entities: Vec<Entity>,
    pub topics: Vec<String>,
    /// Short-term hits first, then long-term
    pub memory: Vec<MemoryItem>,
    pub documents: Vec<DocumentSummary>,
    pub message_structure: Option<MessageStructure>,
    pub sentiment: Option<SentimentAnalysis>,
    pub language: Option<String>,
    pub recent_messages: Vec<Message>,
}

/// Turns a [`ContextMap`] into an [`EnhancedContext`].
#[derive(Debug, Clone, Default)]
pub struct ContextNormalizer {
    limits: ContextLimits,
}

impl ContextNormalizer {
    pub fn new(limits: ContextLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ContextLimits {
        &self.limits
    }

    /// Applies every filter and cap. Missing optional data yields empty lists.
    pub fn normalize(&self, context: ContextMap) -> EnhancedContext {
        let entities = self.select_entities(&context);
        let topics = self.select_topics(&context);
        let memory = self.select_memory(&context);
        let documents = self.cap_documents(context.documents);

        tracing::debug!(
            entities = entities.len(),
            topics = topics.len(),
            memory = memory.len(),
            documents = documents.len(),
            "context normalized"
        );

        EnhancedContext {
            current_message: context.current_message,
            entities,
            topics,
            memory,
            documents,
            message_structure: context.message_structure,
            sentiment: context.sentiment,
            language: context.language,
            recent_messages: context.recent_messages,
        }
    }

    /// Confident local entities first, then unseen global-memory entities,
    /// unique by lower-cased name and capped.
    fn select_entities(&self, context: &ContextMap) -> Vec<Entity> {
        let max = self.limits.max_entities;
        let mut seen = HashSet::new();
        let mut selected = Vec::new();

        for entity in &context.entities {
            if selected.len() >= max {
                break;
            }
            if entity.confidence >= self.limits.min_entity_confidence
                && seen.insert(entity.key())
            {
                selected.push(entity.clone());
            }
        }

        if let Some(global) = &context.global_memory {
            for entity in &global.entities {
                if selected.len() >= max {
                    break;
                }
                if seen.insert(entity.key()) {
                    selected.push(entity.clone());
                }
            }
        }

        selected
    }

    fn select_topics(&self, context: &ContextMap) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut topics: Vec<String> = context
            .topics
            .iter()
            .filter(|t| t.confidence() >= self.limits.min_topic_confidence)
            .filter(|t| seen.insert(t.name().to_lowercase()))
            .map(|t| t.name().to_string())
            .collect();

        if let Some(global) = &context.global_memory {
            let extra: Vec<String> = global
                .topics
                .iter()
                .filter(|t| seen.insert(t.name().to_lowercase()))
                .take(self.limits.max_global_topics)
                .map(|t| t.name().to_string())
                .collect();
            topics.extend(extra);
        }

        topics.truncate(self.limits.max_topics);
        topics
    }

    fn select_memory(&self, context: &ContextMap) -> Vec<MemoryItem> {
        let short_term = context
            .memory
            .short_term
            .iter()
            .filter(|m| m.relevance >= self.limits.min_short_term_relevance)
            .take(self.limits.max_short_term_memory);
        let long_term = context
            .memory
            .long_term
            .iter()
            .filter(|m| m.relevance >= self.limits.min_long_term_relevance)
            .take(self.limits.max_long_term_memory);
        short_term.chain(long_term).cloned().collect()
    }

    fn cap_documents(&self, documents: Vec<DocumentSummary>) -> Vec<DocumentSummary> {
        documents
            .into_iter()
            .map(|mut doc| {
                doc.key_concepts.truncate(self.limits.max_document_concepts);
                doc.entities.truncate(self.limits.max_document_entities);
                doc
            })
            .collect()
    }
}
