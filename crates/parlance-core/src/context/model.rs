//! Raw context map types.
//!
//! Every collection field tolerates being absent or `null`; both are read as
//! an empty list.

use crate::conversation::{Message, Timestamp};
use crate::error::{ParlanceError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Reads `null` as `T::default()`.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A named entity detected in the conversation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Entity {
    pub name: String,
    /// Entity kind as reported by the extractor ("person", "organization", ...)
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub entity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extractor confidence in `0..=1`
    pub confidence: f64,
}

impl Entity {
    pub fn new(name: impl Into<String>, entity_type: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            entity_type: entity_type.into(),
            description: None,
            confidence,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Uniqueness key: the lower-cased name.
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// True for people and organizations, the kinds usable in titles.
    pub fn is_person_or_organization(&self) -> bool {
        matches!(
            self.entity_type.to_lowercase().as_str(),
            "person" | "persona" | "organization" | "organisation" | "organización" | "org"
        )
    }
}

/// Entity mention attached to a memory item or document: a bare name or an
/// object with at least a `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Name(String),
    Named { name: String },
}

impl EntityRef {
    pub fn name(&self) -> &str {
        match self {
            EntityRef::Name(name) | EntityRef::Named { name } => name,
        }
    }
}

/// A topic as reported by local extraction (`{name, confidence}`) or global
/// memory (bare name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TopicItem {
    Scored {
        name: String,
        #[serde(default)]
        confidence: f64,
    },
    Name(String),
}

impl TopicItem {
    pub fn name(&self) -> &str {
        match self {
            TopicItem::Scored { name, .. } | TopicItem::Name(name) => name,
        }
    }

    /// Confidence of the topic; bare names are taken as certain.
    pub fn confidence(&self) -> f64 {
        match self {
            TopicItem::Scored { confidence, .. } => *confidence,
            TopicItem::Name(_) => 1.0,
        }
    }
}

/// A remembered exchange.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_response: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub entities: Vec<EntityRef>,
    /// Relevance to the current message in `0..=1`
    pub relevance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

/// Short- and long-term memory hits.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryContext {
    #[serde(deserialize_with = "nullable")]
    pub short_term: Vec<MemoryItem>,
    #[serde(deserialize_with = "nullable")]
    pub long_term: Vec<MemoryItem>,
}

/// Summary of an uploaded document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentSummary {
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub summary: String,
    #[serde(deserialize_with = "nullable")]
    pub key_concepts: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub entities: Vec<EntityRef>,
}

/// Entities and topics recalled from the user's global memory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalMemory {
    #[serde(deserialize_with = "nullable")]
    pub entities: Vec<Entity>,
    #[serde(deserialize_with = "nullable")]
    pub topics: Vec<TopicItem>,
}

/// Shape of the current message as classified upstream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageStructure {
    pub is_question: bool,
    pub is_command: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,
}

impl MessageStructure {
    pub fn is_complex(&self) -> bool {
        self.complexity.as_deref() == Some("complex")
    }
}

/// Sentiment of the current message.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentAnalysis {
    /// Dominant sentiment label ("urgent", "confused", "positive", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Everything retrieved for one generation request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextMap {
    #[serde(deserialize_with = "nullable")]
    pub current_message: String,
    #[serde(deserialize_with = "nullable")]
    pub entities: Vec<Entity>,
    #[serde(deserialize_with = "nullable")]
    pub topics: Vec<TopicItem>,
    #[serde(deserialize_with = "nullable")]
    pub memory: MemoryContext,
    #[serde(deserialize_with = "nullable")]
    pub documents: Vec<DocumentSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_memory: Option<GlobalMemory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_structure: Option<MessageStructure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub recent_messages: Vec<Message>,
}

impl ContextMap {
    /// Interprets a raw JSON value as a context map.
    ///
    /// # Errors
    ///
    /// Returns `MalformedContext` when the value is not an object or one of
    /// its fields has an incompatible shape.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ParlanceError::malformed_context(format!(
                "expected an object, got {}",
                json_kind(value)
            )));
        }
        serde_json::from_value(value.clone())
            .map_err(|e| ParlanceError::malformed_context(e.to_string()))
    }

    /// Salvages `recentMessages` from a value that failed to parse as a whole.
    ///
    /// Individual messages that do not parse are dropped.
    pub fn recent_messages_lenient(value: &Value) -> Vec<Message> {
        value
            .get("recentMessages")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::MessageRole;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let ctx = ContextMap::from_value(&json!({})).unwrap();
        assert!(ctx.entities.is_empty());
        assert!(ctx.memory.short_term.is_empty());
        assert!(ctx.global_memory.is_none());
        assert_eq!(ctx.current_message, "");
    }

    #[test]
    fn test_null_fields_default_to_empty() {
        let ctx = ContextMap::from_value(&json!({
            "entities": null,
            "documents": null,
            "memory": { "shortTerm": null },
            "currentMessage": null
        }))
        .unwrap();
        assert!(ctx.entities.is_empty());
        assert!(ctx.documents.is_empty());
        assert!(ctx.memory.short_term.is_empty());
    }

    #[test]
    fn test_topic_items_accept_both_forms() {
        let ctx = ContextMap::from_value(&json!({
            "topics": [{ "name": "música", "confidence": 0.9 }, "historia"]
        }))
        .unwrap();
        assert_eq!(ctx.topics[0].name(), "música");
        assert_eq!(ctx.topics[0].confidence(), 0.9);
        assert_eq!(ctx.topics[1].name(), "historia");
        assert_eq!(ctx.topics[1].confidence(), 1.0);
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = ContextMap::from_value(&json!("hello")).unwrap_err();
        assert!(matches!(err, ParlanceError::MalformedContext(_)));
        assert!(ContextMap::from_value(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_wrong_field_shape_is_malformed() {
        assert!(ContextMap::from_value(&json!({ "entities": "oops" })).is_err());
    }

    #[test]
    fn test_recent_messages_lenient_salvages_history() {
        let value = json!({
            "entities": "oops",
            "recentMessages": [
                { "role": "user", "content": "hola" },
                { "role": "bot", "content": "¡hola!" },
                { "nonsense": true }
            ]
        });
        let history = ContextMap::recent_messages_lenient(&value);
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, MessageRole::Assistant);
    }

    #[test]
    fn test_entity_refs_accept_both_forms() {
        let item: MemoryItem = serde_json::from_value(json!({
            "userMessage": "hi",
            "entities": ["Rust", { "name": "Mozilla", "type": "organization" }],
            "relevance": 0.9
        }))
        .unwrap();
        let names: Vec<&str> = item.entities.iter().map(EntityRef::name).collect();
        assert_eq!(names, vec!["Rust", "Mozilla"]);
    }
}
