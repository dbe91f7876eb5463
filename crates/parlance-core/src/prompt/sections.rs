//! Line formatting and directive text for the system message sections.

use crate::context::{
    DocumentSummary, Entity, EntityRef, MemoryItem, MessageStructure, SentimentAnalysis,
};
use crate::language::LanguageProfile;
use crate::text::{char_len, truncate_chars};

/// `- name (type)[: description]`
pub fn entity_line(entity: &Entity) -> String {
    let mut line = format!("- {}", entity.name);
    if !entity.entity_type.is_empty() {
        line.push_str(&format!(" ({})", entity.entity_type));
    }
    if let Some(description) = entity.description.as_deref().filter(|d| !d.trim().is_empty()) {
        line.push_str(&format!(": {description}"));
    }
    line
}

/// `- name: summary [Key concepts: c1, c2, ...]`
pub fn document_line(document: &DocumentSummary, max_concepts: usize) -> String {
    let mut line = format!("- {}: {}", document.name, document.summary);
    let concepts: Vec<&str> = document
        .key_concepts
        .iter()
        .take(max_concepts)
        .map(String::as_str)
        .collect();
    if !concepts.is_empty() {
        line.push_str(&format!(" [Key concepts: {}]", concepts.join(", ")));
    }
    line
}

/// `- User asked about: "<excerpt>" [Entities: e1, e2, e3]`
///
/// Items without a user message quote the remembered response instead;
/// items with neither render as `None`.
pub fn memory_line(item: &MemoryItem, excerpt_chars: usize, max_entities: usize) -> Option<String> {
    let (label, text) = match (&item.user_message, &item.bot_response) {
        (Some(user), _) if !user.trim().is_empty() => ("User asked about", user),
        (_, Some(bot)) if !bot.trim().is_empty() => ("Previously discussed", bot),
        _ => return None,
    };

    let mut excerpt = truncate_chars(text.trim(), excerpt_chars).to_string();
    if char_len(text.trim()) > excerpt_chars {
        excerpt.push_str("...");
    }

    let mut line = format!("- {label}: \"{excerpt}\"");
    let entities: Vec<&str> = item
        .entities
        .iter()
        .take(max_entities)
        .map(EntityRef::name)
        .collect();
    if !entities.is_empty() {
        line.push_str(&format!(" [Entities: {}]", entities.join(", ")));
    }
    Some(line)
}

/// Hint about the shape of the current message and the user's tone.
///
/// Only produced for questions and commands.
pub fn conversational_state_directive(
    structure: &MessageStructure,
    sentiment: Option<&SentimentAnalysis>,
) -> Option<String> {
    if !structure.is_question && !structure.is_command {
        return None;
    }

    let mut parts = Vec::new();
    if structure.is_question {
        let kind = structure
            .question_type
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .unwrap_or("general");
        parts.push(format!("The user is asking a {kind} question."));
    } else {
        parts.push("The user is giving an instruction; carry it out directly.".to_string());
    }
    if structure.is_complex() {
        parts.push("Give a detailed, well-structured answer.".to_string());
    }

    match sentiment.and_then(|s| s.sentiment.as_deref()) {
        Some("urgent") => parts.push("The user is in a hurry, so be concise.".to_string()),
        Some("confused") => parts.push(
            "The user seems confused, so be extra clear and go step by step.".to_string(),
        ),
        _ => {}
    }

    Some(parts.join(" "))
}

/// Instruction to answer in a language other than the default.
pub fn language_directive(profile: &LanguageProfile) -> String {
    format!(
        "Respond in {}, the language the user is writing in.",
        profile.display_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::english_profile;

    #[test]
    fn test_entity_line_variants() {
        let plain = Entity::new("Rust", "language", 0.9);
        assert_eq!(entity_line(&plain), "- Rust (language)");

        let described = plain.clone().with_description("A systems language");
        assert_eq!(entity_line(&described), "- Rust (language): A systems language");

        let untyped = Entity::new("Ferris", "", 0.9);
        assert_eq!(entity_line(&untyped), "- Ferris");
    }

    #[test]
    fn test_document_line_caps_concepts() {
        let doc = DocumentSummary {
            name: "guide.pdf".into(),
            summary: "Onboarding guide".into(),
            key_concepts: (1..=7).map(|i| format!("c{i}")).collect(),
            entities: Vec::new(),
        };
        assert_eq!(
            document_line(&doc, 5),
            "- guide.pdf: Onboarding guide [Key concepts: c1, c2, c3, c4, c5]"
        );

        let bare = DocumentSummary {
            name: "notes.txt".into(),
            summary: "Notes".into(),
            ..Default::default()
        };
        assert_eq!(document_line(&bare, 5), "- notes.txt: Notes");
    }

    #[test]
    fn test_memory_line_truncates_and_lists_entities() {
        let item = MemoryItem {
            user_message: Some("a".repeat(120)),
            entities: vec![
                EntityRef::Name("e1".into()),
                EntityRef::Name("e2".into()),
                EntityRef::Named { name: "e3".into() },
                EntityRef::Name("e4".into()),
            ],
            relevance: 0.9,
            ..Default::default()
        };
        let line = memory_line(&item, 100, 3).unwrap();
        assert_eq!(
            line,
            format!("- User asked about: \"{}...\" [Entities: e1, e2, e3]", "a".repeat(100))
        );
    }

    #[test]
    fn test_memory_line_short_message_not_truncated() {
        let item = MemoryItem {
            user_message: Some("¿Qué es Rust?".into()),
            ..Default::default()
        };
        assert_eq!(
            memory_line(&item, 100, 3).unwrap(),
            "- User asked about: \"¿Qué es Rust?\""
        );
        assert!(memory_line(&MemoryItem::default(), 100, 3).is_none());
    }

    #[test]
    fn test_conversational_state_directive() {
        let question = MessageStructure {
            is_question: true,
            question_type: Some("how-to".into()),
            complexity: Some("complex".into()),
            ..Default::default()
        };
        let urgent = SentimentAnalysis {
            sentiment: Some("urgent".into()),
            score: None,
        };
        let text = conversational_state_directive(&question, Some(&urgent)).unwrap();
        assert_eq!(
            text,
            "The user is asking a how-to question. Give a detailed, well-structured answer. \
             The user is in a hurry, so be concise."
        );

        assert!(
            conversational_state_directive(&MessageStructure::default(), Some(&urgent)).is_none()
        );
    }

    #[test]
    fn test_command_with_confusion() {
        let command = MessageStructure {
            is_command: true,
            ..Default::default()
        };
        let confused = SentimentAnalysis {
            sentiment: Some("confused".into()),
            score: Some(0.8),
        };
        let text = conversational_state_directive(&command, Some(&confused)).unwrap();
        assert!(text.starts_with("The user is giving an instruction"));
        assert!(text.ends_with("be extra clear and go step by step."));
    }

    #[test]
    fn test_language_directive_names_language() {
        assert_eq!(
            language_directive(&english_profile()),
            "Respond in English, the language the user is writing in."
        );
    }
}
