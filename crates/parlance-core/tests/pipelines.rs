use parlance_core::analysis::{FrequencyTable, SignificantWordRanker};
use parlance_core::context::{ContextLimits, ContextMap, ContextNormalizer};
use parlance_core::conversation::{Conversation, Message, MessageRole, find_snippet};
use parlance_core::language::{Language, LanguageDetector, LanguageRegistry};
use parlance_core::prompt::{PromptAssembler, PromptConfig, UserConfig};
use parlance_core::template::{TemplateStore, builtin, builtin_templates};
use parlance_core::text::char_len;
use parlance_core::title::{TitleComposer, TitleConfig, TitleOptions};
use serde_json::json;
use std::sync::Arc;

fn composer() -> TitleComposer {
    TitleComposer::builtin(Language::Es, TitleConfig::default())
}

#[test]
fn default_titles_per_language() {
    let es = composer();
    let en = TitleComposer::builtin(Language::En, TitleConfig::default());
    assert_eq!(es.generate_title(&[], &TitleOptions::default()), "Nueva conversación");
    assert_eq!(en.generate_title(&[], &TitleOptions::default()), "New conversation");
}

#[test]
fn question_title_is_verbatim() {
    let title = composer().generate_title(
        &[Message::user("¿Qué es la fotosíntesis?")],
        &TitleOptions::default(),
    );
    assert_eq!(title, "¿Qué es la fotosíntesis?");
}

#[test]
fn long_statement_title_is_bounded() {
    let message = "Estoy organizando un viaje largo por varios países durante el verano \
                   y necesito ordenar reservas, presupuestos, documentos, seguros médicos, \
                   itinerarios alternativos y contactos de emergencia para toda la familia";
    assert!(char_len(message) >= 200);

    let title = composer().generate_title(&[Message::user(message)], &TitleOptions::default());

    // the message mentions topics, so it is titled by them
    assert_eq!(title, "Viaje y familia");

    let message = "Estoy organizando varias reservas largas durante el verano y necesito \
                   ordenar presupuestos, documentos, seguros, itinerarios alternativos, \
                   contactos de emergencia y muchas otras gestiones pendientes";
    let title = composer().generate_title(&[Message::user(message)], &TitleOptions::default());
    assert!(char_len(&title) <= 60, "{title}");
    assert!(title.ends_with("..."));
    let opening = title.split_whitespace().take(3).collect::<Vec<_>>().join(" ");
    assert!(message.starts_with(opening.as_str()));
}

#[test]
fn topic_pair_title() {
    let title = composer().generate_title(
        &[Message::user("Me gusta la programación y la música")],
        &TitleOptions::default(),
    );
    assert_eq!(title, "Programación y música");
}

#[test]
fn locked_title_never_needs_update() {
    let composer = composer();
    let policy = composer.update_policy();
    let mut conv = Conversation::new("c").with_messages(vec![
        Message::user("hola"),
        Message::assistant("hola"),
        Message::user("hablemos de música"),
        Message::assistant("claro"),
        Message::user("y de historia"),
    ]);
    conv.set_manual_title("Mi título");
    assert!(!policy.needs_title_update(&conv));

    conv.clear_manual_lock();
    conv.messages.push(Message::user("y de filosofía"));
    conv.messages.push(Message::assistant("vale"));
    conv.messages.push(Message::user("y de política"));
    assert!(policy.needs_title_update(&conv));
}

#[test]
fn specialized_terms_outrank_common_ones() {
    let registry = LanguageRegistry::default();
    let ranker = SignificantWordRanker::new(Arc::new(FrequencyTable::builtin()));
    let ranked = ranker.rank("información automatización", registry.profile(Language::Es));
    assert_eq!(ranked[0].term, "automatización");
    assert_eq!(ranked[1].term, "información");
}

#[test]
fn entities_are_capped_and_unique() {
    let local: Vec<_> = (0..20)
        .map(|i| json!({"name": format!("Entity{i}"), "type": "concept", "confidence": 0.9}))
        .collect();
    let global: Vec<_> = (0..5)
        .map(|i| json!({"name": format!("ENTITY{i}"), "type": "concept", "confidence": 0.9}))
        .collect();
    let raw = json!({"entities": local, "globalMemory": {"entities": global}});

    let context = ContextNormalizer::new(ContextLimits::default())
        .normalize(ContextMap::from_value(&raw).unwrap());

    assert_eq!(context.entities.len(), 8);
    let mut keys: Vec<String> = context.entities.iter().map(|e| e.name.to_lowercase()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 8);
}

#[test]
fn prompt_survives_missing_entity_template() {
    let templates = builtin_templates()
        .into_iter()
        .filter(|t| t.name != builtin::ENTITY_PROCESSING);
    let assembler = PromptAssembler::new(
        Arc::new(TemplateStore::from_templates(templates)),
        Arc::new(LanguageRegistry::default()),
        ContextLimits::default(),
        PromptConfig::default(),
    );
    let raw = json!({
        "currentMessage": "Hola",
        "entities": [{"name": "Rust", "type": "language", "confidence": 0.9}],
        "recentMessages": [
            {"role": "user", "content": "Hola"},
            {"role": "bot", "content": "¡Hola!"}
        ]
    });

    let messages = assembler.build_prompt(&raw, &UserConfig::default());

    assert_eq!(messages[0].role, MessageRole::System);
    assert!(messages[0].content.contains("helpful and knowledgeable"));
    assert!(messages[0].content.contains("Markdown"));
    assert!(!messages[0].content.contains("Rust"));
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].role, MessageRole::Assistant);
}

#[test]
fn detection_and_snippets() {
    let detector = LanguageDetector::new(Arc::new(LanguageRegistry::default()));
    assert_eq!(detector.detect_code("What is the meaning of this?"), "en");
    assert_eq!(detector.detect_code("¿Cuál es el sentido de esto?"), "es");
    assert_eq!(detector.detect_code(""), "es");

    let messages = vec![
        Message::user("Hablemos de cocina"),
        Message::assistant("La receta lleva tomate"),
    ];
    let snippet = find_snippet(&messages, "RECETA", 20).unwrap();
    assert_eq!(snippet.message_index, 1);
    assert!(snippet.text.contains("receta"));
}
