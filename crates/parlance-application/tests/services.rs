use parlance_application::ParlanceServices;
use parlance_core::config::ParlanceConfig;
use parlance_core::conversation::{Conversation, ConversationRepository, Message};
use parlance_core::language::Language;
use parlance_core::prompt::UserConfig;
use parlance_core::template::TemplateRepository;
use parlance_infrastructure::{
    AsyncDirConversationRepository, AsyncDirTemplateRepository, ParlancePaths,
};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn open_seeds_templates_and_refreshes_stored_titles() {
    let dir = TempDir::new().unwrap();
    let paths = ParlancePaths::with_base(dir.path());
    let services = ParlanceServices::open(&paths, ParlanceConfig::default())
        .await
        .unwrap();

    let templates = AsyncDirTemplateRepository::new(paths.base_dir())
        .await
        .unwrap();
    assert!(templates.get_template("base_system").await.unwrap().is_some());

    let prompt = services.prompts.build_prompt(
        &json!({
            "currentMessage": "Hola",
            "entities": [{"name": "Ada Lovelace", "type": "person", "confidence": 0.95}]
        }),
        &UserConfig::default(),
    );
    assert!(prompt[0].content.contains("- Ada Lovelace (person)"));

    let conversations = AsyncDirConversationRepository::new(paths.base_dir())
        .await
        .unwrap();
    conversations
        .save(&Conversation::new("c1").with_messages(vec![Message::user(
            "Me gusta la programación y la música",
        )]))
        .await
        .unwrap();

    let title = services.titles.refresh_title("c1", None).await;
    assert_eq!(title, "Programación y música");

    let stored = conversations.find_by_id("c1").await.unwrap().unwrap();
    assert_eq!(stored.title.as_deref(), Some("Programación y música"));
    assert_eq!(stored.title_history.len(), 1);
}

#[tokio::test]
async fn english_default_language() {
    let config = ParlanceConfig {
        default_language: Language::En,
        ..ParlanceConfig::default()
    };
    let services = ParlanceServices::in_memory(config).await;
    assert_eq!(
        services.titles.refresh_title("missing", None).await,
        "New conversation"
    );
    assert_eq!(services.detector().detect_code("hola, ¿qué tal?"), "es");
}
