use super::input::{print_json, read_conversation, read_entities, write_conversation};
use anyhow::{Result, bail};
use parlance_application::ParlanceServices;
use parlance_core::language::Language;
use parlance_core::title::TitleOptions;
use serde_json::json;
use std::path::Path;

pub async fn generate(
    services: &ParlanceServices,
    path: &Path,
    language: Option<&str>,
) -> Result<()> {
    let conversation = read_conversation(path).await?;
    let language = match language {
        Some(code) => match Language::from_code(code) {
            Some(language) => Some(language),
            None => bail!("unsupported language '{code}'"),
        },
        None => conversation.language.as_deref().and_then(Language::from_code),
    };
    let title = services
        .titles
        .generate_title(&conversation.messages, &TitleOptions { language });
    println!("{title}");
    Ok(())
}

pub async fn improve(
    services: &ParlanceServices,
    path: &Path,
    entities: Option<&Path>,
    write: bool,
) -> Result<()> {
    let mut conversation = read_conversation(path).await?;
    let entities = read_entities(entities).await?;
    let title = services
        .titles
        .improve_title(&mut conversation, entities.as_deref());
    if write {
        write_conversation(path, &conversation).await?;
    }
    println!("{title}");
    Ok(())
}

pub async fn needs_update(services: &ParlanceServices, path: &Path) -> Result<()> {
    let conversation = read_conversation(path).await?;
    print_json(&json!({
        "id": conversation.id,
        "title": conversation.title,
        "needsUpdate": services.titles.needs_title_update(&conversation),
    }))
}

pub async fn refresh(
    services: &ParlanceServices,
    id: &str,
    entities: Option<&Path>,
) -> Result<()> {
    let entities = read_entities(entities).await?;
    let title = services.titles.refresh_title(id, entities.as_deref()).await;
    println!("{title}");
    Ok(())
}
