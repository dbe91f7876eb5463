//! Reading JSON inputs from files or stdin.

use anyhow::{Context, Result, bail};
use parlance_core::context::Entity;
use parlance_core::conversation::{Conversation, Message};
use parlance_infrastructure::dto::{
    conversation_from_json, conversation_to_json, create_conversation_migrator,
};
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Id given to conversations read from a bare message array.
const ANONYMOUS_ID: &str = "anonymous";

pub async fn read_json(path: &Path) -> Result<Value> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Accepts a conversation record or a bare array of messages.
pub async fn read_conversation(path: &Path) -> Result<Conversation> {
    match read_json(path).await? {
        Value::Array(items) => {
            let messages: Vec<Message> = serde_json::from_value(Value::Array(items))
                .context("Invalid message list")?;
            Ok(Conversation::new(ANONYMOUS_ID).with_messages(messages))
        }
        value @ Value::Object(_) => {
            let migrator = create_conversation_migrator()?;
            conversation_from_json(&migrator, value).context("Invalid conversation record")
        }
        _ => bail!(
            "{}: expected a conversation object or a message array",
            path.display()
        ),
    }
}

pub async fn read_entities(path: Option<&Path>) -> Result<Option<Vec<Entity>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let entities = serde_json::from_value(read_json(path).await?)
        .with_context(|| format!("Invalid entity list in {}", path.display()))?;
    Ok(Some(entities))
}

pub async fn write_conversation(path: &Path, conversation: &Conversation) -> Result<()> {
    if path == Path::new("-") {
        bail!("cannot write back a conversation read from stdin");
    }
    let migrator = create_conversation_migrator()?;
    let record: Value = serde_json::from_str(&conversation_to_json(&migrator, conversation)?)?;
    let json = serde_json::to_string_pretty(&record)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
