use super::input::{print_json, read_json};
use anyhow::Result;
use parlance_application::ParlanceServices;
use parlance_core::prompt::UserConfig;
use std::path::Path;

pub async fn run(
    services: &ParlanceServices,
    context: &Path,
    system_prompt: Option<String>,
    language: Option<String>,
) -> Result<()> {
    let raw = read_json(context).await?;
    let user = UserConfig {
        system_prompt,
        language,
    };
    let messages = services.prompts.build_prompt(&raw, &user);
    print_json(&messages)
}
