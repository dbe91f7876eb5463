use super::input::{print_json, read_conversation};
use anyhow::Result;
use parlance_core::conversation::{find_snippet, find_snippets};
use std::path::Path;

pub async fn run(path: &Path, term: &str, radius: usize, all: bool) -> Result<()> {
    let conversation = read_conversation(path).await?;
    if all {
        print_json(&find_snippets(&conversation.messages, term, radius))
    } else {
        print_json(&find_snippet(&conversation.messages, term, radius))
    }
}
