//! Snippet lookup over a message list.

use super::{Message, MessageRole};
use serde::Serialize;

/// An excerpt of a message around a search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    /// Position of the message in the searched list
    pub message_index: usize,
    pub role: MessageRole,
    /// Excerpt with `...` marking cut ends
    pub text: String,
}

/// Finds the first case-insensitive occurrence of `term` and returns up to
/// `radius` characters of context on each side.
pub fn find_snippet(messages: &[Message], term: &str, radius: usize) -> Option<Snippet> {
    find_snippets(messages, term, radius).into_iter().next()
}

/// One snippet per message that contains `term`, in message order.
pub fn find_snippets(messages: &[Message], term: &str, radius: usize) -> Vec<Snippet> {
    let needle = lower_chars(term.trim());
    if needle.is_empty() {
        return Vec::new();
    }

    messages
        .iter()
        .enumerate()
        .filter_map(|(index, message)| {
            excerpt(&message.content, &needle, radius).map(|text| Snippet {
                message_index: index,
                role: message.role,
                text,
            })
        })
        .collect()
}

/// Lower-cases char by char so positions line up with the original text.
fn lower_chars(s: &str) -> Vec<char> {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn excerpt(content: &str, needle: &[char], radius: usize) -> Option<String> {
    let original: Vec<char> = content.chars().collect();
    let haystack = lower_chars(content);
    let start = haystack
        .windows(needle.len())
        .position(|window| window == needle)?;
    let end = start + needle.len();

    let from = start.saturating_sub(radius);
    let to = (end + radius).min(original.len());

    let mut text = String::new();
    if from > 0 {
        text.push_str("...");
    }
    text.extend(&original[from..to]);
    if to < original.len() {
        text.push_str("...");
    }
    Some(text)
}
