use serde::{Deserialize, Serialize};

/// Title engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    /// Hard cap for any title, in chars
    pub max_title_length: usize,
    /// Cap for titles built from the opening message
    pub max_message_title_length: usize,
    /// Word cap for titles built from the opening message
    pub max_title_words: usize,
    /// Leading words of the opening message always kept
    pub preserved_leading_words: usize,
    /// Messages that must arrive after the last title before it is refreshed
    pub min_update_messages: usize,
    /// Conversation size below which cadence never triggers a refresh
    pub min_messages_for_update: usize,
    /// Significant words used for a ranked title
    pub ranked_words: usize,
    /// People or organizations named in an entity title
    pub max_title_entities: usize,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            max_title_length: 70,
            max_message_title_length: 60,
            max_title_words: 10,
            preserved_leading_words: 3,
            min_update_messages: 3,
            min_messages_for_update: 4,
            ranked_words: 3,
            max_title_entities: 2,
        }
    }
}
