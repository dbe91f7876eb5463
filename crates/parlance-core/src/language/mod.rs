//! Language dispatch table.
//!
//! Each supported language is described by one immutable [`LanguageProfile`]
//! holding its word tables, title vocabulary, topic corpus and derivation
//! strategy. Components never branch on a language code themselves; they ask
//! the [`LanguageRegistry`] for a profile and read from it.

mod detector;
mod profiles;

pub use detector::LanguageDetector;
pub use profiles::{english_forms, english_profile, spanish_forms, spanish_profile};

use crate::analysis::TopicCorpus;
use crate::error::{ParlanceError, Result};
use crate::text::fold_accents;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString};

/// Supported conversation languages, keyed by ISO 639-1 code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    /// Spanish
    #[default]
    Es,
    /// English
    En,
}

impl Language {
    /// Parses a language code, returning `None` for unsupported codes.
    ///
    /// Region suffixes are ignored, so `es-MX` and `en_US` resolve too.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .trim();
        Language::from_str(primary).ok()
    }
}

/// Derives inflected surface forms from a base word.
pub type DerivationFn = fn(&str) -> Vec<String>;

/// Immutable per-language resource bundle.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    /// The language this profile describes
    pub language: Language,
    /// English name used when instructing the model to answer in this language
    pub display_name: String,
    /// Marker words used by the detector
    pub markers: HashSet<String>,
    /// Characters that only this language uses (e.g. `ñ`, `¿`)
    pub special_chars: String,
    /// Score bonus applied when any special character appears
    pub special_char_bonus: usize,
    /// Interrogative openers, stored accent-folded
    pub interrogatives: Vec<String>,
    /// Stop words ignored by title extraction and ranking
    pub common_words: HashSet<String>,
    /// Title used when a conversation has no user messages
    pub default_title: String,
    /// Placeholder titles that should be replaced automatically
    pub generic_titles: Vec<String>,
    /// Leading phrase for single-subject titles ("Conversación sobre")
    pub topic_prefix: String,
    /// Conjunction joining the last two items of a list ("y")
    pub conjunction: String,
    /// Suffix appended when more topics exist than fit ("y otros temas")
    pub other_topics_text: String,
    /// Categorized topic corpus
    pub topics: TopicCorpus,
    /// Morphological derivation strategy
    pub derive_forms: DerivationFn,
}

impl LanguageProfile {
    /// True when `word` (any case) is a stop word of this language.
    pub fn is_common_word(&self, word: &str) -> bool {
        self.common_words.contains(&word.to_lowercase())
    }

    /// True when `text` opens with one of this language's interrogatives.
    ///
    /// Matching is accent-insensitive and ignores leading `¿`/`¡` and quotes.
    pub fn starts_with_interrogative(&self, text: &str) -> bool {
        let folded = fold_accents(text);
        let body = folded.trim_start_matches(|c: char| !c.is_alphanumeric());
        self.interrogatives.iter().any(|word| {
            body.strip_prefix(word.as_str())
                .is_some_and(|rest| rest.chars().next().is_none_or(|c| !c.is_alphanumeric()))
        })
    }

    /// True when `title` is the default or one of the generic placeholders.
    pub fn is_generic_title(&self, title: &str) -> bool {
        let needle = title.trim().to_lowercase();
        needle == self.default_title.to_lowercase()
            || self.generic_titles.iter().any(|t| t.to_lowercase() == needle)
    }
}

/// Dispatch table from [`Language`] to [`LanguageProfile`].
///
/// Unknown or unsupported languages resolve to the configured default entry.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    profiles: Vec<LanguageProfile>,
    default: Language,
}

impl LanguageRegistry {
    /// Creates a registry from explicit profiles.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if no profile exists for `default`.
    pub fn new(profiles: Vec<LanguageProfile>, default: Language) -> Result<Self> {
        if !profiles.iter().any(|p| p.language == default) {
            return Err(ParlanceError::config(format!(
                "no language profile registered for default language '{}'",
                default
            )));
        }
        Ok(Self { profiles, default })
    }

    /// Registry with the built-in Spanish and English profiles.
    pub fn builtin(default: Language) -> Self {
        Self {
            profiles: vec![spanish_profile(), english_profile()],
            default,
        }
    }

    /// The configured default language.
    pub fn default_language(&self) -> Language {
        self.default
    }

    /// Profile of the default language.
    pub fn default_profile(&self) -> &LanguageProfile {
        self.profile(self.default)
    }

    /// Profile for `language`, or the default profile when it is not registered.
    pub fn profile(&self, language: Language) -> &LanguageProfile {
        self.profiles
            .iter()
            .find(|p| p.language == language)
            .or_else(|| self.profiles.iter().find(|p| p.language == self.default))
            .unwrap_or(&self.profiles[0])
    }

    /// Profile for a raw language code; unknown codes resolve to the default.
    pub fn profile_for_code(&self, code: &str) -> &LanguageProfile {
        match Language::from_code(code) {
            Some(language) => self.profile(language),
            None => {
                tracing::debug!(code, "unknown language code, using default profile");
                self.default_profile()
            }
        }
    }

    /// All registered profiles, default first.
    pub fn profiles(&self) -> impl Iterator<Item = &LanguageProfile> {
        let default = self.default;
        self.profiles
            .iter()
            .filter(move |p| p.language == default)
            .chain(self.profiles.iter().filter(move |p| p.language != default))
    }

    /// True when `title` is generic in any registered language.
    pub fn is_generic_title(&self, title: &str) -> bool {
        self.profiles.iter().any(|p| p.is_generic_title(title))
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::builtin(Language::default())
    }
}
