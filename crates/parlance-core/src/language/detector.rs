//! Marker-word language detection.

use super::{Language, LanguageRegistry};
use crate::text::word_tokens;
use std::sync::Arc;

/// Scores text against every registered profile's marker words.
///
/// Each marker occurrence (whole-word match) counts one point; a profile
/// whose characteristic characters appear anywhere in the text gets its
/// fixed bonus on top. The highest score wins and ties go to the default
/// language.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    registry: Arc<LanguageRegistry>,
}

impl LanguageDetector {
    pub fn new(registry: Arc<LanguageRegistry>) -> Self {
        Self { registry }
    }

    /// Detects the language of `text`.
    pub fn detect(&self, text: &str) -> Language {
        let tokens = word_tokens(text);
        let lowered = text.to_lowercase();

        let mut best = self.registry.default_language();
        let mut best_score = None;

        for profile in self.registry.profiles() {
            let mut score = tokens
                .iter()
                .filter(|t| profile.markers.contains(t.as_str()))
                .count();
            if !profile.special_chars.is_empty()
                && lowered.chars().any(|c| profile.special_chars.contains(c))
            {
                score += profile.special_char_bonus;
            }

            // profiles() yields the default first, so strict comparison
            // keeps ties on the default
            if best_score.is_none_or(|b| score > b) {
                best = profile.language;
                best_score = Some(score);
            }
        }

        tracing::trace!(?best, score = ?best_score, "language detected");
        best
    }

    /// Detects the language of `text` and returns its code.
    pub fn detect_code(&self, text: &str) -> &'static str {
        match self.detect(text) {
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> LanguageDetector {
        LanguageDetector::new(Arc::new(LanguageRegistry::builtin(Language::Es)))
    }

    #[test]
    fn detects_spanish() {
        assert_eq!(
            detector().detect("Hola, ¿cómo estás? Quiero saber sobre la historia"),
            Language::Es
        );
    }

    #[test]
    fn detects_english() {
        assert_eq!(
            detector().detect("Hello, can you tell me what the weather is like?"),
            Language::En
        );
    }

    #[test]
    fn special_characters_tip_the_balance() {
        // "the" scores one for English, the ñ bonus outweighs it
        assert_eq!(detector().detect("the niño"), Language::Es);
    }

    #[test]
    fn tie_goes_to_default() {
        assert_eq!(detector().detect("xyz abc"), Language::Es);
        assert_eq!(detector().detect(""), Language::Es);

        let english_default =
            LanguageDetector::new(Arc::new(LanguageRegistry::builtin(Language::En)));
        assert_eq!(english_default.detect("xyz abc"), Language::En);
    }

    #[test]
    fn detect_code_matches_language() {
        assert_eq!(detector().detect_code("What is the meaning of this?"), "en");
        assert_eq!(detector().detect_code("¿Qué significa esto?"), "es");
    }
}
