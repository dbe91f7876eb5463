use super::FrequencyTable;
use crate::language::LanguageProfile;
use crate::text::{char_len, word_tokens};
use serde::Serialize;
use std::sync::Arc;

/// Minimum token length (in chars) a word needs to be considered.
const MIN_WORD_CHARS: usize = 4;

/// A term with its TF-IDF score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTerm {
    pub term: String,
    pub score: f64,
}

/// TF-IDF ranking of the words in a text against a [`FrequencyTable`].
#[derive(Debug, Clone)]
pub struct SignificantWordRanker {
    table: Arc<FrequencyTable>,
}

impl SignificantWordRanker {
    pub fn new(table: Arc<FrequencyTable>) -> Self {
        Self { table }
    }

    /// Tokens of `text` that survive stop-word and length filtering.
    pub fn tokenize(text: &str, profile: &LanguageProfile) -> Vec<String> {
        word_tokens(text)
            .into_iter()
            .filter(|t| char_len(t) >= MIN_WORD_CHARS && !profile.is_common_word(t))
            .collect()
    }

    /// Scores every distinct term of `text`, highest first.
    ///
    /// Ties keep the order in which the terms first appear.
    pub fn rank(&self, text: &str, profile: &LanguageProfile) -> Vec<RankedTerm> {
        let tokens = Self::tokenize(text, profile);
        if tokens.is_empty() {
            return Vec::new();
        }
        let total = tokens.len() as f64;

        // (term, count) in first-encounter order
        let mut counts: Vec<(String, usize)> = Vec::new();
        for token in tokens {
            match counts.iter_mut().find(|(t, _)| *t == token) {
                Some((_, n)) => *n += 1,
                None => counts.push((token, 1)),
            }
        }

        let mut ranked: Vec<RankedTerm> = counts
            .into_iter()
            .map(|(term, count)| {
                let tf = count as f64 / total;
                let score = tf * self.table.idf(&term);
                RankedTerm { term, score }
            })
            .collect();

        // stable sort keeps encounter order among equal scores
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// The `n` most significant terms of `text`.
    pub fn top_terms(&self, text: &str, profile: &LanguageProfile, n: usize) -> Vec<String> {
        self.rank(text, profile)
            .into_iter()
            .take(n)
            .map(|r| r.term)
            .collect()
    }
}
