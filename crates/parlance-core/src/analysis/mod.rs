//! Lightweight text analysis: topic matching and significant-word ranking.
//!
//! Both analyzers are built once from immutable tables (a topic corpus per
//! language, a simulated document-frequency table) and are then pure
//! functions of their input text.

mod frequency;
mod ranker;
mod topics;

pub use frequency::{DEFAULT_CORPUS_SIZE, FrequencyTable};
pub use ranker::{RankedTerm, SignificantWordRanker};
pub use topics::{TopicCategory, TopicCorpus, TopicMatcher};
