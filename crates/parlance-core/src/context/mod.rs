//! Retrieved context for a generation request.
//!
//! - `model`: the raw, loosely-typed [`ContextMap`] as produced by the
//!   extraction and memory collaborators
//! - `normalizer`: filtering and capping into a bounded [`EnhancedContext`]

mod model;
mod normalizer;

pub use model::{
    ContextMap, DocumentSummary, Entity, EntityRef, GlobalMemory, MemoryContext, MemoryItem,
    MessageStructure, SentimentAnalysis, TopicItem,
};
pub use normalizer::{ContextLimits, ContextNormalizer, EnhancedContext};
