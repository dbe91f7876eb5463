//! Core domain of Parlance.
//!
//! Two pipelines share the types in this crate:
//!
//! - **prompt assembly**: a raw context map is normalized into a bounded
//!   [`EnhancedContext`](context::EnhancedContext) and rendered through named
//!   templates into a system message followed by trimmed history
//!   ([`prompt::PromptAssembler`])
//! - **conversation titles**: opening messages, topics, entities and
//!   significant words become a bounded title that is refined as the
//!   conversation grows ([`title::TitleComposer`],
//!   [`title::TitleUpdatePolicy`])
//!
//! Everything here is synchronous and free of global state except the
//! repository traits, which are the async boundary to storage.

pub mod analysis;
pub mod config;
pub mod context;
pub mod conversation;
pub mod error;
pub mod language;
pub mod prompt;
pub mod template;
pub mod text;
pub mod title;

pub use config::ParlanceConfig;
pub use error::{ParlanceError, Result};
