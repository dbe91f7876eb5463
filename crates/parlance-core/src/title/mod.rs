//! Adaptive conversation titles.
//!
//! [`TitleComposer`] produces a bounded title from a message list and refines
//! it as the conversation grows; [`TitleUpdatePolicy`] decides when a stored
//! title is worth recomputing at all.

mod composer;
mod config;
mod policy;

pub use composer::{TitleComposer, TitleOptions};
pub use config::TitleConfig;
pub use policy::TitleUpdatePolicy;
