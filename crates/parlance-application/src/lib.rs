//! Application layer for Parlance.
//!
//! Use cases coordinating the core pipelines with storage: prompt assembly
//! over a preloaded template snapshot and the conversation title refresh
//! cycle.

pub mod prompt_service;
pub mod services;
pub mod title_service;

pub use prompt_service::PromptService;
pub use services::ParlanceServices;
pub use title_service::TitleService;
