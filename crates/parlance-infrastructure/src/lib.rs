//! Storage and environment adapters for Parlance.
//!
//! - `paths`: where configuration and templates live
//! - `config_service`: `config.toml` loading with environment overrides
//! - `async_dir_template_repository`: one TOML file per prompt template
//! - `async_dir_conversation_repository`: one JSON record per conversation
//! - `memory_repository`: map-backed repositories
//! - `dto`: versioned storage representations

pub mod async_dir_conversation_repository;
pub mod async_dir_template_repository;
pub mod config_service;
pub mod dto;
pub mod memory_repository;
pub mod paths;
mod storage;

pub use crate::async_dir_conversation_repository::AsyncDirConversationRepository;
pub use crate::async_dir_template_repository::AsyncDirTemplateRepository;
pub use crate::config_service::ConfigService;
pub use crate::memory_repository::{InMemoryConversationRepository, InMemoryTemplateRepository};
pub use crate::paths::ParlancePaths;
