//! Named prompt templates.
//!
//! Templates are plain text with `{{placeholder}}` tokens. They live in an
//! external [`TemplateRepository`] and are read once into an immutable
//! [`TemplateStore`] when the prompt pipeline is built.

pub mod builtin;
mod model;
mod repository;
mod store;

pub use builtin::builtin_templates;
pub use model::Template;
pub use repository::TemplateRepository;
pub use store::TemplateStore;
