//! Error types for the Parlance core.

use thiserror::Error;

/// A shared error type for the entire Parlance workspace.
///
/// The prompt and title operations never surface these to their callers;
/// they are produced by the fallible steps underneath (context parsing,
/// template lookup, storage) and turned into a degraded result at the
/// boundary.
#[derive(Error, Debug, Clone)]
pub enum ParlanceError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// The raw context map could not be interpreted
    #[error("Malformed context: {0}")]
    MalformedContext(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Versioned record could not be migrated to the current schema
    #[error("Migration error: {0}")]
    Migration(String),
}

impl ParlanceError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Serialization error
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a MalformedContext error
    pub fn malformed_context(message: impl Into<String>) -> Self {
        Self::MalformedContext(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ParlanceError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            return Self::not_found("file", err.to_string());
        }
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ParlanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ParlanceError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ParlanceError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<version_migrate::MigrationError> for ParlanceError {
    fn from(err: version_migrate::MigrationError) -> Self {
        use version_migrate::MigrationError;

        match err {
            MigrationError::EntityNotFound(id) => Self::not_found("entity", id),
            MigrationError::DeserializationError(_) | MigrationError::SerializationError(_) => {
                Self::serialization("migration", err.to_string())
            }
            MigrationError::TomlParseError(_) | MigrationError::TomlSerializeError(_) => {
                Self::serialization("TOML", err.to_string())
            }
            MigrationError::Store(version_migrate::StoreError::IoError { .. }) => Self::io(err.to_string()),
            _ => Self::Migration(err.to_string()),
        }
    }
}

/// A type alias for `Result<T, ParlanceError>`.
pub type Result<T> = std::result::Result<T, ParlanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let err: ParlanceError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml").into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_json_error_is_serialization() {
        let err: ParlanceError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.is_serialization());
        assert!(err.to_string().starts_with("Serialization error: JSON"));
    }
}
