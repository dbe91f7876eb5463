//! Loading of `config.toml`.

use crate::paths::ParlancePaths;
use parlance_core::config::ParlanceConfig;
use parlance_core::error::{ParlanceError, Result};
use parlance_core::language::Language;
use std::path::{Path, PathBuf};

/// Environment variable overriding `default_language`.
pub const DEFAULT_LANGUAGE_ENV: &str = "PARLANCE_DEFAULT_LANGUAGE";

/// Reads [`ParlanceConfig`] from a TOML file and applies environment overrides.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Service for `config.toml` under `paths`.
    pub fn new(paths: &ParlancePaths) -> Self {
        Self {
            path: paths.config_file(),
        }
    }

    /// Service for an explicit file.
    pub fn with_file(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration.
    ///
    /// A missing or empty file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when the file exists but cannot be parsed or
    /// the environment names an unsupported language, and an `Io` error when
    /// it cannot be read.
    pub async fn load(&self) -> Result<ParlanceConfig> {
        let mut config = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => ParlanceConfig::from_toml_str(&content).map_err(|e| {
                ParlanceError::config(format!("{}: {}", self.path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no config file, using defaults");
                ParlanceConfig::default()
            }
            Err(e) => {
                return Err(ParlanceError::io(format!(
                    "Failed to read config file {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if let Ok(code) = std::env::var(DEFAULT_LANGUAGE_ENV) {
            apply_language_override(&mut config, &code)?;
        }
        Ok(config)
    }

    /// Writes `config` to the file, creating parent directories.
    pub async fn save(&self, config: &ParlanceConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, config.to_toml_string()?).await?;
        Ok(())
    }
}

fn apply_language_override(config: &mut ParlanceConfig, code: &str) -> Result<()> {
    let code = code.trim();
    if code.is_empty() {
        return Ok(());
    }
    let language = Language::from_code(code).ok_or_else(|| {
        ParlanceError::config(format!("{DEFAULT_LANGUAGE_ENV}: unsupported language '{code}'"))
    })?;
    tracing::debug!(%language, "default language overridden from environment");
    config.default_language = language;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(&ParlancePaths::with_base(dir.path()));
        let config = service.load().await.unwrap();
        assert_eq!(config.context, ParlanceConfig::default().context);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(&ParlancePaths::with_base(dir.path().join("nested")));

        let mut config = ParlanceConfig::default();
        config.title.max_title_length = 42;
        service.save(&config).await.unwrap();

        assert_eq!(service.load().await.unwrap().title.max_title_length, 42);
    }

    #[tokio::test]
    async fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "[title\n").await.unwrap();

        let err = ConfigService::with_file(&path).load().await.unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_language_override() {
        let mut config = ParlanceConfig::default();
        apply_language_override(&mut config, "en-US").unwrap();
        assert_eq!(config.default_language, Language::En);

        apply_language_override(&mut config, " ").unwrap();
        assert_eq!(config.default_language, Language::En);

        assert!(apply_language_override(&mut config, "klingon").unwrap_err().is_config());
    }
}
