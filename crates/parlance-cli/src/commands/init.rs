use super::input::print_json;
use anyhow::{Context, Result};
use parlance_core::config::ParlanceConfig;
use parlance_infrastructure::{AsyncDirTemplateRepository, ConfigService, ParlancePaths};
use serde_json::json;

/// Writes a default `config.toml` unless one exists (or `force` is set) and
/// seeds the built-in templates.
pub async fn run(paths: &ParlancePaths, config_service: &ConfigService, force: bool) -> Result<()> {
    let config_written = force || !tokio::fs::try_exists(config_service.path()).await?;
    if config_written {
        config_service
            .save(&ParlanceConfig::default())
            .await
            .with_context(|| format!("Failed to write {}", config_service.path().display()))?;
        tracing::info!(path = %config_service.path().display(), "wrote default configuration");
    }

    let templates = AsyncDirTemplateRepository::new(paths.base_dir()).await?;
    let seeded = templates.seed_builtin().await?;

    print_json(&json!({
        "config": config_service.path(),
        "configWritten": config_written,
        "templates": templates.dir(),
        "seededTemplates": seeded,
    }))
}
