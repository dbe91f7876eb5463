//! Shared setup for `AsyncDirStorage`-backed repositories.

use std::path::Path;
use tokio::fs;
use version_migrate::{
    AppPaths, AsyncDirStorage, DirStorageStrategy, FilenameEncoding, FormatStrategy,
    MigrationError, Migrator, PathStrategy,
};

use parlance_core::error::{ParlanceError, Result};

/// Opens `base_dir/<domain>/` as one-file-per-record storage.
pub(crate) async fn open_dir_storage(
    base_dir: &Path,
    domain: &str,
    migrator: Migrator,
    format: FormatStrategy,
) -> Result<AsyncDirStorage> {
    fs::create_dir_all(base_dir).await.map_err(|e| {
        ParlanceError::io(format!(
            "Failed to create base directory {}: {}",
            base_dir.display(),
            e
        ))
    })?;

    let paths =
        AppPaths::new("parlance").data_strategy(PathStrategy::CustomBase(base_dir.to_path_buf()));
    let strategy = DirStorageStrategy::default()
        .with_format(format)
        .with_filename_encoding(FilenameEncoding::Direct);

    AsyncDirStorage::new(paths, domain, migrator, strategy)
        .await
        .map_err(|e| ParlanceError::io(format!("Failed to open {domain} storage: {e}")))
}

/// Whether a storage error means the record file does not exist.
pub(crate) fn is_missing(err: &MigrationError) -> bool {
    let message = err.to_string();
    message.contains("No such file or directory")
        || message.contains("not found")
        || message.contains("cannot find")
}

/// Rejects ids that would escape the storage directory or hide the file.
pub(crate) fn validate_id(kind: &str, id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ParlanceError::data_access(format!("invalid {kind} '{id}'")))
    }
}
