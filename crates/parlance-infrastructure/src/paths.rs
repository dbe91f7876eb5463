//! Path resolution for Parlance files.
//!
//! ```text
//! ~/.config/parlance/
//! ├── config.toml        # ParlanceConfig
//! ├── templates/         # prompt templates (AsyncDirStorage, TOML)
//! └── conversations/     # conversation records (AsyncDirStorage, JSON)
//! ```

use parlance_core::error::{ParlanceError, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "parlance";
const CONFIG_FILE: &str = "config.toml";

/// Resolves the locations Parlance reads from.
///
/// Paths hang off the platform config directory unless a base directory is
/// given explicitly, which tests and the `--config-dir` flag use.
#[derive(Debug, Clone)]
pub struct ParlancePaths {
    base_dir: PathBuf,
}

impl ParlancePaths {
    /// Paths under the platform config directory (`~/.config/parlance` on Linux).
    ///
    /// # Errors
    ///
    /// Returns an `Io` error when the config directory cannot be determined.
    pub fn platform() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ParlanceError::io("Cannot find config directory"))?;
        Ok(Self::with_base(config_dir.join(APP_DIR)))
    }

    /// Paths under an explicit base directory.
    pub fn with_base(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }
}
