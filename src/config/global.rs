//! Global configuration file (`~/.depsync/config.toml`).
//!
//! Lets a user or a CI image change the defaults once instead of passing
//! flags on every run:
//!
//! ```toml
//! # Where vendored projects live, relative to the project root
//! vendor-dir = "vendor"
//!
//! # Lock file name in every project
//! lockfile = "Gopkg.lock"
//!
//! # Resolver used to reconverge after --fix
//! resolver = ["dep", "ensure", "-v"]
//! ```
//!
//! Every key is optional. A missing file is the same as an empty one.
//!
//! # Location
//!
//! 1. `--config <PATH>` on the command line
//! 2. the `DEPSYNC_CONFIG` environment variable
//! 3. `~/.depsync/config.toml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use crate::core::DepsyncError;
use crate::utils::platform::get_home_dir;

/// Contents of the global configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GlobalConfig {
    /// Vendor root, relative to the project root unless absolute.
    /// `~` and environment variables are expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_dir: Option<String>,

    /// Lock file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lockfile: Option<String>,

    /// Resolver argv, program first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolver: Option<Vec<String>>,
}

impl GlobalConfig {
    /// Load from an explicit path, or from the default location.
    ///
    /// An explicit path must exist. The default location (environment
    /// override or home directory) is optional and yields an empty
    /// configuration when absent.
    ///
    /// # Errors
    ///
    /// [`DepsyncError::Config`] if the file cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(&path).await;
        }

        let path = match std::env::var_os(CONFIG_ENV_VAR) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => match Self::default_path() {
                Ok(path) => path,
                Err(e) => {
                    tracing::debug!("No default config location: {e:#}");
                    return Ok(Self::default());
                }
            },
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// [`DepsyncError::Config`] if the file cannot be read or parsed.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let config_error = |reason: String| DepsyncError::Config {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| config_error(e.to_string()))
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| config_error(e.message().to_string()))
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Default config file location: `~/.depsync/config.toml`.
    ///
    /// # Errors
    ///
    /// Fails when the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        Ok(get_home_dir()?.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}
