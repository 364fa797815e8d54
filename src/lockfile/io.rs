//! I/O operations for lock file loading and saving.
//!
//! Loading classifies failures into the depsync error taxonomy (missing vs.
//! malformed); saving goes through an atomic temp-file + rename.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::constants::LOCKFILE_HEADER;
use crate::core::{DepsyncError, LockOwner};
use crate::utils::fs::atomic_write;

use super::LockFile;
use super::helpers::serialize_with_multiline_arrays;

impl LockFile {
    /// Load a lock file from disk.
    ///
    /// `owner` only affects error messages: it says whose lock file this is.
    ///
    /// # Errors
    ///
    /// - [`DepsyncError::MissingLockFile`] if `path` does not exist
    /// - [`DepsyncError::MalformedLockFile`] if it cannot be read or is not
    ///   valid lock file TOML
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use depsync_cli::core::LockOwner;
    /// use depsync_cli::lockfile::LockFile;
    /// use std::path::Path;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let lockfile = LockFile::load(Path::new("Gopkg.lock"), LockOwner::CurrentDir)?;
    /// println!("{} projects pinned", lockfile.projects.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(path: &Path, owner: LockOwner) -> Result<Self> {
        let file = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DepsyncError::MissingLockFile {
                    owner,
                    file,
                }
                .into());
            }
            Err(e) => {
                return Err(DepsyncError::MalformedLockFile {
                    owner,
                    file,
                    reason: e.to_string(),
                }
                .into());
            }
        };

        let lockfile = Self::from_toml_str(&content).map_err(|e| DepsyncError::MalformedLockFile {
            owner,
            file,
            reason: e.message().to_string(),
        })?;

        tracing::debug!("Loaded {} ({} projects)", path.display(), lockfile.projects.len());
        Ok(lockfile)
    }

    /// Parse lock file TOML.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Render the lock file as it is written to disk, header comment included.
    pub fn to_toml_string(&self) -> Result<String> {
        let mut content = String::from(LOCKFILE_HEADER);
        content.push_str(&serialize_with_multiline_arrays(self)?);
        Ok(content)
    }

    /// Save the lock file atomically.
    ///
    /// The content is staged in a sibling `<name>.new` file and renamed over
    /// `path`. If anything fails the staging file is removed and `path` is
    /// left exactly as it was.
    ///
    /// # Errors
    ///
    /// [`DepsyncError::Persist`] on serialization, write or rename failure.
    pub fn save(&self, path: &Path) -> Result<()> {
        let persist_error = |reason: String| DepsyncError::Persist {
            file: path.display().to_string(),
            reason,
        };

        let content = self.to_toml_string().map_err(|e| persist_error(format!("{e:#}")))?;

        atomic_write(path, content.as_bytes())
            .map_err(|e| persist_error(format!("{e:#}")))
            .with_context(|| format!("Failed to save {}", path.display()))?;

        tracing::debug!("Wrote {} ({} projects)", path.display(), self.projects.len());
        Ok(())
    }
}
