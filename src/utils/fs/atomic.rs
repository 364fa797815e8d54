//! Atomic file write operations using temp-and-rename strategy.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::constants::STAGING_SUFFIX;

/// Path of the staging file used when atomically replacing `path`.
///
/// The staging file is a sibling named `<file name>.new`, so the final
/// rename never crosses a file system boundary.
#[must_use]
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(STAGING_SUFFIX);
    path.with_file_name(name)
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// 1. Write `content` to the staging sibling (see [`staging_path`])
/// 2. Sync it to disk
/// 3. Rename it over `path`
///
/// Readers see either the old file or the new one, never a partial write.
/// On any failure the staging file is removed and `path` is not touched.
///
/// # Examples
///
/// ```rust,no_run
/// use depsync_cli::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// atomic_write(Path::new("Gopkg.lock"), b"[[projects]]\n")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = staging_path(path);

    let result = write_and_rename(&temp_path, path, content);
    if result.is_err() {
        // The staging path may be something we never created (a directory in
        // the way, for instance); only a regular file is ours to remove.
        if fs::symlink_metadata(&temp_path).is_ok_and(|m| m.is_file()) {
            let _ = fs::remove_file(&temp_path);
        }
    }
    result
}

fn write_and_rename(temp_path: &Path, path: &Path, content: &[u8]) -> Result<()> {
    {
        let mut file = fs::File::create(temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        file.sync_all().with_context(|| "Failed to sync file to disk")?;
    }

    fs::rename(temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}
