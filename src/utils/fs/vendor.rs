//! Vendor directory inspection.

use std::io::{self, ErrorKind};
use std::path::Path;

/// What lives at a path under the vendor directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorEntry {
    /// Nothing at that path
    Missing,
    /// Something that is not a directory (a file, a socket, ...)
    NotDirectory,
    /// A directory, as a vendored project should be
    Directory,
}

/// Classify `path` as a vendored project candidate.
///
/// Symlinks are followed, so a vendored project that is a link to a
/// directory counts as a directory.
///
/// # Errors
///
/// Any I/O error other than "not found" from the underlying `stat`.
pub fn inspect_vendor_entry(path: &Path) -> io::Result<VendorEntry> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(VendorEntry::Directory),
        Ok(_) => Ok(VendorEntry::NotDirectory),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(VendorEntry::Missing),
        Err(e) => Err(e),
    }
}
