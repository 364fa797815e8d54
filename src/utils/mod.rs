//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`fs`] - Atomic writes and vendor directory inspection
//! - [`platform`] - Home directory, path expansion and Go package paths

pub mod fs;
pub mod platform;

pub use fs::{VendorEntry, atomic_write, inspect_vendor_entry};
pub use platform::{get_home_dir, package_path, resolve_path};
