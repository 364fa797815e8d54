//! File system utilities
//!
//! - [`atomic_write`] replaces a file through a staging sibling and a rename
//! - [`inspect_vendor_entry`] tells a vendored project directory apart from a
//!   missing entry or a stray file

pub mod atomic;
pub mod vendor;

pub use atomic::{atomic_write, staging_path};
pub use vendor::{VendorEntry, inspect_vendor_entry};
