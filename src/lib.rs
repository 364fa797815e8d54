//! depsync - keep `dep` lock files in step with vendored projects
//!
//! A Go program that vendors one of its own libraries usually wants to build
//! against the same dependency revisions that library was tested with. depsync
//! compares the revisions pinned in the current project's `Gopkg.lock` with the
//! ones in `vendor/<project>/Gopkg.lock` and either reports the differences or
//! adopts the vendored project's revisions and re-runs the resolver.
//!
//! # Architecture Overview
//!
//! - [`lockfile`] - `Gopkg.lock` model, loading and atomic saving
//! - [`diff`] - revision comparison of two lock files, with an optional
//!   per-mismatch callback
//! - [`reconcile`] - the driver: vendor check, report or fix, reconverge
//! - [`resolver`] - the external resolver (`dep ensure`) behind a trait
//!
//! ## Supporting Modules
//! - [`cli`] - command-line parsing and logging setup
//! - [`config`] - defaults, `~/.depsync/config.toml` and flag overrides
//! - [`core`] - error types and user-facing error rendering
//! - [`constants`] - file names and defaults
//! - [`utils`] - atomic writes, vendor inspection and path helpers
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Report mismatches; exit 1 if any
//! depsync github.com/me/lib
//!
//! # Adopt the vendored revisions and run `dep ensure`
//! depsync --fix github.com/me/lib
//! ```
//!
//! Report output is a unified-diff style listing:
//!
//! ```text
//! --- github.com/me/app
//! +++ github.com/me/lib
//! - github.com/pkg/errors 645ef00459ed84a119197bfb8d8205042c6df63d
//! + github.com/pkg/errors 816c9085562cd7ee03e7f8188a1cfd942858cded
//! ```

// Core functionality modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

// Lock file handling
pub mod diff;
pub mod lockfile;
pub mod reconcile;
pub mod resolver;

// Supporting modules
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
