//! Test utilities for depsync
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration test suite.
//!
//! - [`LockfileFixture`] builds `Gopkg.lock` content in the layout `dep` writes
//! - [`TestProject`] lays out a project root with a vendor directory
//! - [`init_test_logging`] routes `tracing` output to the test harness
//!
//! # Example
//!
//! ```rust,no_run
//! use depsync_cli::test_utils::{LockfileFixture, TestProject};
//!
//! # fn example(root: &std::path::Path) -> anyhow::Result<()> {
//! let project = TestProject::new(root);
//! project.write_local_lock(&LockfileFixture::new().project("github.com/a/b", "rev1").to_toml())?;
//! project.write_vendored_lock(
//!     "github.com/me/lib",
//!     &LockfileFixture::new().project("github.com/a/b", "rev2").to_toml(),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod fixtures;

pub use fixtures::{LockfileFixture, TestProject};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging
/// stays off. Safe to call from every test.
///
/// ```bash
/// RUST_LOG=depsync_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
