//! Command-line interface for depsync.
//!
//! depsync takes a single vendored project and compares the revisions it pins
//! with the ones pinned by the project in the current directory:
//!
//! ```bash
//! # Report diverging revisions (exit 1 if there are any)
//! depsync github.com/me/lib
//!
//! # Adopt the vendored project's revisions, then run `dep ensure`
//! depsync --fix github.com/me/lib
//!
//! # Non-standard layout and resolver
//! depsync --vendor-dir third_party --resolver "dep ensure -v" github.com/me/lib
//! ```
//!
//! # Global Configuration
//!
//! Defaults for `--vendor-dir`, `--lockfile` and `--resolver` can be set in
//! `~/.depsync/config.toml` (see [`crate::config::GlobalConfig`]). Flags
//! always win over the file.
//!
//! # Output
//!
//! The mismatch report goes to stdout. Logs and errors go to stderr, so the
//! report can be piped or captured on its own.


use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{GlobalConfig, Overrides, Settings};
use crate::core::DepsyncError;
use crate::reconcile::{Outcome, ReconcileOptions, Reconciler};

/// Runtime configuration derived from the global flags.
///
/// Separated from [`Cli`] so tests can run a parsed command line with a
/// configuration of their own.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    ///
    /// `None` means the default, `warn`.
    pub log_level: Option<String>,

    /// Explicit global config file, from `--config`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level directive.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Install the global `tracing` subscriber, writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over [`CliConfig::log_level`]. Calling this
    /// more than once is harmless; later calls are ignored.
    pub fn init_logging(&self) {
        let filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Compare and fix `dep` lock file revisions against a vendored project.
///
/// # Examples
///
/// ```bash
/// depsync github.com/me/lib
/// depsync --fix --verbose github.com/me/lib
/// depsync --config ./ci/depsync.toml github.com/me/lib
/// ```
#[derive(Parser, Debug)]
#[command(
    name = "depsync",
    about = "Sync Gopkg.lock revisions with a vendored project",
    version,
    long_about = "depsync compares the revisions pinned in ./Gopkg.lock with the ones pinned by a \
                  vendored project's own Gopkg.lock. Mismatches are printed as a diff; with --fix \
                  they are copied into ./Gopkg.lock and the resolver is run to reconverge."
)]
pub struct Cli {
    /// Vendored project to compare against (path under the vendor directory)
    #[arg(value_name = "PROJECT")]
    projects: Vec<String>,

    /// Rewrite local revisions to match the vendored project, then run the resolver
    #[arg(long)]
    fix: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Path to the global configuration file
    ///
    /// Defaults to $DEPSYNC_CONFIG, then ~/.depsync/config.toml.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding vendored projects [default: vendor]
    #[arg(long, value_name = "DIR")]
    vendor_dir: Option<PathBuf>,

    /// Lock file name [default: Gopkg.lock]
    #[arg(long, value_name = "NAME")]
    lockfile: Option<String>,

    /// Resolver command run after --fix, split on whitespace [default: "dep ensure"]
    #[arg(long, value_name = "CMD")]
    resolver: Option<String>,
}

impl Cli {
    /// Build a [`CliConfig`] from the global flags.
    ///
    /// ```rust
    /// use depsync_cli::cli::Cli;
    /// use clap::Parser;
    ///
    /// let cli = Cli::parse_from(["depsync", "--verbose", "github.com/me/lib"]);
    /// assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Set up logging and run.
    ///
    /// # Errors
    ///
    /// See [`Cli::execute_with_config`].
    pub async fn execute(self) -> Result<Outcome> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Run with an explicit configuration, printing the report to stdout.
    ///
    /// # Errors
    ///
    /// [`DepsyncError::Usage`] unless exactly one project was given, plus
    /// anything loading configuration or reconciling can fail with.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<Outcome> {
        let project = self.project()?;

        let global = GlobalConfig::load_with_optional(config.config_path).await?;
        let settings = Settings::resolve(&global, &self.overrides())?;

        let root = std::env::current_dir().unwrap_or_else(|e| {
            tracing::warn!("Cannot read the current directory ({e}), using `.`");
            PathBuf::from(".")
        });
        let options = ReconcileOptions::new(project, root, &settings).with_fix(self.fix);

        tracing::debug!(
            "Comparing {} against {} in {} (fix: {})",
            options.local_lockfile().display(),
            options.project,
            options.vendor_dir.display(),
            options.fix
        );

        let stdout = std::io::stdout();
        Reconciler::new(options, &settings.resolver, stdout.lock()).run().await
    }

    fn project(&self) -> Result<String> {
        match self.projects.as_slice() {
            [project] => Ok(project.clone()),
            [] => Err(DepsyncError::Usage {
                message: "Expected a project to compare against".to_string(),
            }
            .into()),
            more => Err(DepsyncError::Usage {
                message: format!("Expected exactly one project, got {}", more.len()),
            }
            .into()),
        }
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            vendor_dir: self.vendor_dir.clone(),
            lockfile: self.lockfile.clone(),
            resolver: self.resolver.clone(),
        }
    }
}
