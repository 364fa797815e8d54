//! Global constants used throughout the depsync codebase.
//!
//! File names, directory names and default commands that several modules
//! agree on. Anything a user can override through configuration or flags
//! starts out as one of these values.

/// Name of the lock file written by `dep` in every project root.
pub const LOCKFILE_NAME: &str = "Gopkg.lock";

/// Directory that holds vendored dependencies, relative to the project root.
pub const VENDOR_DIR: &str = "vendor";

/// Suffix appended to the lock file path for the staging file used by atomic writes.
pub const STAGING_SUFFIX: &str = ".new";

/// Default dependency resolver invocation used to reconverge after a fix.
pub const DEFAULT_RESOLVER: &[&str] = &["dep", "ensure"];

/// Header written at the top of every lock file this tool rewrites.
pub const LOCKFILE_HEADER: &str =
    "# This file is autogenerated, do not edit; changes may be undone by the next 'dep ensure'.\n\n";

/// Environment variable that overrides the global configuration file location.
pub const CONFIG_ENV_VAR: &str = "DEPSYNC_CONFIG";

/// Directory under the home directory that holds the global configuration.
pub const CONFIG_DIR_NAME: &str = ".depsync";

/// File name of the global configuration inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";
