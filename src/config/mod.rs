//! Configuration for depsync
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. built-in defaults ([`crate::constants`])
//! 2. the global config file ([`GlobalConfig`])
//! 3. command-line flags ([`Overrides`])
//!
//! [`Settings::resolve`] merges the layers into the values the
//! reconciliation driver runs with.

mod global;

pub use global::GlobalConfig;

use anyhow::Result;
use std::path::PathBuf;

use crate::constants::{LOCKFILE_NAME, VENDOR_DIR};
use crate::core::DepsyncError;
use crate::resolver::ResolverCommand;
use crate::utils::platform::resolve_path;

/// Values given on the command line, each overriding the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--vendor-dir`
    pub vendor_dir: Option<PathBuf>,
    /// `--lockfile`
    pub lockfile: Option<String>,
    /// `--resolver`, as a whitespace-separated command line
    pub resolver: Option<String>,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Vendor root, relative to the project root unless absolute
    pub vendor_dir: PathBuf,
    /// Lock file name, looked up in the project root and in each vendored project
    pub lockfile_name: String,
    /// Resolver run after a fix
    pub resolver: ResolverCommand,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vendor_dir: PathBuf::from(VENDOR_DIR),
            lockfile_name: LOCKFILE_NAME.to_string(),
            resolver: ResolverCommand::default(),
        }
    }
}

impl Settings {
    /// Merge defaults, the config file and command-line overrides.
    ///
    /// # Errors
    ///
    /// - [`DepsyncError::Config`] for an empty `resolver` list or a
    ///   `vendor-dir` that fails expansion
    /// - [`DepsyncError::Usage`] for a blank `--resolver`
    pub fn resolve(global: &GlobalConfig, overrides: &Overrides) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(vendor_dir) = &global.vendor_dir {
            settings.vendor_dir = resolve_path(vendor_dir).map_err(|e| DepsyncError::Config {
                path: "vendor-dir".to_string(),
                reason: format!("{e:#}"),
            })?;
        }
        if let Some(lockfile) = &global.lockfile {
            settings.lockfile_name.clone_from(lockfile);
        }
        if let Some(argv) = &global.resolver {
            settings.resolver =
                ResolverCommand::from_argv(argv.iter().cloned()).ok_or_else(|| DepsyncError::Config {
                    path: "resolver".to_string(),
                    reason: "resolver must name a program".to_string(),
                })?;
        }

        if let Some(vendor_dir) = &overrides.vendor_dir {
            settings.vendor_dir.clone_from(vendor_dir);
        }
        if let Some(lockfile) = &overrides.lockfile {
            settings.lockfile_name.clone_from(lockfile);
        }
        if let Some(command_line) = &overrides.resolver {
            settings.resolver =
                ResolverCommand::parse(command_line).ok_or_else(|| DepsyncError::Usage {
                    message: "--resolver must name a program".to_string(),
                })?;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&GlobalConfig::default(), &Overrides::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.vendor_dir, PathBuf::from("vendor"));
        assert_eq!(settings.lockfile_name, "Gopkg.lock");
        assert_eq!(settings.resolver, ResolverCommand::new("dep").arg("ensure"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let global = GlobalConfig {
            vendor_dir: Some("third_party".to_string()),
            lockfile: Some("config.lock".to_string()),
            resolver: Some(vec!["dep".to_string(), "ensure".to_string(), "-v".to_string()]),
        };
        let overrides = Overrides {
            vendor_dir: None,
            lockfile: Some("flag.lock".to_string()),
            resolver: Some("true".to_string()),
        };

        let settings = Settings::resolve(&global, &overrides).unwrap();
        assert_eq!(settings.vendor_dir, PathBuf::from("third_party"));
        assert_eq!(settings.lockfile_name, "flag.lock");
        assert_eq!(settings.resolver, ResolverCommand::new("true"));
    }

    #[test]
    fn test_empty_resolver_rejected() {
        let global = GlobalConfig {
            resolver: Some(vec![]),
            ..GlobalConfig::default()
        };
        let err = Settings::resolve(&global, &Overrides::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<DepsyncError>(), Some(DepsyncError::Config { .. })));

        let overrides = Overrides {
            resolver: Some("  ".to_string()),
            ..Overrides::default()
        };
        let err = Settings::resolve(&GlobalConfig::default(), &overrides).unwrap_err();
        assert!(matches!(err.downcast_ref::<DepsyncError>(), Some(DepsyncError::Usage { .. })));
    }
}
