//! Reconciliation driver: load, compare, report or fix, reconverge.
//!
//! One run of [`Reconciler::run`] moves through these steps:
//!
//! ```text
//! load reference ─► load local ─► diff ─┬─► report ─────────────────────► done
//!                       ▲               └─► fix ─► persist ─► reconverge ─┐
//!                       └─────────────────────────────────────────────────┘
//! ```
//!
//! Fix mode is switched off once the resolver has run, so the second trip
//! through `diff` only reports: a run compares at most twice and never fixes
//! twice. Every failure along the way ends the run with an error.

mod report;

pub use report::MismatchReport;

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::config::Settings;
use crate::core::{DepsyncError, LockOwner};
use crate::diff::{diff_lockfiles, find_mismatches};
use crate::lockfile::{LockFile, LockedProject};
use crate::resolver::Resolver;
use crate::utils::fs::{VendorEntry, inspect_vendor_entry};
use crate::utils::platform::package_path;

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No common project has diverging revisions
    Clean,
    /// Mismatches were printed and fix mode was off (or did not converge)
    Reported {
        /// Number of mismatches in the final comparison
        mismatches: usize,
    },
    /// Revisions were rewritten, the resolver succeeded and the recheck was clean
    FixedAndConverged,
}

impl Outcome {
    /// Process exit status for this outcome.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Clean | Self::FixedAndConverged => 0,
            Self::Reported {
                ..
            } => 1,
        }
    }
}

/// What to compare and where.
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Vendored project to compare against, e.g. `github.com/me/lib`
    pub project: String,
    /// Rewrite local revisions instead of reporting them
    pub fix: bool,
    /// Directory holding the local lock file and the vendor directory
    pub project_root: PathBuf,
    /// Vendor root, relative to `project_root` unless absolute
    pub vendor_dir: PathBuf,
    /// Lock file name on both sides
    pub lockfile_name: String,
    /// Label for the local side in the report header
    pub local_label: String,
}

impl ReconcileOptions {
    /// Options for comparing `project_root` with `project`, using `settings`
    /// for file locations. The local label is the Go package path of
    /// `project_root`.
    pub fn new(project: impl Into<String>, project_root: impl Into<PathBuf>, settings: &Settings) -> Self {
        let project_root = project_root.into();
        let local_label = package_path(&project_root, std::env::var_os("GOPATH").as_deref());
        Self {
            project: project.into(),
            fix: false,
            project_root,
            vendor_dir: settings.vendor_dir.clone(),
            lockfile_name: settings.lockfile_name.clone(),
            local_label,
        }
    }

    /// Enable or disable fix mode.
    #[must_use]
    pub const fn with_fix(mut self, fix: bool) -> Self {
        self.fix = fix;
        self
    }

    /// Override the label printed for the local side.
    #[must_use]
    pub fn with_local_label(mut self, label: impl Into<String>) -> Self {
        self.local_label = label.into();
        self
    }

    /// Directory of the vendored project, always inside the vendor root.
    ///
    /// `project` is joined the way Go's `filepath.Join` would: root and drive
    /// prefixes are dropped and `..` is resolved lexically, so `/tmp/x` maps
    /// to `<vendor>/tmp/x`. Returns `None` when `..` would climb out of the
    /// vendor root.
    pub fn vendored_project_dir(&self) -> Option<PathBuf> {
        let mut relative = PathBuf::new();
        for component in Path::new(&self.project).components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::ParentDir => {
                    if !relative.pop() {
                        return None;
                    }
                }
                Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            }
        }
        Some(self.project_root.join(&self.vendor_dir).join(relative))
    }

    /// Path of the local lock file.
    pub fn local_lockfile(&self) -> PathBuf {
        self.project_root.join(&self.lockfile_name)
    }
}

/// Drives one comparison (and optional fix) of a project against a vendored dependency.
///
/// # Examples
///
/// ```rust,no_run
/// use depsync_cli::config::Settings;
/// use depsync_cli::reconcile::{ReconcileOptions, Reconciler};
///
/// # async fn example() -> anyhow::Result<()> {
/// let settings = Settings::default();
/// let options = ReconcileOptions::new("github.com/me/lib", ".", &settings);
/// let outcome = Reconciler::new(options, &settings.resolver, std::io::stdout()).run().await?;
/// std::process::exit(outcome.exit_code());
/// # }
/// ```
pub struct Reconciler<'r, R: Resolver, W: Write> {
    options: ReconcileOptions,
    resolver: &'r R,
    out: W,
}

impl<'r, R: Resolver, W: Write> Reconciler<'r, R, W> {
    /// Create a driver writing its report to `out`.
    pub const fn new(options: ReconcileOptions, resolver: &'r R, out: W) -> Self {
        Self {
            options,
            resolver,
            out,
        }
    }

    /// Run the comparison to completion.
    ///
    /// # Errors
    ///
    /// Any [`DepsyncError`] from the vendor check, lock file loading,
    /// persisting or the resolver, plus failures writing the report.
    pub async fn run(&mut self) -> Result<Outcome> {
        let reference = self.load_reference()?;
        let local_path = self.options.local_lockfile();

        let mut fix = self.options.fix;
        let mut fixed = false;

        // `fix` is cleared after the first persist, so this diffs at most twice.
        loop {
            let mut local = LockFile::load(&local_path, LockOwner::CurrentDir)?;

            if fix {
                let planned = find_mismatches(&local, &reference);
                if planned.is_empty() {
                    tracing::info!("{} already matches {}", local_path.display(), self.options.project);
                    return Ok(Outcome::Clean);
                }
                for mismatch in &planned {
                    tracing::info!(
                        "Pinning {} to {} (was {})",
                        mismatch.name,
                        mismatch.reference_revision,
                        mismatch.local_revision
                    );
                }

                let count = diff_lockfiles(
                    &mut local,
                    &reference,
                    Some(&mut |_: &str, mine: &mut LockedProject, theirs: &LockedProject| {
                        mine.revision.clone_from(&theirs.revision);
                    }),
                );

                tracing::info!("Updating {} revision(s) in {}", count, local_path.display());
                local.save(&local_path)?;
                self.reconverge().await?;

                fix = false;
                fixed = true;
                continue;
            }

            let count = self.report(&mut local, &reference)?;
            tracing::debug!("{} mismatch(es) against {}", count, self.options.project);

            return Ok(if count > 0 {
                Outcome::Reported {
                    mismatches: count,
                }
            } else if fixed {
                Outcome::FixedAndConverged
            } else {
                Outcome::Clean
            });
        }
    }

    fn load_reference(&self) -> Result<LockFile> {
        let project = &self.options.project;
        let Some(vendor_path) = self.options.vendored_project_dir() else {
            return Err(DepsyncError::MissingVendorEntry {
                project: project.clone(),
            }
            .into());
        };

        match inspect_vendor_entry(&vendor_path) {
            Ok(VendorEntry::Directory) => {}
            Ok(VendorEntry::Missing) => {
                return Err(DepsyncError::MissingVendorEntry {
                    project: project.clone(),
                }
                .into());
            }
            Ok(VendorEntry::NotDirectory) => {
                return Err(DepsyncError::VendorEntryNotDirectory {
                    project: project.clone(),
                }
                .into());
            }
            Err(e) => {
                return Err(DepsyncError::VendorCheckFailed {
                    path: vendor_path.display().to_string(),
                    reason: e.to_string(),
                }
                .into());
            }
        }

        LockFile::load(&vendor_path.join(&self.options.lockfile_name), LockOwner::Vendored(project.clone()))
    }

    fn report(&mut self, local: &mut LockFile, reference: &LockFile) -> Result<usize> {
        let mut report = MismatchReport::new(&mut self.out, &self.options.local_label, &self.options.project);
        let count = diff_lockfiles(
            local,
            reference,
            Some(&mut |name: &str, mine: &mut LockedProject, theirs: &LockedProject| {
                report.record(name, &mine.revision, &theirs.revision);
            }),
        );
        report.finish().context("Failed to write mismatch report")?;
        Ok(count)
    }

    async fn reconverge(&self) -> Result<()> {
        let root: &Path = &self.options.project_root;
        tracing::debug!("Reconverging with `{}`", self.resolver.describe());
        self.resolver.reconverge(root).await
    }
}
