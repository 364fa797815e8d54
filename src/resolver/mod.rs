//! External dependency resolver invocation.
//!
//! After fix mode rewrites revisions in the local lock file, the resolver
//! (`dep ensure` by default) is run so the new pins are checked against the
//! project's full set of constraints and the lock file is rewritten in its
//! canonical form.
//!
//! The [`Resolver`] trait is the seam the reconciliation driver depends on;
//! [`ResolverCommand`] is the real subprocess implementation.

use anyhow::Result;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::constants::DEFAULT_RESOLVER;
use crate::core::DepsyncError;

/// Something that can re-resolve a project's dependency graph.
pub trait Resolver {
    /// Human-readable command line, used in logs and error messages.
    fn describe(&self) -> String;

    /// Re-resolve the project rooted at `project_root`.
    ///
    /// Must read and rewrite the lock file in `project_root`. Returns an
    /// error if the resolver could not be started or did not succeed.
    fn reconverge(&self, project_root: &Path) -> impl Future<Output = Result<()>>;
}

/// Builder for the resolver subprocess.
///
/// The child inherits stdout and stderr so the resolver's own progress and
/// diagnostics reach the terminal. Its stdin is the null device, so a
/// resolver that prompts sees end-of-file instead of waiting on the
/// terminal. There is no timeout: the driver waits for the resolver to finish.
///
/// # Examples
///
/// ```rust,no_run
/// use depsync_cli::resolver::{Resolver, ResolverCommand};
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// ResolverCommand::new("dep").arg("ensure").reconverge(Path::new(".")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverCommand {
    program: String,
    args: Vec<String>,
}

impl Default for ResolverCommand {
    fn default() -> Self {
        Self::from_argv(DEFAULT_RESOLVER.iter().copied()).unwrap_or_else(|| Self::new("dep"))
    }
}

impl ResolverCommand {
    /// Create a resolver command running `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build a command from an argv-style list. Returns `None` if it is empty.
    pub fn from_argv<I, S>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next()?;
        Some(Self {
            program,
            args: argv.collect(),
        })
    }

    /// Parse a whitespace-separated command line such as `"dep ensure -v"`.
    ///
    /// No shell quoting is interpreted. Returns `None` for a blank string.
    pub fn parse(command_line: &str) -> Option<Self> {
        Self::from_argv(command_line.split_whitespace())
    }

    /// Append an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Program name or path.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed after the program.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn locate(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|e| {
            DepsyncError::Reconverge {
                command: self.describe(),
                reason: format!("`{}` was not found on PATH: {e}", self.program),
            }
            .into()
        })
    }
}

impl Resolver for ResolverCommand {
    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    async fn reconverge(&self, project_root: &Path) -> Result<()> {
        let program = self.locate()?;
        let command_line = self.describe();

        tracing::info!("Running `{}` in {}", command_line, project_root.display());

        let status = Command::new(&program)
            .args(&self.args)
            .current_dir(project_root)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| DepsyncError::Reconverge {
                command: command_line.clone(),
                reason: format!("failed to start {}: {e}", program.display()),
            })?;

        if !status.success() {
            tracing::debug!("`{}` failed with exit code: {:?}", command_line, status.code());
            return Err(DepsyncError::Reconverge {
                command: command_line,
                reason: format!("resolver exited with {status}"),
            }
            .into());
        }

        tracing::debug!("`{}` finished successfully", command_line);
        Ok(())
    }
}
