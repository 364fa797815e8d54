//! Error handling for depsync
//!
//! Every failure the tool can hit is a variant of [`DepsyncError`]. Code deep in
//! the call stack returns these wrapped in [`anyhow::Error`] (often with extra
//! `.context(..)`), and the binary converts whatever bubbles up into an
//! [`ErrorContext`] with [`user_friendly_error`] before printing it.
//!
//! # Error Categories
//!
//! - **Invocation**: [`DepsyncError::Usage`], [`DepsyncError::Config`]
//! - **Vendor lookup**: [`DepsyncError::MissingVendorEntry`],
//!   [`DepsyncError::VendorEntryNotDirectory`], [`DepsyncError::VendorCheckFailed`]
//! - **Lock files**: [`DepsyncError::MissingLockFile`], [`DepsyncError::MalformedLockFile`],
//!   [`DepsyncError::Persist`]
//! - **Resolver**: [`DepsyncError::Reconverge`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use depsync_cli::core::{DepsyncError, ErrorContext, user_friendly_error};
//!
//! let err = anyhow::Error::from(DepsyncError::MissingVendorEntry {
//!     project: "github.com/example/lib".to_string(),
//! });
//! let ctx = user_friendly_error(err);
//! ctx.display(); // colored output on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

pub use super::error_formatting::{create_error_context, user_friendly_error};

/// Which lock document an error refers to.
///
/// The same failure (missing file, bad TOML) can happen to either side of the
/// comparison and the message needs to say which one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOwner {
    /// The lock file of the vendored project named on the command line.
    Vendored(String),
    /// The lock file in the current working directory.
    CurrentDir,
}

impl fmt::Display for LockOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vendored(project) => write!(f, "project {project}"),
            Self::CurrentDir => f.write_str("the current directory"),
        }
    }
}

/// The main error type for depsync operations
///
/// Each variant maps to one fatal condition. None of them are retried; the
/// binary prints the rendered error and exits with status 1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DepsyncError {
    /// The command line was not usable (wrong number of projects, for example)
    #[error("{message}")]
    Usage {
        /// What was wrong with the invocation
        message: String,
    },

    /// The requested project has no entry under the vendor directory
    #[error("Project {project} is missing from the vendor directory")]
    MissingVendorEntry {
        /// Project identifier as given on the command line
        project: String,
    },

    /// The vendor entry exists but is a file, not a directory
    #[error("Project {project} is in vendor, but it is not a directory")]
    VendorEntryNotDirectory {
        /// Project identifier as given on the command line
        project: String,
    },

    /// Checking the vendor entry failed for a reason other than absence
    #[error("Cannot inspect vendor entry {path}: {reason}")]
    VendorCheckFailed {
        /// Path that was inspected
        path: String,
        /// Underlying I/O error
        reason: String,
    },

    /// A lock file that must exist was not found
    #[error("No {file} file for {owner}")]
    MissingLockFile {
        /// Whose lock file is missing
        owner: LockOwner,
        /// Lock file name
        file: String,
    },

    /// A lock file could not be read or is not valid TOML
    #[error("Unable to read the {file} file for {owner}: {reason}")]
    MalformedLockFile {
        /// Whose lock file is broken
        owner: LockOwner,
        /// Lock file name
        file: String,
        /// Parser or I/O error text
        reason: String,
    },

    /// Writing the updated lock file failed; the original is untouched
    #[error("Unable to update {file}: {reason}")]
    Persist {
        /// Lock file path being replaced
        file: String,
        /// What went wrong
        reason: String,
    },

    /// The dependency resolver failed or could not be started
    #[error("Unable to execute `{command}` with updated lock file")]
    Reconverge {
        /// Resolver command line
        command: String,
        /// Exit status or launch failure
        reason: String,
    },

    /// The configuration file could not be used
    #[error("Invalid configuration in {path}: {reason}")]
    Config {
        /// Config file path
        path: String,
        /// Parse or read error
        reason: String,
    },

    /// Anything that does not fit the categories above
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error wrapper that adds user-facing details and suggestions
///
/// ```rust,no_run
/// use depsync_cli::core::{DepsyncError, ErrorContext};
///
/// let context = ErrorContext::new(DepsyncError::Usage {
///     message: "Exactly one project must be specified".to_string(),
/// })
/// .with_suggestion("Run 'depsync <project>'");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying depsync error
    pub error: DepsyncError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no details or suggestion attached.
    #[must_use]
    pub const fn new(error: DepsyncError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions are shown in green, after any details.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error, shown in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    ///
    /// The first line is always `error: <message>`.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}
