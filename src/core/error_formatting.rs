//! Error formatting utilities for depsync
//!
//! Converts internal errors into clear, actionable messages for users.

use super::error::{DepsyncError, ErrorContext, LockOwner};

/// Convert any error into a user-friendly format with contextual suggestions
///
/// Walks the error chain looking for a [`DepsyncError`]; the first one found
/// decides the message and suggestion. Errors that never passed through a
/// [`DepsyncError`] fall back to the top-level message with the full chain as
/// details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let mut current_error: &dyn std::error::Error = error.as_ref();
    loop {
        if let Some(depsync_error) = current_error.downcast_ref::<DepsyncError>() {
            return create_error_context(depsync_error);
        }

        match current_error.source() {
            Some(source) => current_error = source,
            None => break,
        }
    }

    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let context = ErrorContext::new(DepsyncError::Other {
        message: error.to_string(),
    });
    if chain.is_empty() {
        context
    } else {
        context.with_details(chain.join(": "))
    }
}

/// Create a user-friendly error context from a [`DepsyncError`]
pub fn create_error_context(error: &DepsyncError) -> ErrorContext {
    let context = ErrorContext::new(error.clone());
    match error {
        DepsyncError::Usage {
            ..
        } => context.with_suggestion("Run 'depsync [--fix] <project>' with exactly one vendored project"),
        DepsyncError::MissingVendorEntry {
            ..
        } => context.with_suggestion(
            "Please run `dep ensure` and verify it is a dependency of the current project",
        ),
        DepsyncError::VendorEntryNotDirectory {
            project,
        } => context
            .with_details(format!("The vendor entry for {project} is a regular file"))
            .with_suggestion("Remove the stray file and run `dep ensure` to restore the vendor tree"),
        DepsyncError::VendorCheckFailed {
            ..
        } => context.with_suggestion("Check that the vendor directory is readable"),
        DepsyncError::MissingLockFile {
            owner,
            file,
        } => match owner {
            LockOwner::Vendored(_) => context.with_details(format!(
                "The vendored project was not managed with dep, so there is no {file} to compare against"
            )),
            LockOwner::CurrentDir => context
                .with_suggestion(format!("Run depsync from the directory that contains {file}")),
        },
        DepsyncError::MalformedLockFile {
            file,
            ..
        } => context.with_suggestion(format!(
            "Check the TOML syntax of {file}, or regenerate it with `dep ensure`"
        )),
        DepsyncError::Persist {
            reason,
            ..
        } => context
            .with_details(reason.clone())
            .with_suggestion("Check that the current directory is writable; the original lock file was left unchanged"),
        DepsyncError::Reconverge {
            reason,
            ..
        } => context
            .with_details(reason.clone())
            .with_suggestion("Inspect the resolver output above; the rewritten lock file is still on disk"),
        DepsyncError::Config {
            ..
        } => context.with_suggestion(
            "Fix the configuration file or point --config / DEPSYNC_CONFIG at another one",
        ),
        DepsyncError::Other {
            ..
        } => context,
    }
}
