//! Core types for depsync
//!
//! Error handling lives here: [`DepsyncError`] enumerates every fatal
//! condition, [`ErrorContext`] pairs one with details and a suggestion, and
//! [`user_friendly_error`] turns any [`anyhow::Error`] reaching `main` into an
//! [`ErrorContext`] ready for display.

pub mod error;
mod error_formatting;

pub use error::{DepsyncError, ErrorContext, LockOwner, create_error_context, user_friendly_error};
