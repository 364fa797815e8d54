//! Integration test suite for depsync
//!
//! End-to-end tests that run the `depsync` binary against lock files laid out
//! in a temporary `GOPATH`.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **report**: mismatch reporting and exit statuses
//! - **fix**: `--fix` with a stand-in resolver
//! - **config**: config file and flag precedence
//! - **error_scenarios**: usage errors, missing or broken inputs

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod config;
mod error_scenarios;
mod fix;
mod report;
