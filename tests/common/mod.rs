//! Common test utilities for depsync integration tests
//!
//! Every test gets its own `GOPATH` in a temporary directory, with the project
//! under test at `$GOPATH/src/github.com/me/app`, so the report header is
//! predictable.

// Allow dead code because these utilities are used across different test files
// and not all utilities are used in every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use depsync_cli::test_utils::{LockfileFixture, TestProject};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Package path of the project under test.
pub const APP: &str = "github.com/me/app";

/// Vendored project the tests compare against.
pub const LIB: &str = "github.com/me/lib";

/// A Go workspace holding one project.
pub struct TestEnv {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    gopath: PathBuf,
    project: TestProject,
}

impl TestEnv {
    /// Create `$GOPATH/src/github.com/me/app` with an empty vendor directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        // Canonical so the header matches what the binary sees as its cwd.
        let gopath = temp_dir.path().canonicalize()?;
        let root = gopath.join("src").join(APP);
        fs::create_dir_all(root.join("vendor"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            gopath,
            project: TestProject::new(&root),
        })
    }

    /// Local lock {A: rev1, B: rev2}, vendored lock {A: rev1, B: rev3, C: rev4}.
    pub fn with_mismatch() -> Result<Self> {
        let env = Self::new()?;
        env.project.write_local_lock(&LockfileFixture::new().project("A", "rev1").project("B", "rev2").to_toml())?;
        env.project.write_vendored_lock(
            LIB,
            &LockfileFixture::new().project("A", "rev1").project("B", "rev3").project("C", "rev4").to_toml(),
        )?;
        Ok(env)
    }

    pub fn project(&self) -> &TestProject {
        &self.project
    }

    pub fn root(&self) -> &Path {
        self.project.root()
    }

    /// Write a config file next to the project and return its path.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.gopath.join("depsync.toml");
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// `depsync` running in the project root with an isolated environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("depsync").unwrap();
        cmd.current_dir(self.root())
            .env("GOPATH", &self.gopath)
            .env("DEPSYNC_CONFIG", self.gopath.join("no-such-config.toml"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Expected report for [`TestEnv::with_mismatch`].
pub fn expected_report(local_b: &str) -> String {
    format!("--- {APP}\n+++ {LIB}\n- B {local_b}\n+ B rev3\n")
}
