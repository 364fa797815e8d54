//! Lock file and project layout fixtures.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{LOCKFILE_NAME, VENDOR_DIR};
use crate::lockfile::{LockFile, LockedProject};

/// Builder for lock file content.
///
/// Produces text in the layout `dep` itself writes (two-space indented keys,
/// a `[solve-meta]` table), so tests exercise the parser on realistic input
/// rather than on this crate's own output.
#[derive(Debug, Clone, Default)]
pub struct LockfileFixture {
    projects: Vec<LockedProject>,
    inputs_digest: Option<String>,
}

impl LockfileFixture {
    /// Empty fixture with standard solver metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a project pinned to `revision`, importing the root package.
    #[must_use]
    pub fn project(mut self, name: &str, revision: &str) -> Self {
        let mut project = LockedProject::new(name, revision);
        project.packages = vec![".".to_string()];
        self.projects.push(project);
        self
    }

    /// Add a fully specified project.
    #[must_use]
    pub fn locked(mut self, project: LockedProject) -> Self {
        self.projects.push(project);
        self
    }

    /// Override the `inputs-digest` written to `[solve-meta]`.
    #[must_use]
    pub fn inputs_digest(mut self, digest: &str) -> Self {
        self.inputs_digest = Some(digest.to_string());
        self
    }

    /// Parsed form of the fixture.
    pub fn build(&self) -> LockFile {
        LockFile::from_toml_str(&self.to_toml()).unwrap_or_else(|e| panic!("fixture must parse: {e}"))
    }

    /// Render as `dep` would.
    pub fn to_toml(&self) -> String {
        let mut out = String::from(
            "# This file is autogenerated, do not edit; changes may be undone by the next 'dep ensure'.\n\n",
        );
        for project in &self.projects {
            out.push_str("\n[[projects]]\n");
            if let Some(branch) = &project.branch {
                out.push_str(&format!("  branch = {}\n", quote(branch)));
            }
            out.push_str(&format!("  name = {}\n", quote(&project.name)));
            let packages: Vec<String> = project.packages.iter().map(|p| quote(p)).collect();
            out.push_str(&format!("  packages = [{}]\n", packages.join(",")));
            out.push_str(&format!("  revision = {}\n", quote(&project.revision)));
            if let Some(version) = &project.version {
                out.push_str(&format!("  version = {}\n", quote(version)));
            }
        }
        let digest = self.inputs_digest.as_deref().unwrap_or(
            "3c1a5e9f2b1d0c7e8f6a4b2d9e0c1f3a5b7d9e1f3a5c7e9b1d3f5a7c9e1b3d5f",
        );
        out.push_str("\n[solve-meta]\n");
        out.push_str("  analyzer-name = \"dep\"\n");
        out.push_str("  analyzer-version = 1\n");
        out.push_str(&format!("  inputs-digest = {}\n", quote(digest)));
        out.push_str("  solver-name = \"gps-cdcl\"\n");
        out.push_str("  solver-version = 1\n");
        out
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// A project root on disk with a `vendor/` directory.
///
/// The caller owns the root directory (usually a `tempfile::TempDir`).
#[derive(Debug, Clone)]
pub struct TestProject {
    root: PathBuf,
}

impl TestProject {
    /// Use `root` as the project root.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the local lock file.
    pub fn local_lock_path(&self) -> PathBuf {
        self.root.join(LOCKFILE_NAME)
    }

    /// Directory of a vendored project.
    pub fn vendored_dir(&self, project: &str) -> PathBuf {
        self.root.join(VENDOR_DIR).join(project)
    }

    /// Write the local lock file.
    pub fn write_local_lock(&self, content: &str) -> Result<()> {
        fs::write(self.local_lock_path(), content).context("Failed to write local lock file")
    }

    /// Read the local lock file back.
    pub fn read_local_lock(&self) -> Result<String> {
        fs::read_to_string(self.local_lock_path()).context("Failed to read local lock file")
    }

    /// Create `vendor/<project>/` without a lock file.
    pub fn create_vendored_project(&self, project: &str) -> Result<PathBuf> {
        let dir = self.vendored_dir(project);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        Ok(dir)
    }

    /// Create `vendor/<project>/` with the given lock file.
    pub fn write_vendored_lock(&self, project: &str, content: &str) -> Result<()> {
        let dir = self.create_vendored_project(project)?;
        fs::write(dir.join(LOCKFILE_NAME), content).context("Failed to write vendored lock file")
    }
}
