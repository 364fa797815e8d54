//! Lock file data model for `dep`'s `Gopkg.lock`.
//!
//! A lock file pins every project in a Go program's dependency graph to an
//! exact revision. depsync reads two of them (the current project's and a
//! vendored dependency's) and, in fix mode, rewrites the current one.
//!
//! # Format
//!
//! ```toml
//! # This file is autogenerated, do not edit; changes may be undone by the next 'dep ensure'.
//!
//! [[projects]]
//! branch = "master"
//! name = "github.com/pkg/errors"
//! packages = [
//!   ".",
//! ]
//! revision = "645ef00459ed84a119197bfb8d8205042c6df63d"
//!
//! [[projects]]
//! name = "github.com/spf13/cobra"
//! packages = ["."]
//! revision = "ef82de70bb3f60c65fb8eebacbb2d122ef517385"
//! version = "v0.0.3"
//!
//! [solve-meta]
//! analyzer-name = "dep"
//! analyzer-version = 1
//! inputs-digest = "c2b5...e1"
//! solver-name = "gps-cdcl"
//! solver-version = 1
//! ```
//!
//! Only `projects` is interpreted. The `solve-meta` table and any other
//! top-level keys are carried through a load/save cycle untouched, so files
//! written by different `dep` releases survive a rewrite.
//!
//! Lock files are read with a plain TOML parser rather than through `dep`
//! itself: a vendored copy of a dependency is pruned and would fail `dep`'s
//! own validation.

mod helpers;
mod io;


use serde::{Deserialize, Serialize};

/// A single pinned project in a lock file.
///
/// Field order matches the order `dep` writes them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedProject {
    /// Branch the revision was taken from, when pinned by branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Import path of the project root, unique within a lock file
    pub name: String,

    /// Packages of the project that are actually imported
    #[serde(default)]
    pub packages: Vec<String>,

    /// Exact VCS revision the project is pinned to
    pub revision: String,

    /// Semver tag the revision corresponds to, when pinned by version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl LockedProject {
    /// Create an entry pinned to `revision` with no branch, version or packages.
    pub fn new(name: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            branch: None,
            name: name.into(),
            packages: Vec::new(),
            revision: revision.into(),
            version: None,
        }
    }
}

/// A parsed `Gopkg.lock`.
///
/// `projects` keeps file order. `solve_meta` and `extra` are opaque and are
/// only there so a rewrite does not lose them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LockFile {
    /// Pinned projects, in file order
    #[serde(default)]
    pub projects: Vec<LockedProject>,

    /// Solver metadata (`analyzer-name`, `inputs-digest`, ...)
    #[serde(rename = "solve-meta", default, skip_serializing_if = "toml::Table::is_empty")]
    pub solve_meta: toml::Table,

    /// Any other top-level keys
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl LockFile {
    /// Create an empty lock file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a project by name.
    ///
    /// Names are unique in a well-formed lock file; with duplicates the first
    /// entry is returned.
    pub fn get_project(&self, name: &str) -> Option<&LockedProject> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Check whether a project with this name is pinned.
    pub fn has_project(&self, name: &str) -> bool {
        self.get_project(name).is_some()
    }
}
