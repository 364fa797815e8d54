//! Revision comparison between two lock files.
//!
//! Only projects pinned in *both* lock files are compared. A project that
//! one side has and the other does not is never reported: depsync cares
//! about disagreement, not about additions or removals.
//!
//! Results follow the order of the local lock file, so reports and tests
//! are deterministic.
//!
//! Names are expected to be unique within a lock file. If one is
//! duplicated, the last entry with that name is the one compared (and handed
//! to the callback), and the name is reported at most once, at the position
//! of its first occurrence.

use std::collections::{HashMap, HashSet};

use crate::lockfile::{LockFile, LockedProject};

/// A project pinned to different revisions in two lock files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Project name
    pub name: String,
    /// Revision in the local lock file
    pub local_revision: String,
    /// Revision in the reference lock file
    pub reference_revision: String,
}

/// Callback invoked once per mismatch with the project name, the local entry
/// and the reference entry.
///
/// The local entry may be modified; that is how fix mode rewrites revisions.
pub type OnMismatch<'a> = &'a mut dyn FnMut(&str, &mut LockedProject, &LockedProject);

/// Name → index of the last entry with that name.
fn index_by_name(lockfile: &LockFile) -> HashMap<&str, usize> {
    lockfile.projects.iter().enumerate().map(|(i, p)| (p.name.as_str(), i)).collect()
}

/// Index pairs `(local, reference)` of every mismatched project, in local order.
fn mismatched_pairs(local: &LockFile, reference: &LockFile) -> Vec<(usize, usize)> {
    let local_index = index_by_name(local);
    let reference_index = index_by_name(reference);

    let mut seen = HashSet::with_capacity(local.projects.len());
    let mut pairs = Vec::new();
    for project in &local.projects {
        let name = project.name.as_str();
        if !seen.insert(name) {
            continue;
        }
        let Some(&r) = reference_index.get(name) else {
            continue;
        };
        let l = local_index[name];
        if local.projects[l].revision != reference.projects[r].revision {
            pairs.push((l, r));
        }
    }
    pairs
}

/// Compare `local` against `reference` and return the number of mismatches.
///
/// When `on_mismatch` is given it is called for every mismatch, in local
/// order, with `(name, local entry, reference entry)`. The count is the same
/// with or without a callback.
///
/// # Examples
///
/// ```rust
/// use depsync_cli::diff::diff_lockfiles;
/// use depsync_cli::lockfile::{LockFile, LockedProject};
///
/// let mut local = LockFile::new();
/// local.projects.push(LockedProject::new("github.com/a/b", "rev2"));
/// let mut reference = LockFile::new();
/// reference.projects.push(LockedProject::new("github.com/a/b", "rev3"));
///
/// // Pull the local pin over to the reference revision.
/// let n = diff_lockfiles(
///     &mut local,
///     &reference,
///     Some(&mut |_: &str, mine: &mut LockedProject, theirs: &LockedProject| {
///         mine.revision = theirs.revision.clone();
///     }),
/// );
/// assert_eq!(n, 1);
/// assert_eq!(local.projects[0].revision, "rev3");
/// ```
pub fn diff_lockfiles(
    local: &mut LockFile,
    reference: &LockFile,
    on_mismatch: Option<OnMismatch<'_>>,
) -> usize {
    let pairs = mismatched_pairs(local, reference);

    if let Some(callback) = on_mismatch {
        for &(l, r) in &pairs {
            let theirs = &reference.projects[r];
            callback(&theirs.name, &mut local.projects[l], theirs);
        }
    }

    pairs.len()
}

/// Every mismatch between `local` and `reference`, in local order, without
/// touching either side.
pub fn find_mismatches(local: &LockFile, reference: &LockFile) -> Vec<Mismatch> {
    mismatched_pairs(local, reference)
        .into_iter()
        .map(|(l, r)| Mismatch {
            name: local.projects[l].name.clone(),
            local_revision: local.projects[l].revision.clone(),
            reference_revision: reference.projects[r].revision.clone(),
        })
        .collect()
}
