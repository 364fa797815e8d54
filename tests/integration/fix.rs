//! `--fix` runs with `true`/`false` standing in for `dep ensure`.

use predicates::prelude::*;

use crate::common::{LIB, TestEnv};
use depsync_cli::core::LockOwner;
use depsync_cli::lockfile::LockFile;

fn local_revision(env: &TestEnv, name: &str) -> String {
    let lock = LockFile::load(&env.project().local_lock_path(), LockOwner::CurrentDir).unwrap();
    lock.get_project(name).unwrap().revision.clone()
}

#[cfg(unix)]
#[test]
fn test_fix_adopts_vendored_revisions() {
    let env = TestEnv::with_mismatch().unwrap();

    env.command()
        .args(["--fix", "--resolver", "true", LIB])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(local_revision(&env, "A"), "rev1");
    assert_eq!(local_revision(&env, "B"), "rev3");

    let content = env.project().read_local_lock().unwrap();
    assert!(content.starts_with("# This file is autogenerated, do not edit;"));
    assert!(content.contains("[solve-meta]"));
    assert!(!env.root().join("Gopkg.lock.new").exists());
}

#[cfg(unix)]
#[test]
fn test_fix_then_check_is_clean() {
    let env = TestEnv::with_mismatch().unwrap();

    env.command().args(["--fix", "--resolver", "true", LIB]).assert().success();
    env.command().arg(LIB).assert().success().stdout(predicate::str::is_empty());
}

#[cfg(unix)]
#[test]
fn test_resolver_failure() {
    let env = TestEnv::with_mismatch().unwrap();

    env.command()
        .args(["--fix", "--resolver", "false", LIB])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error: Unable to execute `false` with updated lock file"));

    // The rewritten lock file stays in place for inspection.
    assert_eq!(local_revision(&env, "B"), "rev3");
}

#[test]
fn test_resolver_not_installed() {
    let env = TestEnv::with_mismatch().unwrap();

    env.command()
        .args(["--fix", "--resolver", "depsync-no-such-resolver ensure", LIB])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("depsync-no-such-resolver ensure"));
}

#[test]
fn test_fix_without_mismatches_does_not_run_resolver() {
    let env = TestEnv::new().unwrap();
    let lock = depsync_cli::test_utils::LockfileFixture::new().project("A", "rev1").to_toml();
    env.project().write_local_lock(&lock).unwrap();
    env.project().write_vendored_lock(LIB, &lock).unwrap();

    // The resolver does not exist, so running it would fail.
    env.command().args(["--fix", "--resolver", "depsync-no-such-resolver", LIB]).assert().success();

    assert_eq!(env.project().read_local_lock().unwrap(), lock);
}

#[test]
fn test_persist_failure_keeps_original() {
    let env = TestEnv::with_mismatch().unwrap();
    let before = std::fs::read(env.project().local_lock_path()).unwrap();
    std::fs::create_dir(env.root().join("Gopkg.lock.new")).unwrap();

    env.command()
        .args(["--fix", "--resolver", "depsync-no-such-resolver", LIB])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to update"));

    assert_eq!(std::fs::read(env.project().local_lock_path()).unwrap(), before);
}
