use predicates::prelude::*;

use crate::common::{LIB, TestEnv};
use depsync_cli::test_utils::LockfileFixture;

#[test]
fn test_no_project_is_usage_error() {
    let env = TestEnv::with_mismatch().unwrap();

    env.command()
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error: Expected a project to compare against"));
}

#[test]
fn test_two_projects_is_usage_error() {
    let env = TestEnv::with_mismatch().unwrap();

    env.command()
        .args([LIB, "github.com/me/other"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Expected exactly one project, got 2"));
}

#[test]
fn test_unknown_flag_exits_1() {
    let env = TestEnv::with_mismatch().unwrap();

    env.command().args(["--frobnicate", LIB]).assert().code(1);
}

#[test]
fn test_help_exits_0() {
    let env = TestEnv::new().unwrap();

    env.command().arg("--help").assert().success().stdout(predicate::str::contains("--fix"));
}

#[test]
fn test_missing_vendored_project() {
    let env = TestEnv::new().unwrap();
    env.project().write_local_lock(&LockfileFixture::new().to_toml()).unwrap();

    env.command()
        .arg(LIB)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(format!("error: Project {LIB} is missing from the vendor directory")));
}

#[test]
fn test_vendored_project_is_a_file() {
    let env = TestEnv::new().unwrap();
    env.project().write_local_lock(&LockfileFixture::new().to_toml()).unwrap();
    let path = env.project().vendored_dir(LIB);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "").unwrap();

    env.command()
        .arg(LIB)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is in vendor, but it is not a directory"));
}

#[test]
fn test_missing_lock_files() {
    let env = TestEnv::new().unwrap();
    env.project().create_vendored_project(LIB).unwrap();

    env.command()
        .arg(LIB)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(format!("No Gopkg.lock file for project {LIB}")));

    env.project().write_vendored_lock(LIB, &LockfileFixture::new().to_toml()).unwrap();

    env.command()
        .arg(LIB)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No Gopkg.lock file for the current directory"));
}

#[test]
fn test_malformed_local_lock_file() {
    let env = TestEnv::with_mismatch().unwrap();
    env.project().write_local_lock("[[projects]\n").unwrap();

    env.command()
        .arg(LIB)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unable to read the Gopkg.lock file for the current directory"));
}

#[test]
fn test_absolute_project_is_looked_up_inside_vendor() {
    let env = TestEnv::with_mismatch().unwrap();
    let outside = tempfile::TempDir::new().unwrap();
    std::fs::write(outside.path().join("Gopkg.lock"), LockfileFixture::new().project("B", "rev0").to_toml()).unwrap();
    let project = outside.path().display().to_string();

    env.command()
        .arg(&project)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("is missing from the vendor directory"));
}
