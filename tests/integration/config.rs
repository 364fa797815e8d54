use predicates::prelude::*;

use crate::common::{LIB, TestEnv, expected_report};
use depsync_cli::test_utils::LockfileFixture;

#[test]
fn test_lockfile_name_from_config() {
    let env = TestEnv::new().unwrap();
    std::fs::write(env.root().join("deps.lock"), LockfileFixture::new().project("B", "rev2").to_toml()).unwrap();
    let vendored = env.project().create_vendored_project(LIB).unwrap();
    std::fs::write(vendored.join("deps.lock"), LockfileFixture::new().project("B", "rev3").to_toml()).unwrap();
    let config = env.write_config("lockfile = \"deps.lock\"\n").unwrap();

    env.command()
        .arg("--config")
        .arg(&config)
        .arg(LIB)
        .assert()
        .code(1)
        .stdout(expected_report("rev2"));
}

#[test]
fn test_config_from_environment() {
    let env = TestEnv::with_mismatch().unwrap();
    let config = env.write_config("vendor-dir = \"elsewhere\"\n").unwrap();

    env.command()
        .env("DEPSYNC_CONFIG", &config)
        .arg(LIB)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(format!("Project {LIB} is missing from the vendor directory")));
}

#[test]
fn test_flag_overrides_config() {
    let env = TestEnv::with_mismatch().unwrap();
    let config = env.write_config("vendor-dir = \"elsewhere\"\n").unwrap();

    env.command()
        .arg("--config")
        .arg(&config)
        .args(["--vendor-dir", "vendor", LIB])
        .assert()
        .code(1)
        .stdout(expected_report("rev2"));
}

#[cfg(unix)]
#[test]
fn test_resolver_from_config() {
    let env = TestEnv::with_mismatch().unwrap();
    let config = env.write_config("resolver = [\"true\"]\n").unwrap();

    env.command().arg("--config").arg(&config).args(["--fix", LIB]).assert().success();
}

#[test]
fn test_unknown_config_key() {
    let env = TestEnv::with_mismatch().unwrap();
    let config = env.write_config("vendor_directory = \"vendor\"\n").unwrap();

    env.command()
        .arg("--config")
        .arg(&config)
        .arg(LIB)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_explicit_config_must_exist() {
    let env = TestEnv::with_mismatch().unwrap();

    env.command()
        .args(["--config", "/nonexistent/depsync.toml", LIB])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("/nonexistent/depsync.toml"));
}
