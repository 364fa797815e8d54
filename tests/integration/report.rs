use predicates::prelude::*;

use crate::common::{LIB, TestEnv, expected_report};
use depsync_cli::test_utils::LockfileFixture;

#[test]
fn test_reports_mismatch_and_exits_1() {
    let env = TestEnv::with_mismatch().unwrap();
    let before = env.project().read_local_lock().unwrap();

    env.command().arg(LIB).assert().code(1).stdout(expected_report("rev2"));

    assert_eq!(env.project().read_local_lock().unwrap(), before);
}

#[test]
fn test_clean_run_is_silent() {
    let env = TestEnv::new().unwrap();
    let lock = LockfileFixture::new().project("A", "rev1").to_toml();
    env.project().write_local_lock(&lock).unwrap();
    env.project()
        .write_vendored_lock(LIB, &LockfileFixture::new().project("A", "rev1").project("Z", "rev0").to_toml())
        .unwrap();

    env.command().arg(LIB).assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_header_falls_back_to_directory_outside_gopath() {
    let env = TestEnv::with_mismatch().unwrap();

    env.command()
        .env_remove("GOPATH")
        .arg(LIB)
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with(format!("--- {}\n", env.root().display())))
        .stdout(predicate::str::ends_with("- B rev2\n+ B rev3\n"));
}

#[test]
fn test_logs_stay_off_stdout() {
    let env = TestEnv::with_mismatch().unwrap();

    env.command()
        .args(["--verbose", LIB])
        .assert()
        .code(1)
        .stdout(expected_report("rev2"))
        .stderr(predicate::str::contains("mismatch"));
}

#[test]
fn test_vendor_dir_flag() {
    let env = TestEnv::new().unwrap();
    env.project().write_local_lock(&LockfileFixture::new().project("A", "rev1").to_toml()).unwrap();
    let third_party = env.root().join("third_party").join(LIB);
    std::fs::create_dir_all(&third_party).unwrap();
    std::fs::write(third_party.join("Gopkg.lock"), LockfileFixture::new().project("A", "rev2").to_toml()).unwrap();

    env.command()
        .args(["--vendor-dir", "third_party", LIB])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("- A rev1\n+ A rev2\n"));
}
