/*!

Exercises the paths of the `e2e` binary that do not need a cluster.

!*/

use assert_cmd::Command;

fn e2e() -> Command {
    let mut cmd = Command::cargo_bin("e2e").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn list_prints_registered_checks() {
    e2e()
        .arg("--list")
        .assert()
        .success()
        .stdout("TestLivenessHttp\nTestLivenessExec\n");
}

#[test]
fn unknown_test_runs_nothing() {
    e2e()
        .args(&["--test", "DoesNotExist", "--seed", "42"])
        .assert()
        .success()
        .stdout("1..0\n");
}

#[test]
fn zero_times_runs_nothing() {
    e2e()
        .args(&["--times", "0"])
        .assert()
        .success()
        .stdout("1..0\n");
}

#[test]
fn missing_repo_root_is_an_error() {
    e2e()
        .args(&["--repo-root", "/does/not/exist", "--times", "0"])
        .assert()
        .failure();
}

#[test]
fn bad_seed_is_rejected() {
    e2e().args(&["--seed", "not-a-number"]).assert().failure();
}

#[test]
fn huge_repeat_count_is_rejected() {
    e2e()
        .args(&["--times", "18446744073709551615", "--list"])
        .assert()
        .failure();
    e2e()
        .args(&["--times", "10001", "--list"])
        .assert()
        .failure();
}

#[test]
fn largest_repeat_count_is_accepted() {
    e2e().args(&["--times", "10000", "--list"]).assert().success();
}
