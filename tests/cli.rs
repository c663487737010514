use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn powershift(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("powershift").unwrap();
    cmd.env("POWERSHIFT_HOME_DIR", home)
        .env_remove("POWERSHIFT_OC")
        .env_remove("POWERSHIFT_PLATFORM")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn versions_are_listed_in_order() {
    let temp = tempdir().unwrap();

    powershift(temp.path())
        .args(["client", "versions"])
        .assert()
        .success()
        .stdout("v1.3.2\nv1.4.0-rc1\nv1.4.1\nv1.5.0\nv1.5.1\n");
}

#[test]
fn install_unknown_version_changes_nothing() {
    let temp = tempdir().unwrap();
    let home = temp.path().join("home");

    powershift(&home)
        .args(["client", "install", "v9.9.9"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Failed:"))
        .stdout(predicate::str::contains("available for installation"))
        .stdout(predicate::str::contains("Downloading:").not());

    assert!(!home.exists());
}

#[test]
fn install_on_unsupported_platform_fails() {
    let temp = tempdir().unwrap();
    let home = temp.path().join("home");

    powershift(&home)
        .env("POWERSHIFT_PLATFORM", "sunos")
        .args(["client", "install", "v1.5.1"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Failed:"))
        .stdout(predicate::str::contains("available for platform"))
        .stdout(predicate::str::contains("Downloading:").not());

    assert!(!home.exists());
}

#[test]
fn install_uses_cached_copy() {
    let temp = tempdir().unwrap();
    let home = temp.path();
    let cached = home.join("tools").join("v1.5.1").join("oc");
    std::fs::create_dir_all(cached.parent().unwrap()).unwrap();
    std::fs::write(&cached, b"cached oc").unwrap();
    let bin_dir = temp.path().join("bin");

    powershift(home)
        .env("POWERSHIFT_PLATFORM", "linux")
        .args(["client", "install", "v1.5.1", "--bindir"])
        .arg(&bin_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Using: {}",
            cached.display()
        )))
        .stdout(predicate::str::contains("Success:"))
        .stdout(predicate::str::contains("Downloading:").not());

    assert_eq!(std::fs::read(bin_dir.join("oc")).unwrap(), b"cached oc");
}

#[test]
fn env_prepends_version_directory() {
    let temp = tempdir().unwrap();
    let expected = temp.path().join("tools").join("v1.5.1");

    powershift(temp.path())
        .args(["client", "env", "v1.5.1", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "export PATH=\"{}:$PATH\"\n",
            expected.display()
        )));
}

#[test]
fn env_for_unknown_shell_prints_nothing() {
    let temp = tempdir().unwrap();

    powershift(temp.path())
        .args(["client", "env", "--shell", "tcsh"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn completion_does_not_need_oc() {
    let temp = tempdir().unwrap();

    powershift(temp.path())
        .env("POWERSHIFT_OC", "powershift-test-missing-oc")
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("powershift"));
}

#[test]
fn session_without_oc_fails() {
    let temp = tempdir().unwrap();

    powershift(temp.path())
        .env("POWERSHIFT_OC", "powershift-test-missing-oc")
        .args(["session", "user"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Failed: You do not appear to have the 'powershift-test-missing-oc' command line tool installed",
        ));
}

#[cfg(unix)]
#[test]
fn session_prints_oc_output() {
    let temp = tempdir().unwrap();

    // `echo help` passes the availability check, `echo whoami -c` is the
    // "context".
    powershift(temp.path())
        .env("POWERSHIFT_OC", "echo")
        .args(["session", "context"])
        .assert()
        .success()
        .stdout("whoami -c\n");
}

#[cfg(unix)]
#[test]
fn broken_oc_is_reported() {
    let temp = tempdir().unwrap();

    powershift(temp.path())
        .env("POWERSHIFT_OC", "false")
        .args(["server"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("non functional"));
}

#[cfg(unix)]
#[test]
fn unknown_plugin_is_reported() {
    let temp = tempdir().unwrap();

    powershift(temp.path())
        .env("POWERSHIFT_OC", "true")
        .args(["no-such-plugin-for-tests"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "unrecognized command 'no-such-plugin-for-tests'",
        ));
}
