//! Failure-surface tests for `extup update`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::write_config;

fn extup() -> Command {
    Command::cargo_bin("extup").unwrap()
}

#[test]
fn placeholder_repo_url_fails_fast() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        r#"{"repo_url": "https://github.com/YOUR_USERNAME/YOUR_REPO"}"#,
    );

    extup()
        .arg("update")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid configuration"))
        .stderr(predicate::str::contains("updater_config.json"));
}

#[test]
fn empty_repo_url_fails_fast() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), r#"{"branch": "main"}"#);

    extup()
        .arg("update")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("repo_url is not set"));
}

#[test]
fn unparsable_locator_is_reported_without_a_download() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        r#"{"repo_url": "https://example.com/owner/repo"}"#,
    );

    extup()
        .arg("update")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Could not parse repository locator"))
        .stderr(predicate::str::contains("https://github.com/owner/repo"));
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let temp = TempDir::new().unwrap();

    extup()
        .arg("update")
        .arg("--config")
        .arg(temp.path().join("does-not-exist.json"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does-not-exist.json"));
}
