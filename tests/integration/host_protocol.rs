//! Native messaging protocol tests against the real binary.

use assert_cmd::Command;
use tempfile::TempDir;

use crate::common::{frame, unframe, write_config};

fn extup() -> Command {
    Command::cargo_bin("extup").unwrap()
}

#[test]
fn empty_stdin_exits_silently() {
    let output = extup().arg("host").output().unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn zero_length_prefix_exits_silently() {
    let output = extup()
        .arg("host")
        .write_stdin(0u32.to_ne_bytes().to_vec())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn unknown_action_yields_a_framed_error() {
    let output = extup()
        .arg("host")
        .write_stdin(frame(r#"{"action": "ping"}"#))
        .output()
        .unwrap();

    assert!(output.status.success());
    let response = unframe(&output.stdout);
    assert_eq!(response["success"], false);
    assert_eq!(response["message"], "Unknown action: ping");
}

#[test]
fn action_is_trimmed_and_case_folded() {
    let output = extup()
        .arg("host")
        .write_stdin(frame(r#"{"action": "  Ping "}"#))
        .output()
        .unwrap();

    let response = unframe(&output.stdout);
    assert_eq!(response["message"], "Unknown action: ping");
}

#[test]
fn run_update_spawns_the_updater_and_relays_its_failure() {
    // Placeholder config makes the spawned `extup update` exit 1; the
    // host must relay that as a structured error response, not crash.
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        r#"{"repo_url": "https://github.com/YOUR_USERNAME/YOUR_REPO"}"#,
    );

    let output = extup()
        .arg("host")
        .arg("--config")
        .arg(&config)
        .write_stdin(frame(r#"{"action": "run_update"}"#))
        .output()
        .unwrap();

    assert!(output.status.success());
    let response = unframe(&output.stdout);
    assert_eq!(response["success"], false);
    let message = response["message"].as_str().unwrap();
    assert!(
        message.contains("Invalid configuration"),
        "unexpected message: {message}"
    );
}

#[test]
fn undecodable_payload_yields_a_framed_error() {
    let output = extup()
        .arg("host")
        .write_stdin(frame("not json"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let response = unframe(&output.stdout);
    assert_eq!(response["success"], false);
}
