//! Host manifest installation tests.

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

fn extup() -> Command {
    Command::cargo_bin("extup").unwrap()
}

#[test]
fn writes_a_manifest_for_the_given_extension() {
    let temp = TempDir::new().unwrap();
    let launcher = temp.path().join("run_host.sh");
    fs::write(&launcher, "#!/bin/sh\n").unwrap();
    let out_dir = temp.path().join("manifests");

    extup()
        .arg("install-host")
        .arg("--extension-id")
        .arg("abcdefghijklmnop")
        .arg("--launcher")
        .arg(&launcher)
        .arg("--out")
        .arg(&out_dir)
        .assert()
        .success();

    let manifest_path = out_dir.join("com.extup.updater.json");
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();

    assert_eq!(manifest["name"], "com.extup.updater");
    assert_eq!(manifest["type"], "stdio");
    assert_eq!(
        manifest["allowed_origins"],
        serde_json::json!(["chrome-extension://abcdefghijklmnop/"])
    );
    let path = manifest["path"].as_str().unwrap();
    assert!(path.contains("run_host"));
}

#[test]
fn defaults_the_manifest_directory_to_the_launcher_directory() {
    let temp = TempDir::new().unwrap();
    let launcher = temp.path().join("run_host.sh");
    fs::write(&launcher, "#!/bin/sh\n").unwrap();

    extup()
        .arg("install-host")
        .arg("--extension-id")
        .arg("abcdefghijklmnop")
        .arg("--launcher")
        .arg(&launcher)
        .assert()
        .success();

    assert!(temp.path().join("com.extup.updater.json").is_file());
}

#[test]
fn blank_extension_id_is_rejected() {
    let temp = TempDir::new().unwrap();
    let launcher = temp.path().join("run_host.sh");
    fs::write(&launcher, "#!/bin/sh\n").unwrap();

    extup()
        .arg("install-host")
        .arg("--extension-id")
        .arg("   ")
        .arg("--launcher")
        .arg(&launcher)
        .assert()
        .failure()
        .code(1);
}

#[test]
fn missing_launcher_is_rejected() {
    let temp = TempDir::new().unwrap();

    extup()
        .arg("install-host")
        .arg("--extension-id")
        .arg("abcdefghijklmnop")
        .arg("--launcher")
        .arg(temp.path().join("no-such-launcher"))
        .assert()
        .failure()
        .code(1);
}
