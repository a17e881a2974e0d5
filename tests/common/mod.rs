//! Shared helpers for extup integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Wrap a JSON string in a native messaging frame.
pub fn frame(json: &str) -> Vec<u8> {
    let mut bytes = (json.len() as u32).to_ne_bytes().to_vec();
    bytes.extend_from_slice(json.as_bytes());
    bytes
}

/// Split a native messaging frame into its decoded JSON payload.
///
/// Panics if the buffer is not exactly one well-formed frame.
pub fn unframe(buffer: &[u8]) -> serde_json::Value {
    assert!(buffer.len() >= 4, "output shorter than a length prefix");
    let length = u32::from_ne_bytes(buffer[..4].try_into().unwrap()) as usize;
    assert_eq!(length, buffer.len() - 4, "length prefix does not match payload");
    serde_json::from_slice(&buffer[4..]).expect("payload is not valid JSON")
}

/// Write an updater config file into `dir` and return its path.
pub fn write_config(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("updater_config.json");
    fs::write(&path, json).unwrap();
    path
}
