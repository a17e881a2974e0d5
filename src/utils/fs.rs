//! File system utilities for extup.
//!
//! Small, synchronous helpers shared by the updater and the host
//! installer. All functions attach path context to their errors so a
//! failure deep inside a recursive copy still names the file involved.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Create a directory and all parent directories if they don't exist.
///
/// Succeeds silently when the directory is already present.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Recursively copy a directory tree.
///
/// Files replace any existing file at the destination. Symlinks and other
/// special file types are skipped.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    ensure_dir(dst)?;

    for entry in
        fs::read_dir(src).with_context(|| format!("Failed to read directory: {}", src.display()))?
    {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir(&src_path, &dst_path)?;
        } else if file_type.is_file() {
            fs::copy(&src_path, &dst_path).with_context(|| {
                format!(
                    "Failed to copy file from {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }

    Ok(())
}

/// Remove a directory tree, tolerating a path that doesn't exist.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read and deserialize a JSON file.
pub fn read_json_file<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))
}

/// Serialize a value to pretty-printed JSON and write it to a file.
pub fn write_json_file<T>(path: &Path, data: &T) -> Result<()>
where
    T: Serialize,
{
    let content =
        serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")?;
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a/b/c");

        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Second call is a no-op
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn copy_dir_copies_nested_tree() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("top.txt"), "top").unwrap();
        fs::write(src.join("sub/inner.txt"), "inner").unwrap();

        let dst = temp.path().join("dst");
        copy_dir(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("top.txt")).unwrap(), "top");
        assert_eq!(
            fs::read_to_string(dst.join("sub/inner.txt")).unwrap(),
            "inner"
        );
    }

    #[test]
    fn remove_dir_all_tolerates_missing_path() {
        let temp = TempDir::new().unwrap();
        remove_dir_all(&temp.path().join("does-not-exist")).unwrap();
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn json_file_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sample.json");
        let value = Sample {
            name: "extup".to_string(),
            count: 3,
        };

        write_json_file(&path, &value).unwrap();
        let loaded: Sample = read_json_file(&path).unwrap();
        assert_eq!(loaded, value);
    }

    #[test]
    fn read_json_file_reports_parse_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let result: Result<Sample> = read_json_file(&path);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("broken.json"));
    }
}
