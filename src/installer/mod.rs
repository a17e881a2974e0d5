//! Payload installation: locate the extension payload inside an extracted
//! archive and mirror it into the target directory.
//!
//! GitHub wraps branch archives in a single top-level directory named
//! `repo-branch`, but the exact shape varies, so the resolver tries an
//! ordered list of candidate locations and takes the first match. The
//! mirror step then overwrites the target: directories are replaced
//! wholesale, files are copied over. Destination entries with no source
//! counterpart are left alone, so stale top-level files can persist across
//! updates.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::PAYLOAD_DIR_NAME;
use crate::core::UpdaterError;
use crate::utils::fs::{copy_dir, ensure_dir, remove_dir_all};

/// Locate the `public` payload directory inside an extraction root.
///
/// Candidate locations are tried in order:
/// 1. directly at the root
/// 2. one level down, inside any directory entry
/// 3. if the root has exactly one entry, an entry named `public` inside it
///
/// The third rule tolerates archives whose single top-level entry hides
/// the payload under an unexpected shape; a match found there must still
/// be a directory or resolution fails.
///
/// # Errors
///
/// Returns [`UpdaterError::ArchiveLayoutUnexpected`] listing the root's
/// top-level entry names when no candidate matches.
pub fn resolve_payload_dir(root: &Path) -> Result<PathBuf, UpdaterError> {
    let mut entries: Vec<String> = fs::read_dir(root)
        .map_err(UpdaterError::from)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();

    let direct = root.join(PAYLOAD_DIR_NAME);
    if direct.is_dir() {
        debug!("payload found at extraction root");
        return Ok(direct);
    }

    for name in &entries {
        let top = root.join(name);
        if top.is_dir() {
            let candidate = top.join(PAYLOAD_DIR_NAME);
            if candidate.is_dir() {
                debug!("payload found inside top-level entry '{name}'");
                return Ok(candidate);
            }
        }
    }

    if entries.len() == 1 {
        let only = root.join(&entries[0]);
        if only.is_dir() {
            let candidate = only.join(PAYLOAD_DIR_NAME);
            // An entry named `public` that is not a directory still fails
            if candidate.is_dir() {
                debug!("payload found inside sole top-level entry");
                return Ok(candidate);
            }
        }
    }

    Err(UpdaterError::ArchiveLayoutUnexpected { entries })
}

/// Mirror the payload directory into the target directory.
///
/// For each top-level entry of `src`:
/// - a directory replaces any same-named destination directory wholesale
///   (the old directory is deleted first, never merged)
/// - a file is copied over any existing file
///
/// On return the target's top-level entries contain everything the source
/// had at copy time. Pre-existing destination entries that the source does
/// not name are not removed.
pub fn mirror_dir(src: &Path, dst: &Path) -> Result<()> {
    ensure_dir(dst)?;

    for entry in fs::read_dir(src)
        .with_context(|| format!("Failed to read directory: {}", src.display()))?
    {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if file_type.is_dir() {
            if dst_path.is_dir() {
                remove_dir_all(&dst_path)?;
            }
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

    info!("mirrored {} into {}", src.display(), dst.display());
    Ok(())
}
