//! Archive download and extraction.
//!
//! The fetcher downloads a branch archive to a temporary file and extracts
//! it into a temporary directory. Both live only as long as the returned
//! [`NamedTempFile`] and [`TempDir`] handles: dropping them deletes the
//! data on every exit path, success or failure, and a deletion failure is
//! swallowed by the handle rather than masking the primary result.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};
use tracing::{debug, info};

use crate::constants::{DOWNLOAD_TIMEOUT, USER_AGENT};
use crate::core::UpdaterError;

/// Downloads repository archives over HTTPS.
///
/// Holds a configured [`reqwest::Client`] so the user agent and request
/// timeout apply to every download.
pub struct ArchiveFetcher {
    client: reqwest::Client,
}

impl ArchiveFetcher {
    /// Create a fetcher with the extup user agent and download timeout.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Download `url` into a temporary `.zip` file.
    ///
    /// # Errors
    ///
    /// Returns [`UpdaterError::DownloadFailed`] for a non-success HTTP
    /// status, and a contextual error for connection or I/O failures.
    pub async fn download(&self, url: &str) -> Result<NamedTempFile> {
        info!("downloading {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdaterError::DownloadFailed {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            }
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read archive body")?;

        let mut file = tempfile::Builder::new()
            .prefix("extup-")
            .suffix(".zip")
            .tempfile()
            .context("Failed to create temporary archive file")?;
        file.write_all(&bytes)
            .context("Failed to write archive to disk")?;

        debug!("downloaded {} bytes to {}", bytes.len(), file.path().display());
        Ok(file)
    }
}

/// Extract a zip archive into a fresh temporary directory.
///
/// The whole archive is extracted; locating the payload inside it is the
/// installer's job.
pub fn extract_archive(archive: &Path) -> Result<TempDir> {
    let file = File::open(archive)
        .with_context(|| format!("Failed to open archive: {}", archive.display()))?;
    let mut zip =
        zip::ZipArchive::new(file).context("Downloaded file is not a valid zip archive")?;

    let dir = tempfile::Builder::new()
        .prefix("extup-")
        .tempdir()
        .context("Failed to create temporary extraction directory")?;

    let entry_count = zip.len();
    zip.extract(dir.path())
        .context("Failed to extract archive")?;

    debug!("extracted {entry_count} entries to {}", dir.path().display());
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_test_zip(entries: &[(&str, Option<&str>)]) -> NamedTempFile {
        let file = tempfile::Builder::new().suffix(".zip").tempfile().unwrap();
        let mut writer = ZipWriter::new(file.reopen().unwrap());
        let options = SimpleFileOptions::default();
        for (name, contents) in entries {
            match contents {
                Some(body) => {
                    writer.start_file(*name, options).unwrap();
                    writer.write_all(body.as_bytes()).unwrap();
                }
                None => {
                    writer.add_directory(*name, options).unwrap();
                }
            }
        }
        writer.finish().unwrap();
        file
    }

    #[test]
    fn extracts_files_and_directories() {
        let archive = write_test_zip(&[
            ("repo-main/", None),
            ("repo-main/public/", None),
            ("repo-main/public/manifest.json", Some("{}")),
            ("repo-main/README.md", Some("readme")),
        ]);

        let extracted = extract_archive(archive.path()).unwrap();
        let root = extracted.path();
        assert!(root.join("repo-main/public").is_dir());
        assert_eq!(
            std::fs::read_to_string(root.join("repo-main/public/manifest.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn rejects_a_non_zip_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"this is not a zip archive").unwrap();

        let err = extract_archive(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("not a valid zip archive"));
    }

    #[test]
    fn extraction_directory_is_removed_on_drop() {
        let archive = write_test_zip(&[("public/", None), ("public/app.js", Some("js"))]);
        let extracted = extract_archive(archive.path()).unwrap();
        let path = extracted.path().to_path_buf();
        assert!(path.exists());

        drop(extracted);
        assert!(!path.exists());
    }
}
