//! Updater configuration.
//!
//! Configuration lives in a flat JSON file, `updater_config.json`, looked
//! up next to the extup executable (or at an explicit `--config` path).
//! Every key is optional; missing keys take their default, so a partial
//! file merges over the defaults field by field. The schema is flat and
//! no deep merge is needed.
//!
//! ```json
//! {
//!   "repo_url": "https://github.com/owner/repo",
//!   "branch": "main",
//!   "target_path": ""
//! }
//! ```
//!
//! An empty `target_path` means "the `public` directory next to the
//! executable"; anything else is used as-is after tilde expansion.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::{CONFIG_FILE_NAME, PAYLOAD_DIR_NAME};
use crate::core::UpdaterError;
use crate::utils::fs::read_json_file;

/// Placeholder tokens left in a config template that was never edited.
const PLACEHOLDER_TOKENS: [&str; 2] = ["YOUR_USERNAME", "YOUR_REPO"];

/// The updater's configuration, merged from defaults and the optional
/// config file.
///
/// Loaded once per run and treated as immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// GitHub repository locator, HTTPS URL or SSH shorthand form
    pub repo_url: String,
    /// Branch whose archive is downloaded; empty falls back to "main"
    pub branch: String,
    /// Directory the browser loads as an unpacked extension; empty means
    /// the default location next to the executable
    pub target_path: String,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            repo_url: String::new(),
            branch: "main".to_string(),
            target_path: String::new(),
        }
    }
}

impl UpdaterConfig {
    /// Load configuration from an optional explicit path.
    ///
    /// With an explicit path the file must exist and parse; the user asked
    /// for that file specifically. Without one, the default location is
    /// tried: a missing file yields the defaults, and an unreadable or
    /// malformed file yields the defaults with a warning, so a botched
    /// edit degrades instead of bricking the updater.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path()?;
                if !path.exists() {
                    debug!("no {} found, using defaults", CONFIG_FILE_NAME);
                    return Ok(Self::default());
                }
                match Self::load_from(&path) {
                    Ok(config) => Ok(config),
                    Err(err) => {
                        warn!("could not read {}: {err:#}. Using defaults.", path.display());
                        Ok(Self::default())
                    }
                }
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Self = read_json_file(path)?;
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default config file location: `updater_config.json` next to the
    /// running executable.
    pub fn default_path() -> Result<PathBuf> {
        let exe = std::env::current_exe().context("Failed to locate the extup executable")?;
        let dir = exe
            .parent()
            .context("Executable path has no parent directory")?;
        Ok(dir.join(CONFIG_FILE_NAME))
    }

    /// Reject configurations whose repository locator is missing or still
    /// carries placeholder text.
    ///
    /// This runs before any network activity so an unedited template fails
    /// fast with a clear message.
    pub fn validate(&self) -> Result<(), UpdaterError> {
        let repo_url = self.repo_url.trim();
        if repo_url.is_empty() {
            return Err(UpdaterError::ConfigurationInvalid {
                reason: "repo_url is not set".to_string(),
            });
        }
        if PLACEHOLDER_TOKENS.iter().any(|token| repo_url.contains(token)) {
            return Err(UpdaterError::ConfigurationInvalid {
                reason: "repo_url still contains placeholder text".to_string(),
            });
        }
        Ok(())
    }

    /// The branch to download, with the empty string falling back to
    /// "main".
    pub fn effective_branch(&self) -> &str {
        let branch = self.branch.trim();
        if branch.is_empty() { "main" } else { branch }
    }

    /// Resolve the physical target directory.
    ///
    /// An unset `target_path` resolves to the payload directory next to
    /// the running executable. A set one is used after tilde expansion.
    pub fn resolve_target(&self) -> Result<PathBuf> {
        let exe = std::env::current_exe().context("Failed to locate the extup executable")?;
        let exe_dir = exe
            .parent()
            .context("Executable path has no parent directory")?;
        Ok(self.resolve_target_from(exe_dir))
    }

    /// Resolve the target directory relative to a given executable
    /// directory. Split out from [`resolve_target`](Self::resolve_target)
    /// so tests can pin the location.
    pub fn resolve_target_from(&self, exe_dir: &Path) -> PathBuf {
        let raw = self.target_path.trim();
        if raw.is_empty() {
            exe_dir.join(PAYLOAD_DIR_NAME)
        } else {
            PathBuf::from(shellexpand::tilde(raw).into_owned())
        }
    }
}
