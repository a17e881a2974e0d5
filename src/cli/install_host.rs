//! The `install-host` command: one-time native messaging host setup.
//!
//! Writes the host manifest JSON that tells Chrome how to launch extup
//! and which extension may talk to it, then best-effort registers the
//! manifest location. On Windows registration is a registry value under
//! HKCU, written by shelling out to `reg.exe`; elsewhere Chrome reads the
//! manifest from a well-known directory and the command prints where to
//! put it. This step never interacts with the update path at runtime.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::HOST_NAME;
use crate::utils::fs::{ensure_dir, write_json_file};

/// Write and register the native messaging host manifest.
#[derive(Args)]
pub struct InstallHostCommand {
    /// Extension ID shown at chrome://extensions with Developer mode on
    #[arg(long)]
    extension_id: String,

    /// Launcher the browser starts as the host (defaults to the current
    /// executable)
    #[arg(long)]
    launcher: Option<PathBuf>,

    /// Directory to write the manifest into (defaults to the launcher's
    /// directory)
    #[arg(long)]
    out: Option<PathBuf>,
}

/// The native messaging host manifest Chrome reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostManifest {
    /// Host identifier the extension addresses
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Absolute path of the launcher binary
    pub path: String,
    /// Transport type; always "stdio" for native messaging
    #[serde(rename = "type")]
    pub kind: String,
    /// Origins allowed to connect; exactly one extension
    pub allowed_origins: Vec<String>,
}

impl HostManifest {
    /// Build a manifest for one launcher and one allowed extension.
    pub fn new(launcher: &Path, extension_id: &str) -> Self {
        Self {
            name: HOST_NAME.to_string(),
            description: "extup extension updater host".to_string(),
            path: launcher.display().to_string(),
            kind: "stdio".to_string(),
            allowed_origins: vec![format!("chrome-extension://{extension_id}/")],
        }
    }
}

impl InstallHostCommand {
    pub async fn execute(self) -> Result<()> {
        let extension_id = self.extension_id.trim();
        if extension_id.is_empty() {
            bail!("Extension ID is required");
        }

        let launcher = match self.launcher {
            Some(path) => path,
            None => std::env::current_exe().context("Failed to locate the extup executable")?,
        };
        if !launcher.is_file() {
            bail!("Launcher not found: {}", launcher.display());
        }
        let launcher = launcher
            .canonicalize()
            .with_context(|| format!("Failed to resolve launcher path: {}", launcher.display()))?;

        let out_dir = match self.out {
            Some(dir) => dir,
            None => launcher
                .parent()
                .context("Launcher path has no parent directory")?
                .to_path_buf(),
        };
        ensure_dir(&out_dir)?;

        let manifest = HostManifest::new(&launcher, extension_id);
        let manifest_path = out_dir.join(format!("{HOST_NAME}.json"));
        write_json_file(&manifest_path, &manifest)?;
        println!("{} Wrote {}", "✓".green(), manifest_path.display());

        register_manifest(&manifest_path);

        println!(
            "\nDone. The Update button in the extension popup can now reach the host."
        );
        Ok(())
    }
}

/// Register the manifest in the current user's registry hive.
///
/// Shells out to `reg.exe` rather than binding a registry library.
/// Failure falls back to printing the manual steps; registration problems
/// must not fail the install.
#[cfg(windows)]
fn register_manifest(manifest_path: &Path) {
    let key = format!(r"HKCU\Software\Google\Chrome\NativeMessagingHosts\{HOST_NAME}");
    let status = std::process::Command::new("reg")
        .args([
            "add",
            &key,
            "/ve",
            "/t",
            "REG_SZ",
            "/d",
            &manifest_path.display().to_string(),
            "/f",
        ])
        .status();

    match status {
        Ok(status) if status.success() => {
            println!("{} Registered {key}", "✓".green());
        }
        _ => {
            println!("Could not write the registry value. Register manually:");
            println!("  Key:   {key}");
            println!("  Value: {}", manifest_path.display());
        }
    }
}

/// Print where Chrome expects the manifest on this platform.
#[cfg(not(windows))]
fn register_manifest(manifest_path: &Path) {
    let manifest_dir = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|home| {
            home.join("Library/Application Support/Google/Chrome/NativeMessagingHosts")
        })
    } else {
        dirs::home_dir().map(|home| home.join(".config/google-chrome/NativeMessagingHosts"))
    };

    match manifest_dir {
        Some(dir) => {
            println!("Copy the manifest where Chrome looks for it:");
            println!("  cp {} {}/", manifest_path.display(), dir.display());
        }
        None => {
            println!(
                "Copy {} into Chrome's NativeMessagingHosts directory for your platform.",
                manifest_path.display()
            );
        }
    }
}
