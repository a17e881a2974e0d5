//! Command-line interface for extup.
//!
//! Three subcommands cover the tool's lifecycle:
//! - `update` - download the repository archive and mirror its payload
//!   into the extension directory
//! - `host` - run as a Chrome native messaging host, answering one
//!   request per invocation
//! - `install-host` - write and register the native messaging host
//!   manifest (one-time setup)
//!
//! Global flags apply to every subcommand: `--verbose` and `--quiet`
//! control log output, `--config` points at an alternate configuration
//! file. Logs always go to stderr; stdout belongs to command results and,
//! for `host`, to the native messaging wire.

mod host;
mod install_host;
mod update;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Main CLI structure for extup.
#[derive(Parser)]
#[command(
    name = "extup",
    about = "Self-updater for unpacked browser extensions",
    version,
    long_about = "extup keeps an unpacked browser extension in sync with a GitHub repository. \
                  It downloads a branch archive, copies the repository's public/ directory into \
                  the folder the browser loads, and can run as a Chrome native messaging host so \
                  the extension itself can trigger updates."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug) output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file (defaults to updater_config.json
    /// next to the executable)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Download the configured repository branch and update the extension
    /// directory.
    Update(update::UpdateCommand),

    /// Run as a Chrome native messaging host (reads one framed request
    /// from stdin, writes one framed response to stdout).
    Host(host::HostCommand),

    /// Write the native messaging host manifest and register it with the
    /// browser.
    InstallHost(install_host::InstallHostCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        match self.command {
            Commands::Update(cmd) => cmd.execute(self.config.as_deref()).await,
            Commands::Host(cmd) => cmd.execute(self.config.as_deref()).await,
            Commands::InstallHost(cmd) => cmd.execute().await,
        }
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// stderr is mandatory here: in `host` mode stdout carries nothing but
/// response frames, and the browser would reject a log line as a corrupt
/// frame. `RUST_LOG` still overrides the default filter.
fn init_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
