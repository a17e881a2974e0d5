//! The `update` command: the orchestrator that drives one full update.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;
use tracing::info;

use crate::archive::{ArchiveFetcher, extract_archive};
use crate::config::UpdaterConfig;
use crate::constants::UPDATE_COMPLETE_MESSAGE;
use crate::installer::{mirror_dir, resolve_payload_dir};
use crate::source::RepoLocator;

/// Download the configured repository branch as a zip archive and mirror
/// its `public/` directory into the extension folder.
///
/// The run is a straight sequence: load and validate configuration, parse
/// the repository locator, download, extract, locate the payload, mirror
/// it into the target. Any failure aborts the run with a non-zero exit;
/// nothing is retried. The downloaded archive and the extraction
/// directory are temporary and removed on every exit path.
#[derive(Args)]
pub struct UpdateCommand {}

impl UpdateCommand {
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let config = UpdaterConfig::load(config_path).await?;
        config.validate()?;

        let target = config.resolve_target()?;
        info!("target directory: {}", target.display());

        let locator = RepoLocator::parse(&config.repo_url)?;
        let url = locator.archive_url(config.effective_branch());

        let fetcher = ArchiveFetcher::new()?;
        let archive = fetcher.download(&url).await?;
        let extracted = extract_archive(archive.path())?;

        let payload = resolve_payload_dir(extracted.path())?;
        mirror_dir(&payload, &target)?;

        println!("{} {}", "✓".green(), UPDATE_COMPLETE_MESSAGE);
        println!("  Target: {}", target.display());
        Ok(())
    }
}
