//! Repository locator parsing.
//!
//! A locator identifies which repository archive to fetch. Two shapes are
//! accepted, matching what people paste from the GitHub UI:
//!
//! - HTTPS URL form: `https://github.com/owner/repo`, with or without a
//!   trailing slash or a `.git` suffix (plain `http://` is tolerated too)
//! - SSH shorthand form: `git@github.com:owner/repo.git`
//!
//! Anything else is a [`UpdaterError::LocatorUnparsable`], reported before
//! any network activity so a typo never masquerades as a download failure.

use std::fmt;

use crate::core::UpdaterError;

/// The owner and repository name identifying which archive to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name, with any `.git` suffix stripped
    pub repo: String,
}

impl RepoLocator {
    /// Parse a locator from its HTTPS URL or SSH shorthand form.
    ///
    /// # Errors
    ///
    /// Returns [`UpdaterError::LocatorUnparsable`] when the input does not
    /// contain `github.com` or cannot be split into owner and name.
    pub fn parse(input: &str) -> Result<Self, UpdaterError> {
        let trimmed = input.trim().trim_end_matches('/');

        if trimmed.contains("github.com") {
            if let Some(rest) = trimmed
                .strip_prefix("https://github.com/")
                .or_else(|| trimmed.strip_prefix("http://github.com/"))
            {
                let mut parts = rest.split('/');
                if let (Some(owner), Some(repo)) = (parts.next(), parts.next()) {
                    if !owner.is_empty() && !repo.is_empty() {
                        return Ok(Self {
                            owner: owner.to_string(),
                            repo: repo.trim_end_matches(".git").to_string(),
                        });
                    }
                }
            }

            if let Some((_, rest)) = trimmed.split_once("git@github.com:") {
                let rest = rest.trim_end_matches(".git");
                if let Some((owner, repo)) = rest.split_once('/') {
                    if !owner.is_empty() && !repo.is_empty() {
                        return Ok(Self {
                            owner: owner.to_string(),
                            repo: repo.to_string(),
                        });
                    }
                }
            }
        }

        Err(UpdaterError::LocatorUnparsable {
            input: input.to_string(),
        })
    }

    /// URL of the zip archive for a branch of this repository.
    pub fn archive_url(&self, branch: &str) -> String {
        format!(
            "https://github.com/{}/{}/archive/refs/heads/{branch}.zip",
            self.owner, self.repo
        )
    }
}

impl fmt::Display for RepoLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
