//! Error handling for extup.
//!
//! The error system has two layers:
//! 1. [`UpdaterError`] - strongly-typed errors for every failure mode the
//!    updater and the messaging host can hit
//! 2. [`ErrorContext`] - a wrapper that adds a user-facing suggestion for
//!    terminal display
//!
//! Every failure is terminal for the current invocation; nothing is
//! retried. Commands propagate `anyhow::Error` internally and `main`
//! converts whatever bubbles up with [`user_friendly_error`] before
//! exiting non-zero. The messaging host takes a different path: it folds
//! the error text into a response frame instead of letting the process
//! die without answering.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for extup operations.
///
/// Each variant represents one distinct failure surface, so callers can
/// match on the kind and the rendered message stays short and specific.
#[derive(Error, Debug)]
pub enum UpdaterError {
    /// Configuration is missing required values or still contains
    /// placeholder text from the template.
    #[error("Invalid configuration: {reason}")]
    ConfigurationInvalid {
        /// Why the configuration was rejected
        reason: String,
    },

    /// The repository locator could not be split into an owner and a
    /// repository name.
    ///
    /// Reported before any network activity, so a typo in the config never
    /// shows up as a download failure.
    #[error("Could not parse repository locator: {input}")]
    LocatorUnparsable {
        /// The locator string as found in the configuration
        input: String,
    },

    /// The archive download returned a non-success HTTP status.
    #[error("Download failed ({status}): {reason}")]
    DownloadFailed {
        /// HTTP status code returned by the host
        status: u16,
        /// Canonical reason phrase for the status
        reason: String,
    },

    /// The extracted archive does not contain the expected payload
    /// directory anywhere the resolver looks.
    ///
    /// Carries the extraction root's top-level entry names so the user can
    /// see what the archive actually contained.
    #[error("No 'public' directory found in the downloaded archive. Top-level entries: {}", .entries.join(", "))]
    ArchiveLayoutUnexpected {
        /// Names of the entries found at the extraction root
        entries: Vec<String>,
    },

    /// Generic filesystem failure during copy, create, or remove.
    #[error("File system error: {message}")]
    FileSystemError {
        /// Description of the failed operation
        message: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The updater subprocess exceeded its wall-clock budget.
    #[error("Update timed out after {seconds} seconds")]
    Timeout {
        /// The budget that was exceeded, in seconds
        seconds: u64,
    },

    /// The messaging host received a request with an action it does not
    /// recognize.
    #[error("Unknown action: {action}")]
    UnknownAction {
        /// The unrecognized action, trimmed and lowercased
        action: String,
    },
}

impl From<std::io::Error> for UpdaterError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystemError {
            message: err.to_string(),
            source: err,
        }
    }
}

/// An error paired with user-facing help for terminal display.
///
/// Produced by [`user_friendly_error`] just before the process exits, so
/// the last thing the user sees is the error plus something actionable.
pub struct ErrorContext {
    /// The underlying error
    pub error: anyhow::Error,
    /// A short, actionable suggestion
    pub suggestion: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion attached.
    pub fn new(error: anyhow::Error) -> Self {
        Self {
            error,
            suggestion: None,
        }
    }

    /// Attach a suggestion line shown below the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Print the error (and its cause chain) to stderr with color.
    pub fn display(&self) {
        eprintln!("{} {}", "Error:".red().bold(), self.error);

        // Walk the anyhow context chain below the headline
        for cause in self.error.chain().skip(1) {
            eprintln!("  {} {}", "Caused by:".yellow(), cause);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("\n{} {}", "Suggestion:".cyan(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a suggestion matched to
/// the failure kind.
///
/// Downcasts to [`UpdaterError`] where possible; unknown error types pass
/// through with no suggestion.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = match error.downcast_ref::<UpdaterError>() {
        Some(UpdaterError::ConfigurationInvalid { .. }) => Some(format!(
            "Edit {} next to the extup executable and set repo_url to your GitHub repository \
             (e.g. https://github.com/owner/repo)",
            crate::constants::CONFIG_FILE_NAME
        )),
        Some(UpdaterError::LocatorUnparsable { .. }) => {
            Some("Use the form https://github.com/owner/repo or git@github.com:owner/repo.git".to_string())
        }
        Some(UpdaterError::DownloadFailed { .. }) => {
            Some("Check that repo_url and branch exist and that the repository is public".to_string())
        }
        Some(UpdaterError::ArchiveLayoutUnexpected { .. }) => {
            Some("Check that the repository contains a 'public/' directory at its root".to_string())
        }
        _ => None,
    };

    let context = ErrorContext::new(error);
    match suggestion {
        Some(s) => context.with_suggestion(s),
        None => context,
    }
}
