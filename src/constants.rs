//! Global constants used throughout the extup codebase.
//!
//! Timeout durations, well-known file names, and protocol identifiers live
//! here so the values that define the tool's external behavior are
//! discoverable in one place.

use std::time::Duration;

/// Wall-clock budget for one updater subprocess spawned by the messaging
/// host (120 seconds).
///
/// The host blocks synchronously on the child; once this budget is spent
/// the child is killed and the request is answered with a timeout error.
pub const UPDATE_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for the archive download request (60 seconds).
///
/// Prevents a hung connection from stalling an update indefinitely.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Name of the configuration file, looked up next to the executable.
pub const CONFIG_FILE_NAME: &str = "updater_config.json";

/// Name of the directory inside the repository that holds the unpacked
/// extension payload.
pub const PAYLOAD_DIR_NAME: &str = "public";

/// Native messaging host identifier registered with the browser.
///
/// Must match the `name` field of the host manifest and the host name the
/// extension passes to `chrome.runtime.sendNativeMessage`.
pub const HOST_NAME: &str = "com.extup.updater";

/// The single action the messaging host recognizes.
pub const RUN_UPDATE_ACTION: &str = "run_update";

/// Fallback success line returned to the extension when the updater
/// subprocess exits cleanly but prints nothing.
pub const UPDATE_COMPLETE_MESSAGE: &str =
    "Update complete. Reload the extension in chrome://extensions";

/// User agent sent with archive download requests.
pub const USER_AGENT: &str = concat!("extup/", env!("CARGO_PKG_VERSION"));
