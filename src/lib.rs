//! extup - self-updater for unpacked browser extensions.
//!
//! extup keeps a locally loaded ("Load unpacked") browser extension in
//! sync with its GitHub repository without requiring git or Node.js on
//! the machine. An update is one shot: download the branch archive,
//! extract it, and mirror the repository's `public/` directory into the
//! folder the browser loads. A Chrome native messaging host lets the
//! extension itself trigger that update from its popup.
//!
//! # Architecture
//!
//! Control flow for a browser-triggered update:
//!
//! ```text
//! extension popup
//!   -> `extup host`      (one framed request on stdin)
//!     -> `extup update`  (subprocess, 120 s budget)
//!       -> download archive -> extract -> mirror public/ into target
//!   <- one framed response on stdout
//! ```
//!
//! Every run is independent; there is no state shared between
//! invocations and no retry logic. Temporary downloads and extractions
//! are tied to RAII handles and vanish on every exit path.
//!
//! # Core Modules
//!
//! - [`cli`] - command-line interface (`update`, `host`, `install-host`)
//! - [`config`] - updater_config.json loading with field-level defaults
//! - [`source`] - repository locator parsing and archive URLs
//! - [`archive`] - archive download and extraction to temporary storage
//! - [`installer`] - payload resolution and mirror copy into the target
//! - [`messaging`] - the native messaging frame codec
//!
//! # Supporting Modules
//!
//! - [`constants`] - timeouts, file names, and protocol identifiers
//! - [`core`] - error types and user-facing error reporting
//! - [`utils`] - filesystem helpers

pub mod archive;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod installer;
pub mod messaging;
pub mod source;
pub mod utils;
