//! Core types and error handling shared by every extup module.

pub mod error;

pub use error::{ErrorContext, UpdaterError, user_friendly_error};
