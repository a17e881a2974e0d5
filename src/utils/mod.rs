//! Cross-platform utility modules.

pub mod fs;
