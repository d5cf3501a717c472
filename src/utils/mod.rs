//! Utility modules for osm-adapter

pub mod logger;
pub mod prereqs;
pub mod prompt;

// Re-export commonly used items
pub use logger::{log_error, log_info, log_warn};
pub use prereqs::{CommonPrereqs, Prerequisite};
pub use prompt::{confirm, confirm_destructive};
