//! osm-adapter library
//!
//! Installs and removes the Open Service Mesh control plane through external
//! scripts, and reads release metadata and manifest listings from the
//! project's repository API.

pub mod commands;
pub mod config;
pub mod error;
pub mod github;
pub mod install;
pub mod k8s;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{AdapterError, Result};
