//! Release metadata and repository listings from the hosting API

pub mod client;
pub mod releases;
pub mod tree;
pub mod types;

pub use client::ApiClient;
pub use releases::{ReleaseLister, select_versions};
pub use tree::TreePathResolver;
pub use types::{Asset, Release, Version, VersionOrdering};
