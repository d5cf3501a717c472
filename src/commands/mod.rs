//! Command implementations for osm-adapter CLI

pub mod check;
pub mod config;
pub mod manifests;
pub mod mesh;
pub mod releases;
