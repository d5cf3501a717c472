//! Mesh installation: script delegation and manifest handling

pub mod executor;
pub mod manifest;

pub use executor::{MeshOperations, ScriptExecutor, Status};
pub use manifest::apply_manifest;
