//! Kubernetes operations

pub mod kubectl;
pub mod namespaces;

pub use namespaces::{ensure_namespace, ensure_namespace_blocking};
