//! Error types for the adapter library

use std::process::ExitStatus;

use thiserror::Error;

use crate::install::Status;

/// Failure of a single GET against the hosting API
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status code: {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid JSON from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure while walking a repository tree
#[derive(Error, Debug)]
pub enum TreeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("malformed commit listing from {url}: {reason}")]
    Lookup { url: String, reason: String },

    #[error("invalid {field} field in tree entry")]
    Schema { field: &'static str },

    #[error("path segment '{segment}' not found under '{parent}'")]
    NotFound { segment: String, parent: String },
}

/// Failure to locate or run an external executable
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("executable {path} not found")]
    NotFound {
        path: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to start {path}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to {path}")]
    Stdin {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for {path}")]
    Wait {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} exited with {status}")]
    Failed { path: String, status: ExitStatus },
}

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("failed to get latest releases")]
    Fetch(#[from] FetchError),

    #[error("invalid version pattern")]
    Pattern(#[from] regex::Error),

    #[error("failed to get manifest names")]
    ManifestNames(#[from] TreeError),

    #[error("mesh operation failed while {status}")]
    Process {
        status: Status,
        #[source]
        source: ProcessError,
    },

    #[error("Kubernetes API error")]
    Cluster(#[from] kube::Error),

    #[error("failed to apply manifest in namespace {namespace}")]
    Manifest {
        namespace: String,
        #[source]
        source: ProcessError,
    },

    #[error("failed to start async runtime")]
    Runtime(#[source] std::io::Error),
}

impl AdapterError {
    /// Phase the mesh operation had reached when it failed
    pub fn status(&self) -> Option<Status> {
        match self {
            AdapterError::Process { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;
