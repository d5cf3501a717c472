//! Prerequisite checking for required tools and scripts

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrereqError {
    #[error("'{name}' not found or not executable")]
    NotFound { name: String },
}

/// Trait for checking prerequisites
pub trait Prerequisite {
    /// Name of the prerequisite
    fn name(&self) -> &str;

    /// Check if the prerequisite is available
    fn check(&self) -> Result<PathBuf, PrereqError>;

    /// Installation hint for the user
    fn install_hint(&self) -> &str;
}

/// Prerequisite satisfied by an executable, looked up on PATH or, when the
/// name contains a separator, relative to the working directory
pub struct CommandPrereq {
    pub name: String,
    pub hint: String,
}

impl CommandPrereq {
    pub fn new(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
        }
    }
}

impl Prerequisite for CommandPrereq {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> Result<PathBuf, PrereqError> {
        which::which(&self.name).map_err(|_| PrereqError::NotFound {
            name: self.name.clone(),
        })
    }

    fn install_hint(&self) -> &str {
        &self.hint
    }
}

/// Common prerequisites for osm-adapter
pub struct CommonPrereqs;

impl CommonPrereqs {
    /// Get kubectl prerequisite
    pub fn kubectl() -> CommandPrereq {
        CommandPrereq::new(
            "kubectl",
            "Install from: https://kubernetes.io/docs/tasks/tools/",
        )
    }

    /// Mesh install or delete script
    pub fn script(path: &Path) -> CommandPrereq {
        CommandPrereq::new(
            path.display().to_string(),
            "Check the [scripts] section of the config and the file's execute bit",
        )
    }

    /// Check all prerequisites
    /// Returns (found, missing) where missing pairs a name with its hint
    pub fn check_all(prereqs: &[&dyn Prerequisite]) -> (Vec<PathBuf>, Vec<(String, String)>) {
        let mut found = Vec::new();
        let mut missing = Vec::new();

        for prereq in prereqs {
            match prereq.check() {
                Ok(path) => found.push(path),
                Err(PrereqError::NotFound { name }) => {
                    missing.push((name, prereq.install_hint().to_string()))
                }
            }
        }

        (found, missing)
    }
}
