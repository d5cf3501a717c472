//! Mesh install/delete through external scripts

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{AdapterError, ProcessError, Result};

/// Default install script, relative to the working directory
pub const DEFAULT_INSTALL_SCRIPT: &str = "./scripts/create_osmctl.sh";

/// Default delete script, relative to the working directory
pub const DEFAULT_DELETE_SCRIPT: &str = "./scripts/delete_osmctl.sh";

/// Environment variable the scripts read the mesh version from
pub const DEFAULT_VERSION_ENV: &str = "OSM_VERSION";

/// Environment variable the scripts read the mesh namespace from
pub const NAMESPACE_ENV: &str = "OSM_NAMESPACE";

/// Phase of a mesh operation as reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Installing,
    Installed,
    Removing,
    Removed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Installing => write!(f, "installing"),
            Status::Installed => write!(f, "installed"),
            Status::Removing => write!(f, "removing"),
            Status::Removed => write!(f, "removed"),
        }
    }
}

/// Install and delete capabilities of a mesh backend
pub trait MeshOperations {
    fn install(&self, version: &str) -> Result<Status>;

    fn delete(&self, version: &str) -> Result<Status>;

    /// Delete when `delete` is set, install otherwise
    fn execute(&self, delete: bool, version: &str) -> Result<Status> {
        if delete {
            self.delete(version)
        } else {
            self.install(version)
        }
    }
}

/// Runs one script per operation with the version passed in the environment
#[derive(Debug, Clone)]
pub struct ScriptExecutor {
    pub install_script: PathBuf,
    pub delete_script: PathBuf,
    pub version_env: String,
    /// Exported as [`NAMESPACE_ENV`] when set
    pub namespace: Option<String>,
}

impl Default for ScriptExecutor {
    fn default() -> Self {
        Self {
            install_script: PathBuf::from(DEFAULT_INSTALL_SCRIPT),
            delete_script: PathBuf::from(DEFAULT_DELETE_SCRIPT),
            version_env: DEFAULT_VERSION_ENV.to_string(),
            namespace: None,
        }
    }
}

impl ScriptExecutor {
    pub fn new(
        install_script: impl Into<PathBuf>,
        delete_script: impl Into<PathBuf>,
        version_env: impl Into<String>,
    ) -> Self {
        Self {
            install_script: install_script.into(),
            delete_script: delete_script.into(),
            version_env: version_env.into(),
            namespace: None,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    fn run(&self, script: &Path, version: &str) -> std::result::Result<(), ProcessError> {
        let display = script.display().to_string();

        let executable = which::which(script).map_err(|source| ProcessError::NotFound {
            path: display.clone(),
            source,
        })?;

        crate::log_info!(
            "Running {} with {}={}",
            executable.display(),
            self.version_env,
            version
        );

        let mut command = Command::new(&executable);
        command.env(&self.version_env, version);
        if let Some(namespace) = &self.namespace {
            command.env(NAMESPACE_ENV, namespace);
        }

        let mut child = command
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                path: display.clone(),
                source,
            })?;

        let status = child.wait().map_err(|source| ProcessError::Wait {
            path: display.clone(),
            source,
        })?;

        if !status.success() {
            return Err(ProcessError::Failed {
                path: display,
                status,
            });
        }

        Ok(())
    }
}

impl MeshOperations for ScriptExecutor {
    fn install(&self, version: &str) -> Result<Status> {
        self.run(&self.install_script, version)
            .map_err(|source| AdapterError::Process {
                status: Status::Installing,
                source,
            })?;
        Ok(Status::Installed)
    }

    fn delete(&self, version: &str) -> Result<Status> {
        self.run(&self.delete_script, version)
            .map_err(|source| AdapterError::Process {
                status: Status::Removing,
                source,
            })?;
        Ok(Status::Removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Installing.to_string(), "installing");
        assert_eq!(Status::Installed.to_string(), "installed");
        assert_eq!(Status::Removing.to_string(), "removing");
        assert_eq!(Status::Removed.to_string(), "removed");
    }

    #[test]
    fn test_missing_script_reports_last_phase() {
        let executor = ScriptExecutor::new(
            "/nonexistent/osm/create.sh",
            "/nonexistent/osm/delete.sh",
            DEFAULT_VERSION_ENV,
        );

        let err = executor.execute(false, "v1.2.3").unwrap_err();
        assert_eq!(err.status(), Some(Status::Installing));
        assert!(matches!(
            err,
            AdapterError::Process {
                source: ProcessError::NotFound { .. },
                ..
            }
        ));

        let err = executor.execute(true, "v1.2.3").unwrap_err();
        assert_eq!(err.status(), Some(Status::Removing));
    }

    #[cfg(unix)]
    mod scripts {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
            let path = dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_install_passes_version_env() {
            let dir = tempfile::tempdir().unwrap();
            let out = dir.path().join("version.txt");
            let install = write_script(
                dir.path(),
                "create.sh",
                &format!("echo \"$OSM_VERSION\" > {}", out.display()),
            );
            let delete = write_script(dir.path(), "delete.sh", "exit 0");

            let executor = ScriptExecutor::new(install, delete, DEFAULT_VERSION_ENV);
            let status = executor.execute(false, "v1.2.3").unwrap();

            assert_eq!(status, Status::Installed);
            assert_eq!(fs::read_to_string(&out).unwrap().trim(), "v1.2.3");
        }

        #[test]
        fn test_namespace_is_exported() {
            let dir = tempfile::tempdir().unwrap();
            let out = dir.path().join("namespace.txt");
            let install = write_script(
                dir.path(),
                "create.sh",
                &format!("echo \"${{OSM_NAMESPACE:-unset}}\" > {}", out.display()),
            );

            let executor = ScriptExecutor::new(&install, &install, DEFAULT_VERSION_ENV);
            executor.install("v1.2.3").unwrap();
            assert_eq!(fs::read_to_string(&out).unwrap().trim(), "unset");

            let executor = executor.with_namespace("mesh-a");
            executor.install("v1.2.3").unwrap();
            assert_eq!(fs::read_to_string(&out).unwrap().trim(), "mesh-a");
        }

        #[test]
        fn test_delete_success() {
            let dir = tempfile::tempdir().unwrap();
            let install = write_script(dir.path(), "create.sh", "exit 1");
            let delete = write_script(dir.path(), "delete.sh", "exit 0");

            let executor = ScriptExecutor::new(install, delete, DEFAULT_VERSION_ENV);
            assert_eq!(executor.execute(true, "v1.0.0").unwrap(), Status::Removed);
        }

        #[test]
        fn test_failing_script_keeps_in_progress_status() {
            let dir = tempfile::tempdir().unwrap();
            let install = write_script(dir.path(), "create.sh", "exit 3");
            let delete = write_script(dir.path(), "delete.sh", "exit 4");

            let executor = ScriptExecutor::new(install, delete, DEFAULT_VERSION_ENV);

            let err = executor.install("v1.0.0").unwrap_err();
            assert_eq!(err.status(), Some(Status::Installing));
            assert!(matches!(
                err,
                AdapterError::Process {
                    source: ProcessError::Failed { .. },
                    ..
                }
            ));

            let err = executor.delete("v1.0.0").unwrap_err();
            assert_eq!(err.status(), Some(Status::Removing));
        }

        #[test]
        fn test_non_executable_script_is_not_found() {
            let dir = tempfile::tempdir().unwrap();
            let install = dir.path().join("create.sh");
            fs::write(&install, "#!/bin/sh\nexit 0\n").unwrap();
            fs::set_permissions(&install, fs::Permissions::from_mode(0o644)).unwrap();

            let executor = ScriptExecutor::new(&install, &install, DEFAULT_VERSION_ENV);
            let err = executor.install("v1.0.0").unwrap_err();
            assert!(matches!(
                err,
                AdapterError::Process {
                    source: ProcessError::NotFound { .. },
                    ..
                }
            ));
        }
    }
}
