//! Mesh lifecycle commands: install, delete, namespace, manifest apply

use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::config::Settings;
use crate::install::{self, MeshOperations, Status};
use crate::k8s;

/// Options for the install command
pub struct InstallOptions {
    /// Version to install; the newest stable release when unset
    pub version: Option<String>,
    /// Ensure the mesh namespace exists before running the script
    pub create_namespace: bool,
    /// Overrides the configured mesh namespace, for the script and for
    /// `create_namespace`
    pub namespace: Option<String>,
}

/// Handle install command
pub fn install(settings: &Settings, options: InstallOptions) -> Result<()> {
    let version = match options.version {
        Some(version) => version,
        None => resolve_latest_version(settings)?,
    };

    let namespace = options
        .namespace
        .as_deref()
        .unwrap_or(&settings.mesh.namespace);

    if options.create_namespace {
        k8s::ensure_namespace_blocking(namespace)
            .with_context(|| format!("Failed to ensure namespace {}", namespace))?;
    }

    crate::log_info!("Installing OSM {} into {}...", version, namespace);
    let status = run(settings, namespace, false, &version)?;
    crate::log_info!("OSM {} {}", version, status);

    Ok(())
}

/// Handle delete command
pub fn delete(settings: &Settings, version: &str, assume_yes: bool) -> Result<()> {
    let prompt = format!("Remove OSM {} from the cluster?", version);
    if !crate::utils::confirm_destructive(
        &prompt,
        assume_yes,
        settings.behavior.confirm_destructive,
    )? {
        crate::log_info!("Deletion cancelled");
        return Ok(());
    }

    crate::log_info!("Removing OSM {}...", version);
    let status = run(settings, &settings.mesh.namespace, true, version)?;
    crate::log_info!("OSM {} {}", version, status);

    Ok(())
}

/// Handle namespace command
pub fn ensure_namespace(name: &str) -> Result<()> {
    k8s::ensure_namespace_blocking(name)
        .with_context(|| format!("Failed to ensure namespace {}", name))?;
    println!("namespace/{} ready", name);
    Ok(())
}

/// Handle apply command
pub fn apply(
    settings: &Settings,
    file: &Path,
    namespace: Option<&str>,
    delete: bool,
) -> Result<()> {
    let namespace = namespace.unwrap_or(&settings.mesh.namespace);
    let contents = std::fs::read(file)
        .with_context(|| format!("Failed to read manifest: {}", file.display()))?;

    install::apply_manifest(namespace, &contents, delete, None)?;

    Ok(())
}

fn run(settings: &Settings, namespace: &str, delete: bool, version: &str) -> Result<Status> {
    let executor = settings.scripts.executor().with_namespace(namespace);

    executor.execute(delete, version).map_err(|err| {
        let phase = err
            .status()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        anyhow!(err).context(format!("OSM {} stopped while {}", version, phase))
    })
}

fn resolve_latest_version(settings: &Settings) -> Result<String> {
    let lister = settings.github.release_lister()?;
    let latest = lister
        .latest_release_names(1)
        .context("Failed to resolve the latest OSM version")?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No stable OSM release found; pass --version explicitly"))?;

    crate::log_info!("Using latest OSM version {}", latest);

    Ok(latest.to_string())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_install_namespace_reaches_script() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("env.txt");
        let script = dir.path().join("create.sh");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\necho \"$OSM_VERSION $OSM_NAMESPACE\" > {}\n",
                out.display()
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let mut settings = Settings::default();
        settings.scripts.install = script;

        install(
            &settings,
            InstallOptions {
                version: Some("v1.2.3".to_string()),
                create_namespace: false,
                namespace: Some("mesh-b".to_string()),
            },
        )
        .unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap().trim(), "v1.2.3 mesh-b");

        install(
            &settings,
            InstallOptions {
                version: Some("v1.2.3".to_string()),
                create_namespace: false,
                namespace: None,
            },
        )
        .unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap().trim(), "v1.2.3 osm-system");
    }
}
