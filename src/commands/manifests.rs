//! Manifest listing command

use anyhow::{Context, Result};

use crate::config::Settings;

/// Print the entries under `path` (default: the configured manifests path)
/// of the repository at `repo_url` (default: the configured repository)
pub fn list_files(settings: &Settings, path: Option<&str>, repo_url: Option<&str>) -> Result<()> {
    let path = path.unwrap_or(&settings.mesh.manifests_path);
    let repo_url = match repo_url {
        Some(url) => url.to_string(),
        None => settings.github.repo_url(),
    };

    crate::log_info!("Listing '{}' in {}", path, repo_url);

    let names = settings
        .github
        .tree_resolver()?
        .file_names(&repo_url, path)
        .with_context(|| format!("Failed to list '{}'", path))?;

    if names.is_empty() {
        crate::log_warn!("'{}' is empty", path);
    }

    for name in names {
        println!("{}", name);
    }

    Ok(())
}
