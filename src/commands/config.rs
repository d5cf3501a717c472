//! Config inspection commands

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::Settings;

/// Write an example config file to `path`
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    std::fs::write(path, Settings::example_config()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    crate::log_info!("Example configuration created: {}", path.display());
    Ok(())
}

/// Print the effective settings
pub fn show(settings: &Settings) -> Result<()> {
    let rendered = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
    print!("{}", rendered);
    Ok(())
}
