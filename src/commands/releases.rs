//! Release listing commands

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Settings;
use crate::github::Release;

/// Print the raw release listing, newest first
pub fn list_releases(settings: &Settings, count: u32) -> Result<()> {
    let lister = settings.github.release_lister()?;

    crate::log_info!("Fetching releases from {}", lister.releases_url());

    let releases = lister
        .latest_releases(count)
        .context("Failed to list releases")?;

    if releases.is_empty() {
        crate::log_warn!("No releases found");
        return Ok(());
    }

    for release in &releases {
        println!("{}", format_release(release));
    }

    Ok(())
}

/// Print the newest qualifying version names
pub fn list_versions(settings: &Settings, limit: usize) -> Result<()> {
    let lister = settings.github.release_lister()?;

    let versions = lister
        .latest_release_names(limit)
        .context("Failed to list versions")?;

    if versions.is_empty() {
        crate::log_warn!("No stable versions found");
    }

    for version in versions {
        println!("{}", version);
    }

    Ok(())
}

fn format_release(release: &Release) -> String {
    let mut line = format!(
        "{:<12} {:<20} {} asset(s)",
        release.tag_name.bold(),
        release.name,
        release.assets.len()
    );
    if release.draft {
        line.push_str(&format!(" {}", "(draft)".yellow()));
    }
    line
}
