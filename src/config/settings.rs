//! Configuration file support for osm-adapter

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::github::client::DEFAULT_TIMEOUT_SECS;
use crate::github::releases::RELEASE_PAGE_SIZE;
use crate::github::{ApiClient, ReleaseLister, TreePathResolver, VersionOrdering};
use crate::install::executor::{
    DEFAULT_DELETE_SCRIPT, DEFAULT_INSTALL_SCRIPT, DEFAULT_VERSION_ENV, ScriptExecutor,
};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub github: GithubSettings,

    #[serde(default)]
    pub scripts: ScriptSettings,

    #[serde(default)]
    pub mesh: MeshSettings,

    #[serde(default)]
    pub behavior: Behavior,
}

/// Where releases and manifests are read from
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GithubSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_owner")]
    pub owner: String,

    #[serde(default = "default_repo")]
    pub repo: String,

    /// Releases fetched when picking the latest version names
    #[serde(default = "default_release_page_size")]
    pub release_page_size: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub version_ordering: VersionOrdering,
}

/// External install/delete scripts
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScriptSettings {
    #[serde(default = "default_install_script")]
    pub install: PathBuf,

    #[serde(default = "default_delete_script")]
    pub delete: PathBuf,

    #[serde(default = "default_version_env")]
    pub version_env: String,
}

/// Mesh placement in the cluster
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MeshSettings {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Repository directory holding the mesh manifests
    #[serde(default = "default_manifests_path")]
    pub manifests_path: String,
}

/// Behavior settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Behavior {
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,
}

// Default value functions
fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_owner() -> String {
    "openservicemesh".to_string()
}

fn default_repo() -> String {
    "osm".to_string()
}

fn default_release_page_size() -> u32 {
    RELEASE_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_install_script() -> PathBuf {
    PathBuf::from(DEFAULT_INSTALL_SCRIPT)
}

fn default_delete_script() -> PathBuf {
    PathBuf::from(DEFAULT_DELETE_SCRIPT)
}

fn default_version_env() -> String {
    DEFAULT_VERSION_ENV.to_string()
}

fn default_namespace() -> String {
    "osm-system".to_string()
}

fn default_manifests_path() -> String {
    "charts/osm/crds".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            owner: default_owner(),
            repo: default_repo(),
            release_page_size: default_release_page_size(),
            timeout_secs: default_timeout_secs(),
            version_ordering: VersionOrdering::default(),
        }
    }
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            install: default_install_script(),
            delete: default_delete_script(),
            version_env: default_version_env(),
        }
    }
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            manifests_path: default_manifests_path(),
        }
    }
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            confirm_destructive: default_true(),
        }
    }
}

impl GithubSettings {
    /// API root of the configured repository, used for tree walks
    pub fn repo_url(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    pub fn api_client(&self) -> Result<ApiClient> {
        ApiClient::new(Duration::from_secs(self.timeout_secs))
            .context("Failed to create HTTP client")
    }

    pub fn release_lister(&self) -> Result<ReleaseLister> {
        Ok(
            ReleaseLister::new(self.api_client()?, &self.api_url, &self.owner, &self.repo)
                .with_page_size(self.release_page_size)
                .with_ordering(self.version_ordering),
        )
    }

    pub fn tree_resolver(&self) -> Result<TreePathResolver> {
        Ok(TreePathResolver::new(self.api_client()?))
    }
}

impl ScriptSettings {
    pub fn executor(&self) -> ScriptExecutor {
        ScriptExecutor::new(&self.install, &self.delete, &self.version_env)
    }
}

impl Settings {
    /// Load settings from an explicit path, the standard locations, or defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        match Self::find_config_file() {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!("Loaded settings from {}", path.display());

        Ok(settings)
    }

    /// Find config file in standard locations
    /// Priority:
    /// 1. .osm-adapter.toml in current directory
    /// 2. ~/.config/osm-adapter/config.toml (XDG config directory)
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(".osm-adapter.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("osm-adapter").join("config.toml");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }

        None
    }

    /// Save settings to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example config file content
    pub fn example_config() -> Result<String> {
        let header = "# osm-adapter configuration file\n\
                      # Place this file at ~/.config/osm-adapter/config.toml or .osm-adapter.toml in your project\n\n";

        let body = toml::to_string_pretty(&Settings::default())
            .context("Failed to serialize default settings")?;

        Ok(format!("{}{}", header, body))
    }
}
