//! Configuration loading for learnvault.

use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "LEARNVAULT_CONFIG";

/// Top-level configuration loaded from config.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vault: VaultConfig,
    #[serde(default)]
    pub daily: DailyConfig,
}

/// Where the notes live.
#[derive(Debug, Deserialize)]
pub struct VaultConfig {
    #[serde(default = "default_vault_root")]
    pub root: String,
    /// Folder below `root` that holds the notes to draw from.
    #[serde(default = "default_subfolder")]
    pub subfolder: String,
}

/// Settings for the `daily` command.
#[derive(Debug, Deserialize)]
pub struct DailyConfig {
    #[serde(default = "default_daily_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub strip_front_matter: bool,
}

fn default_vault_root() -> String {
    "~/vault".to_string()
}

fn default_subfolder() -> String {
    "Sources".to_string()
}

fn default_daily_tags() -> Vec<String> {
    vec!["career".to_string(), "politics".to_string()]
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            root: default_vault_root(),
            subfolder: default_subfolder(),
        }
    }
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            tags: default_daily_tags(),
            strip_front_matter: false,
        }
    }
}

impl VaultConfig {
    /// The directory that gets scanned: `root` joined with `subfolder`.
    #[must_use]
    pub fn scan_root(&self) -> PathBuf {
        let root = expand_tilde(&self.root);
        if self.subfolder.is_empty() {
            root
        } else {
            root.join(&self.subfolder)
        }
    }
}

impl Config {
    /// Load config from `$LEARNVAULT_CONFIG` or ~/.config/learnvault/config.toml,
    /// or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if let Some(path) = config_path
            && path.exists()
        {
            return Self::load_from(&path);
        }

        Ok(Config::default())
    }

    /// Load config from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error naming the file if it cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid config TOML.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }

        ProjectDirs::from("", "", "learnvault").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Expand ~ to the user's home directory.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(base_dirs) = BaseDirs::new()
    {
        return base_dirs.home_dir().join(rest);
    }
    PathBuf::from(path)
}
