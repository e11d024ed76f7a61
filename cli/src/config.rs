//! Configuration file handling for the CLI.
//!
//! Stores the API location and the signed-in session in
//! `$XDG_CONFIG_HOME/lending-admin/config.toml` following the XDG Base
//! Directory Specification.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use lending_business::config::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};

/// CLI configuration stored on disk
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the lending API
    pub url: Option<String>,
}

/// Saved session
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Email of the signed-in operator
    pub email: Option<String>,
    /// `Cookie` header value of the session
    pub session: Option<String>,
}

impl Config {
    /// Returns `$XDG_CONFIG_HOME/lending-admin/config.toml` on Linux,
    /// appropriate paths on other platforms.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("org", "lending", "lending-admin")
            .context("Failed to determine config directory")?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from disk; a missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to disk, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Effective API URL: the flag (or its environment variable) wins over
    /// the file, which wins over the built-in default.
    pub fn api_url(&self, flag: Option<&str>) -> String {
        flag.map(str::trim)
            .filter(|url| !url.is_empty())
            .or_else(|| self.api.url.as_deref())
            .unwrap_or(DEFAULT_API_URL)
            .to_owned()
    }

    pub fn session(&self) -> Option<&str> {
        self.auth.session.as_deref().filter(|s| !s.is_empty())
    }

    pub fn set_session(&mut self, email: Option<&str>, session: Option<String>) {
        self.auth.email = email.map(str::to_owned);
        self.auth.session = session;
    }

    pub fn clear_session(&mut self) {
        self.auth = AuthConfig::default();
    }
}
