//! Server configuration, loaded from `~/.config/breathsmith/mcp-server.toml`.
//!
//! The file is optional; a missing file means defaults. Tool behavior is
//! configured through the environment (see `breathsmith_core::Config`), this
//! file only covers how the server presents itself to hosts.

use std::path::Path;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// How the server identifies itself to MCP hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerConfig {
    /// Server name shown to MCP clients.
    #[serde(default = "default_name")]
    pub name: String,

    /// Server version.
    #[serde(default = "default_version")]
    pub version: String,

    /// Override for the instructions text sent to hosts.
    #[serde(default)]
    pub instructions: Option<String>,
}

fn default_name() -> String {
    "breathsmith".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for McpServerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            instructions: None,
        }
    }
}

impl McpServerConfig {
    /// Load configuration from the default path, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("parsing config from {}", path.display()))
    }

    /// Default config file location.
    pub fn config_path() -> Result<std::path::PathBuf> {
        let dirs = ProjectDirs::from("", "", "breathsmith")
            .context("could not determine config directory")?;
        Ok(dirs.config_dir().join("mcp-server.toml"))
    }
}
