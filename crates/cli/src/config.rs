// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.
//!
//! Configuration is read from `config.toml` (by default under the user's
//! config directory, `tvmirror/config.toml`) and includes:
//! - `[server]`: where the media server lives
//! - `[push]`: push-channel reconnect policy
//! - `[hydration]`: page sizes for HTTP hydration
//!
//! A missing file means all defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "tvmirror";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub push: PushConfig,
    #[serde(default)]
    pub hydration: HydrationConfig,
}

/// Location of the media server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host and optional port, e.g. `media.local:8081`.
    #[serde(default = "default_host")]
    pub host: String,
    /// Path prefix the web UI is served under, e.g. `/medusa`.
    #[serde(default)]
    pub base_path: String,
    /// Whether the UI is served over TLS (selects `wss://`).
    #[serde(default)]
    pub tls: bool,
}

fn default_host() -> String {
    "localhost:8081".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            base_path: String::new(),
            tls: false,
        }
    }
}

impl ServerConfig {
    /// The base path with one leading slash and no trailing slash, or empty.
    pub fn normalized_base_path(&self) -> String {
        let trimmed = self.base_path.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }

    /// Push-channel endpoint: `{ws|wss}://{host}{base_path}/ws/ui`.
    pub fn push_url(&self) -> String {
        let scheme = if self.tls { "wss" } else { "ws" };
        format!(
            "{}://{}{}/ws/ui",
            scheme,
            self.host.trim().trim_end_matches('/'),
            self.normalized_base_path()
        )
    }
}

/// Push-channel reconnect policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushConfig {
    /// Reconnect attempts before giving up (default: 2).
    #[serde(default = "default_reconnect_attempts")]
    pub reconnect_attempts: u32,
    /// Fixed delay before each reconnect attempt in milliseconds (default: 1000).
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

fn default_reconnect_attempts() -> u32 {
    2
}

fn default_reconnect_delay_ms() -> u64 {
    1000
}

impl Default for PushConfig {
    fn default() -> Self {
        PushConfig {
            reconnect_attempts: default_reconnect_attempts(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
        }
    }
}

impl PushConfig {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

/// Page sizes for HTTP hydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationConfig {
    /// `limit` for `GET /series` (default: 1000).
    #[serde(default = "default_limit")]
    pub series_limit: u32,
    /// Page size for provider cache results (default: 1000).
    #[serde(default = "default_limit")]
    pub results_limit: u32,
}

fn default_limit() -> u32 {
    1000
}

impl Default for HydrationConfig {
    fn default() -> Self {
        HydrationConfig {
            series_limit: default_limit(),
            results_limit: default_limit(),
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: origin.display().to_string(),
            source,
        })
    }

    /// Loads configuration from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content, path)
    }

    /// Loads from `path` if given, else from the default location.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) => Self::load(&path),
                None => Ok(Config::default()),
            },
        }
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
