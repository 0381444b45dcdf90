//! Application configuration
//!
//! Configuration loaded from `.browser-shell.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration loaded from .browser-shell.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Page opened in new tabs when no URL is given
    #[serde(default = "default_homepage")]
    pub homepage: String,

    /// Enable tracking protection for new tabs
    #[serde(default = "default_true")]
    pub tracking_protection: bool,

    /// Log telemetry events
    #[serde(default)]
    pub telemetry: bool,

    /// Log every dispatched action
    #[serde(default = "default_true")]
    pub log_actions: bool,

    /// Open new tabs as private tabs
    #[serde(default)]
    pub private_by_default: bool,

    /// Select the parent of a closed tab instead of its neighbour
    #[serde(default = "default_true")]
    pub select_parent_on_close: bool,
}

fn default_homepage() -> String {
    "about:blank".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            homepage: default_homepage(),
            tracking_protection: default_true(),
            telemetry: false,
            log_actions: default_true(),
            private_by_default: false,
            select_parent_on_close: default_true(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::from_toml(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {:#}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid browser-shell config")
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Write the config as TOML
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
