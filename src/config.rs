//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the portal base URL and the last used username.
//!
//! Configuration is stored at `~/.config/gatehouse/config.json`. The
//! `GATEHOUSE_BASE_URL` environment variable overrides the stored base URL.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "gatehouse";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the configured base URL
const BASE_URL_ENV: &str = "GATEHOUSE_BASE_URL";

/// Fallback when neither the environment nor the config file supplies a URL
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub base_url: Option<String>,
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Effective base URL: environment override, then config file, then the
    /// localhost default.
    pub fn base_url(&self) -> String {
        resolve_base_url(std::env::var(BASE_URL_ENV).ok(), self.base_url.as_deref())
    }
}

fn resolve_base_url(env: Option<String>, file: Option<&str>) -> String {
    let chosen = match env {
        Some(url) if !url.trim().is_empty() => url,
        _ => match file {
            Some(url) if !url.trim().is_empty() => url.to_string(),
            _ => DEFAULT_BASE_URL.to_string(),
        },
    };
    // A trailing slash would double up when joined with request paths
    chosen.trim_end_matches('/').to_string()
}
