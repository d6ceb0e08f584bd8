//! Application configuration
//!
//! Configuration loaded from `.storefront.toml`, then overridden by
//! `STOREFRONT_*` environment variables (including those merged in from a
//! `.env` file by `load_env_file`).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_PRODUCTION: &str = "STOREFRONT_PRODUCTION";
pub const ENV_STORAGE_DIR: &str = "STOREFRONT_STORAGE_DIR";

/// Application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Root of the REST API (e.g. "http://localhost:3000/api")
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Production mode silences developer diagnostics
    #[serde(default)]
    pub production: bool,

    /// State slices mirrored to local storage
    #[serde(default = "default_persisted_slices")]
    pub persisted_slices: Vec<String>,

    /// Where mirrored slices are written; platform data dir when unset
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_persisted_slices() -> Vec<String> {
    vec!["cart".to_string()]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            production: false,
            persisted_slices: default_persisted_slices(),
            storage_dir: None,
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults;
    /// environment variables win over both
    ///
    /// `.env` values are only seen when `load_env_file` ran first.
    pub fn load() -> Self {
        let file = crate::load_config_file();
        if let Some(file) = &file {
            log::debug!("Reading config from {}", file.path.display());
        }
        let mut config = Self::from_file_content(file.map(|file| file.content));
        config.apply_overrides(|name| std::env::var(name).ok());
        config
    }

    fn from_file_content(content: Option<String>) -> Self {
        if let Some(content) = content {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Apply `STOREFRONT_*` overrides from a variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(value) = lookup(ENV_PRODUCTION) {
            match parse_flag(&value) {
                Some(production) => self.production = production,
                None => log::warn!("Ignoring {}={:?}: not a boolean", ENV_PRODUCTION, value),
            }
        }
        if let Some(dir) = lookup(ENV_STORAGE_DIR).filter(|v| !v.trim().is_empty()) {
            self.storage_dir = Some(PathBuf::from(dir));
        }
    }

    /// Storage directory to use, creating the default one if needed
    pub fn resolve_storage_dir(&self) -> Result<PathBuf> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => crate::paths::storage_dir(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
