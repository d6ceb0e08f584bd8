//! Configuration and local storage for the storefront
//!
//! This crate provides:
//! - Directory utilities for config, cache and storage files
//! - Configuration file loading (TOML) with environment overrides
//! - Application configuration (AppConfig)
//! - Key/value local storage used by the state persistence mirror

pub mod app_config;
pub mod config_file;
pub mod paths;
pub mod storage;

pub use app_config::AppConfig;
pub use config_file::{load_config_file, load_env_file, ConfigFile};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
