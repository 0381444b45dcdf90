//! Configuration for browser-shell
//!
//! This crate provides:
//! - Directory helpers for config and cache files
//! - Configuration file discovery (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::{find_config_file, load_config_file, CONFIG_FILE};
pub use paths::{app_config_path, cache_dir, config_dir};
