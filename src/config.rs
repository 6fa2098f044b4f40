//! Configuration for NestKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a NestKV store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all entry files and key directories
    /// Internal structure:
    ///   {root_dir}/
    ///     ├── <segment>/        (one subdirectory per directory segment)
    ///     └── <segment>.json    (one file per entry)
    pub root_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Key Configuration
    // -------------------------------------------------------------------------
    /// Divider separating the segments of a key string
    pub divider: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./nestkv_data"),
            divider: ".".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the root directory (all keys resolve beneath it)
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Set the key-segment divider
    pub fn divider(mut self, divider: impl Into<String>) -> Self {
        self.config.divider = divider.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
