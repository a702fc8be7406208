//! Configuration for ncpr-index
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a catalog / query service instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory holding one shard file per prefix
    /// Layout:
    ///   {data_dir}/
    ///     ├── 9999.dat
    ///     ├── 1000.dat
    ///     └── ...
    pub data_dir: PathBuf,

    /// Extension (without the dot) that marks a file as a shard
    pub shard_extension: String,

    /// What to do with shards that fail structural validation
    pub validation: ValidationMode,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,
}

/// Handling of structurally invalid shards at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Refuse to start with a corrupt shard
    Strict,

    /// Log a warning and serve the shard as-is
    Lenient,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("/opt/data/ncpr"),
            shard_extension: "dat".to_string(),
            validation: ValidationMode::Strict,
            listen_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Path of the shard file for `prefix`, using the unpadded decimal name
    pub fn shard_path(&self, prefix: u16) -> PathBuf {
        self.data_dir.join(format!("{}.{}", prefix, self.shard_extension))
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the shard directory
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the shard file extension (leading dot is stripped)
    pub fn shard_extension(mut self, ext: impl Into<String>) -> Self {
        let ext = ext.into();
        self.config.shard_extension = ext.trim_start_matches('.').to_string();
        self
    }

    /// Set the validation mode
    pub fn validation(mut self, mode: ValidationMode) -> Self {
        self.config.validation = mode;
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
