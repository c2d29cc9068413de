//! Configuration loading using Figment.
//!
//! Configuration is loaded from:
//! 1. built-in defaults
//! 2. a TOML file (`config/srdir.toml` unless given explicitly; optional)
//! 3. environment variables prefixed with `SRDIR_`, nested keys separated
//!    by `__` (e.g. `SRDIR_ARCHIVE__CHUNK_BYTES=65536`)
//!
//! # Example
//! ```no_run
//! use srdir::config::SrdirConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SrdirConfig::load()?;
//! config.validate()?;
//! println!("Writing to {}", config.archive.output_dir.display());
//! # Ok(())
//! # }
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use srdir_core::limits::CHUNK_SIZE;
use srdir_driver_mock::MockDeviceConfig;
use srdir_storage::archive::DEFAULT_SIGROK_VERSION;
use std::path::{Path, PathBuf};

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "config/srdir.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "SRDIR_";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SrdirConfig {
    /// Application settings
    pub application: ApplicationConfig,
    /// Archive output settings
    pub archive: ArchiveConfig,
    /// Simulated device settings
    pub mock: MockDeviceConfig,
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Application name
    pub name: String,
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: "srdir".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Archive output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Archive directory; must not exist before recording
    pub output_dir: PathBuf,
    /// Byte budget of each sample buffer, i.e. the largest chunk file
    pub chunk_bytes: usize,
    /// Value written to `[global] sigrok version`
    pub sigrok_version: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("capture"),
            chunk_bytes: CHUNK_SIZE,
            sigrok_version: DEFAULT_SIGROK_VERSION.to_string(),
        }
    }
}

impl SrdirConfig {
    /// Load configuration from `config/srdir.toml` and environment variables
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific file path
    ///
    /// A missing file is not an error; defaults and environment apply.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(SrdirConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), String> {
        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.application.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.application.log_level,
                valid_levels.join(", ")
            ));
        }

        if self.archive.chunk_bytes == 0 {
            return Err("Invalid chunk_bytes 0. Must be at least 1".to_string());
        }

        self.mock
            .validate()
            .map_err(|e| format!("Invalid mock device: {}", e))
    }
}
