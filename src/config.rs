//! Configuration loading.
//!
//! Composes defaults, an optional TOML file, and `COUNTFS__`-prefixed
//! environment variables into a typed configuration. Only mount-time
//! concerns are configurable; the namespace layout itself is fixed.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::host::MountOptions;
use crate::logging::LoggingConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountfsConfig {
    #[serde(default)]
    pub mount: MountOptions,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CountfsConfig {
    /// Load from environment variables over built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(environment_source())
            .build()?;
        config.try_deserialize()
    }

    /// Load from a specific file with environment overlay.
    /// Precedence: defaults (lowest) -> file -> environment (highest).
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .add_source(environment_source())
            .build()?;
        config.try_deserialize()
    }
}

fn environment_source() -> Environment {
    Environment::with_prefix("COUNTFS")
        .separator("__")
        .try_parsing(true)
}
