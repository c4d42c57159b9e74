//! Logging System
//!
//! Structured logging built on the `tracing` crate. The host decides when
//! (and whether) to install a subscriber; the library itself only emits
//! events.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Registry, EnvFilter};

use crate::error::FsError;

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive: a level (`info`) or an `EnvFilter` expression
    /// (`countfs=debug`)
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format: text, json (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file (default: stderr)
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output is file; None means use runtime default
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Resolve the log file path with precedence: `COUNTFS_LOG_FILE` env,
/// config value, platform state directory default.
pub fn resolve_log_file_path(config_file: Option<PathBuf>) -> Result<PathBuf, FsError> {
    if let Ok(env_path) = std::env::var("COUNTFS_LOG_FILE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(p) = config_file {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    let project_dirs = directories::ProjectDirs::from("", "countfs", "countfs").ok_or_else(|| {
        FsError::ConfigError("could not determine platform state directory for log file".to_string())
    })?;
    let state_dir = project_dirs
        .state_dir()
        .ok_or_else(|| {
            FsError::ConfigError("platform state directory not available for log file".to_string())
        })?
        .to_path_buf();
    Ok(state_dir.join("countfs.log"))
}

/// Install a global subscriber per `config`.
///
/// Fails if a subscriber is already installed or the configuration is
/// malformed; a disabled config is a no-op.
pub fn init_logging(config: &LoggingConfig) -> Result<(), FsError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| FsError::ConfigError(format!("invalid log filter {:?}: {e}", config.level)))?;

    let writer = match config.output.as_str() {
        "stderr" => BoxMakeWriter::new(std::io::stderr),
        "stdout" => BoxMakeWriter::new(std::io::stdout),
        "file" => {
            let path = resolve_log_file_path(config.file.clone())?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    FsError::ConfigError(format!("failed to create log directory: {e}"))
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    FsError::ConfigError(format!("failed to open log file {path:?}: {e}"))
                })?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        other => {
            return Err(FsError::ConfigError(format!(
                "unknown log output {other:?}"
            )))
        }
    };

    let registry = Registry::default().with(filter);
    let use_ansi = config.color && config.output != "file";
    let result = match config.format.as_str() {
        "json" => registry
            .with(
                fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .try_init(),
        "text" => registry
            .with(
                fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer)
                    .with_ansi(use_ansi),
            )
            .try_init(),
        other => {
            return Err(FsError::ConfigError(format!(
                "unknown log format {other:?}"
            )))
        }
    };
    result.map_err(|e| FsError::ConfigError(format!("failed to install subscriber: {e}")))
}
