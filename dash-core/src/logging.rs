//! src/logging.rs
//! ============================================================================
//! # Logging: file-backed `tracing` setup
//!
//! The terminal belongs to the dashboard, so all log output goes to a
//! rolling file through a non-blocking writer. Keep the returned
//! [`WorkerGuard`] alive for the life of the process or buffered lines are
//! lost on exit. `RUST_LOG` directives are layered on top of the configured
//! level.

use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer, filter::Directive, fmt::time::ChronoLocal, layer::SubscriberExt,
    util::SubscriberInitExt,
};


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub log_file_prefix: CompactString,
    pub log_level: CompactString,
    pub rotation: LogRotation,
    /// One JSON object per line instead of human-readable text
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Never,
    Hourly,
    Daily,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Never => Rotation::NEVER,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            log_file_prefix: CompactString::const_new("dash"),
            log_level: CompactString::const_new("info"),
            rotation: LogRotation::Daily,
            json: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Invalid log directory: {0}")]
    InvalidLogDirectory(String),

    #[error("Failed to create log directory: {0}")]
    DirectoryCreationFailed(#[from] std::io::Error),

    #[error("Invalid log level '{level}': {reason}")]
    InvalidLevel { level: String, reason: String },
}

pub struct Logger;

impl Logger {
    /// Install the global subscriber. Fails if one is already installed.
    pub fn init(config: &LoggerConfig) -> Result<WorkerGuard, LoggingError> {
        validate_log_directory(&config.log_dir)?;
        std::fs::create_dir_all(&config.log_dir)?;

        let filter = build_filter(&config.log_level)?;

        let appender = RollingFileAppender::new(
            config.rotation.into(),
            &config.log_dir,
            config.log_file_prefix.as_str(),
        );
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_timer(ChronoLocal::rfc_3339())
            .with_target(true);

        let layer = if config.json {
            fmt_layer.json().with_current_span(true).boxed()
        } else {
            fmt_layer.boxed()
        };

        tracing_subscriber::registry()
            .with(layer.with_filter(filter))
            .try_init()
            .map_err(|_| LoggingError::AlreadyInitialized)?;

        Ok(guard)
    }
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    let directive = Directive::from_str(level).map_err(|e| LoggingError::InvalidLevel {
        level: level.to_owned(),
        reason: e.to_string(),
    })?;

    // RUST_LOG directives come first; the configured level is the fallback.
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

fn validate_log_directory(path: &Path) -> Result<(), LoggingError> {
    if path.components().count() == 0 {
        return Err(LoggingError::InvalidLogDirectory("Empty path".to_string()));
    }

    if path.components().any(|c| c == Component::ParentDir) {
        return Err(LoggingError::InvalidLogDirectory(
            "Path contains parent directory references".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_parent_references_and_empty_paths() {
        assert!(matches!(
            validate_log_directory(Path::new("../logs")),
            Err(LoggingError::InvalidLogDirectory(_))
        ));
        assert!(matches!(
            validate_log_directory(Path::new("")),
            Err(LoggingError::InvalidLogDirectory(_))
        ));
        assert!(validate_log_directory(Path::new("./logs")).is_ok());
    }

    #[test]
    fn rejects_unknown_level() {
        let err = build_filter("dash_core=verbose").unwrap_err();
        assert!(matches!(err, LoggingError::InvalidLevel { .. }));
        assert!(build_filter("debug").is_ok());
    }

    #[test]
    fn rotation_names_parse() {
        let config: LoggerConfig = toml::from_str(r#"rotation = "hourly""#).unwrap();
        assert_eq!(config.rotation, LogRotation::Hourly);
        assert_eq!(config.log_file_prefix, "dash");
    }

    #[test]
    fn second_init_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggerConfig {
            log_dir: dir.path().to_path_buf(),
            ..LoggerConfig::default()
        };

        let _first = Logger::init(&config);
        let second = Logger::init(&config);

        assert!(matches!(second, Err(LoggingError::AlreadyInitialized)));
    }
}
