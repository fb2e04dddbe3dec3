//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Dashboard
//!
//! Config and scan-service operations return `Result<T, AppError>`.
//! Scan *outcomes* are not errors (see [`crate::model::scan_status`]); this
//! type only covers faults: config parsing and file access, and a scan
//! service that could not produce a result at all. Logging setup has its
//! own `LoggingError`, and `main` collects everything with `anyhow`.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all dashboard operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// TOML config serialization error.
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config file I/O error with path.
    #[error("Failed to access config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The scan service faulted instead of resolving with a result.
    #[error("Scan service '{service}' faulted: {reason}")]
    ScanService { service: String, reason: String },
}

impl AppError {
    /// Create a scan service fault
    pub fn scan_service<S1: Into<String>, S2: Into<String>>(service: S1, reason: S2) -> Self {
        Self::ScanService {
            service: service.into(),
            reason: reason.into(),
        }
    }

    /// Create a config I/O error bound to a path
    pub fn config_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_service_error_names_the_service() {
        let err = AppError::scan_service("simulator", "adapter disconnected");
        assert_eq!(
            err.to_string(),
            "Scan service 'simulator' faulted: adapter disconnected"
        );
    }

    #[test]
    fn config_io_error_names_the_path() {
        let err = AppError::config_io(
            "/etc/drive-dash/config.toml",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to access config file \"/etc/drive-dash/config.toml\": denied"
        );
    }
}
