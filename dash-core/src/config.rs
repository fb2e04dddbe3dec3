//! src/config.rs
//! ============================================================================
//! # Config: Dashboard Configuration Loader and Saver
//!
//! Loads and saves settings as TOML from the platform config directory
//! using the [`directories`](https://docs.rs/directories) crate. A missing
//! file is replaced by the defaults, which are written back so the user
//! has something to edit.
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load().await?;
//! config.save_to(&Config::config_path()?).await?;
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use tokio::fs as TokioFs;

use crate::error::AppError;
use crate::logging::LoggerConfig;
use crate::view::theme::ThemeKind;

/// Banner display settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(3),
        }
    }
}

/// Settings for the built-in scan simulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Diagnostic protocol in use; scans fail until one is set
    pub protocol: Option<String>,

    #[serde(with = "humantime_serde")]
    pub latency: Duration,

    /// PIDs the simulated ECU answers to
    pub supported_pids: Vec<u8>,

    /// Error text every scan fails with, if set
    pub force_failure: Option<String>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            protocol: None,
            latency: Duration::from_millis(750),
            // Engine RPM, vehicle speed, throttle position, coolant temp
            supported_pids: vec![0x0C, 0x0D, 0x11, 0x05],
            force_failure: None,
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeKind,

    #[serde(default)]
    pub banner: BannerConfig,

    #[serde(default)]
    pub simulator: SimulatorConfig,

    #[serde(default)]
    pub logging: LoggerConfig,
}

impl Config {
    /// Loads config from the platform config dir, or writes and returns defaults.
    ///
    /// The config is expected at `$XDG_CONFIG_HOME/drive-dash/config.toml`
    /// (Linux), or equivalent on Windows/macOS.
    pub async fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        Ok(Self::load_from(&path).await?)
    }

    pub async fn load_from(path: &Path) -> Result<Self, AppError> {
        if path.exists() {
            info!("Loading config from {}", path.display());
            let text = TokioFs::read_to_string(path)
                .await
                .map_err(|e| AppError::config_io(path, e))?;
            Self::from_toml_str(&text)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save_to(path).await?;

            Ok(default_config)
        }
    }

    pub async fn save_to(&self, path: &Path) -> Result<(), AppError> {
        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::config_io(parent, e))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(path, toml_str)
            .await
            .map_err(|e| AppError::config_io(path, e))?;

        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(text)?)
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "drivedash", "drive-dash")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.simulator.protocol.is_none());
    }

    #[test]
    fn parses_humantime_durations_and_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            theme = "light"

            [banner]
            duration = "1s 500ms"

            [simulator]
            protocol = "ISO 15765-4 CAN"
            latency = "20ms"
            "#,
        )
        .unwrap();

        assert_eq!(config.theme, ThemeKind::Light);
        assert_eq!(config.banner.duration, Duration::from_millis(1500));
        assert_eq!(config.simulator.latency, Duration::from_millis(20));
        assert_eq!(config.simulator.protocol.as_deref(), Some("ISO 15765-4 CAN"));
        assert_eq!(config.simulator.supported_pids, vec![0x0C, 0x0D, 0x11, 0x05]);
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Config::from_toml_str("theme = [").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).await.unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.theme = ThemeKind::Light;
        config.simulator.force_failure = Some("timeout".into());
        config.save_to(&path).await.unwrap();

        let loaded = Config::load_from(&path).await.unwrap();
        assert_eq!(loaded, config);
    }
}
