use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name the sound plugin registers under unless configured otherwise.
pub const DEFAULT_SERVICE_NAME: &str = "UISounds";

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_asset_root() -> PathBuf {
    PathBuf::from("www")
}

/// Where an asset reference lives under `asset_root`
pub fn resolve_asset_path(asset_root: &Path, asset_path: &str) -> PathBuf {
    asset_root.join(asset_path)
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_console() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Directory for daily rotated log files; no file logging when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Also log to stderr
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            log_dir: None,
            console: default_console(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundsConfig {
    /// Target name the native plugin is registered under on the bridge
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Directory asset paths are resolved against
    #[serde(default = "default_asset_root")]
    pub asset_root: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SoundsConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            asset_root: default_asset_root(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SoundsConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SoundsConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::LoadFailed {
                path: "<memory>".to_string(),
                source: Box::new(e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        let config: SoundsConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
        config.validate()?;

        tracing::info!("Loaded sounds config from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to disk as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(path, json).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.trim().is_empty() {
            return Err(ConfigError::Invalid("service_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Resolve an asset reference against the asset root
    pub fn resolve_asset(&self, asset_path: &str) -> PathBuf {
        resolve_asset_path(&self.asset_root, asset_path)
    }
}
