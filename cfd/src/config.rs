//! configdumper configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configdumper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry file to dump
    #[serde(rename = "registry-path")]
    pub registry_path: PathBuf,

    /// Product name used in the header
    pub product: String,

    /// Fail instead of printing "null" when the version key is missing
    #[serde(rename = "strict-version")]
    pub strict_version: bool,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Window size hint
    pub viewport: ViewportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from(crate::DEFAULT_REGISTRY_PATH),
            product: crate::DEFAULT_PRODUCT.to_string(),
            strict_version: false,
            log_level: None,
            viewport: ViewportConfig::default(),
        }
    }
}

/// Preferred window size in character cells, clamped to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub columns: u16,
    pub rows: u16,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { columns: 60, rows: 25 }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Project-local config: .configdumper.yml
        let local_config = PathBuf::from(".configdumper.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // User config: ~/.config/configdumper/configdumper.yml
        if let Some(path) = Self::user_config_path()
            && path.exists()
        {
            match Self::load_from_file(&path) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Errors are swallowed; the full load reports them later.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => [Some(PathBuf::from(".configdumper.yml")), Self::user_config_path()]
                .into_iter()
                .flatten()
                .collect(),
        };

        Self::first_log_level(&candidates)
    }

    /// Log level of the first candidate that loads; broken files are passed
    /// over the same way `load` passes over them
    fn first_log_level(candidates: &[PathBuf]) -> Option<String> {
        candidates
            .iter()
            .filter(|p| p.exists())
            .find_map(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("configdumper").join("configdumper.yml"))
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}
