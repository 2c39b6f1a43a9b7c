//! Configuration file support for anthro.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/anthro/config.toml`.

use crate::{Error, Protocol, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub assessment: AssessmentConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Assessment defaults
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Protocol used when neither the command line nor the input names one
    #[serde(default = "default_protocol")]
    pub default_protocol: Protocol,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            default_protocol: default_protocol(),
        }
    }
}

/// Text report presentation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Decimal places printed for computed values
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
        }
    }
}

// Default value functions
fn default_protocol() -> Protocol {
    Protocol::Pollock7
}

fn default_decimals() -> usize {
    2
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME")
                    .map_err(|_| Error::Config("HOME environment variable not set".into()))?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("anthro").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.report.decimals > 6 {
            return Err(Error::Config(format!(
                "report.decimals must be at most 6, got {}",
                self.report.decimals
            )));
        }
        Ok(())
    }
}
