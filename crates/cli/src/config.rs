use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use cronscan_export::Format;
use cronscan_schedule::UserColumn;

/// CLI configuration loaded from TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Output format when --format is not given
    #[serde(default = "default_format")]
    pub default_format: Format,

    /// Window length when neither --end-time nor --time-span is given
    #[serde(default = "default_span")]
    pub default_span: String,

    /// Directory for generated report names (default: current directory)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// User-column policy applied to every source unless overridden
    #[serde(default)]
    pub user_column: Option<UserColumn>,
}

fn default_format() -> Format {
    Format::Csv
}

fn default_span() -> String {
    "1d".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            default_span: default_span(),
            output_dir: None,
            user_column: None,
        }
    }
}

impl CliConfig {
    /// Return the default config file path: ~/.config/cronscan/config.toml
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("cronscan");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_config_path() {
                Ok(p) => p,
                Err(e) => {
                    debug!(error = %e, "No config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if config_path.exists() {
            debug!(?config_path, "Loading config");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            debug!(?config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}
