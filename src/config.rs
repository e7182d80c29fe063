//! Application configuration at ~/.config/calgrid/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calgrid_core::LayoutConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

const DEFAULT_LOG_LEVEL: &str = "info";

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Top-level configuration.
///
/// Every value can be overridden from the environment with a `CALGRID__`
/// prefix and `__` between nested keys, e.g. `CALGRID__LAYOUT__HOUR_HEIGHT=60`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Hosted events backend; the in-memory backend is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendConfig>,

    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: default_log_level(),
            backend: None,
            layout: LayoutConfig::default(),
        }
    }
}

/// Get the config directory path (~/.config/calgrid)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("calgrid");
    Ok(config_dir)
}

/// Get the config file path (~/.config/calgrid/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

impl AppConfig {
    /// Load from the default location, writing a commented default file
    /// first if none exists.
    pub fn load() -> Result<Self> {
        let path = config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    /// Load from `path` (optional) layered with `CALGRID__*` environment
    /// variables.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: AppConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CALGRID").separator("__"))
            .build()
            .with_context(|| format!("Failed to read config from {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("Invalid config in {}", path.display()))?;

        config
            .layout
            .validate()
            .with_context(|| format!("Invalid [layout] in {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Could not write config file {}", path.display()))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = format!(
            "\
# calgrid configuration

# Log level (overridden by CALGRID_LOG):
# log_level = \"{DEFAULT_LOG_LEVEL}\"

# Hosted events backend:
# [backend]
# url = \"https://your-project.supabase.co\"
# api_key = \"your-anon-key\"

# Grid layout:
# [layout]
# timezone = \"Asia/Seoul\"
# hour_height = 50.0
# gap_percent = 1.0
# week_start = \"Sun\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create config directory {}", parent.display()))?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Could not write config file {}", path.display()))?;

        Ok(())
    }
}
