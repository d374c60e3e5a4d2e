//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME};
use crate::models::{PropertyInputs, ValuationMethod};
use crate::tables::ReferenceTables;
use crate::validation::MAX_USEFUL_LIFE_YEARS;

/// Default commentary API base URL.
pub const DEFAULT_COMMENTARY_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default commentary model.
pub const DEFAULT_COMMENTARY_MODEL: &str = "gemini-2.5-flash";

/// Default name of the environment variable holding the commentary API key.
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding the property store (defaults to the config directory)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// JSON file replacing the built-in reference tables
    #[serde(default)]
    pub reference_tables: Option<PathBuf>,
}

/// Defaults applied to newly created properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Total useful life in years
    #[serde(default = "default_useful_life")]
    pub total_useful_life_years: u32,
    /// Valuation method
    #[serde(default)]
    pub method: ValuationMethod,
}

fn default_useful_life() -> u32 {
    80
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            total_useful_life_years: default_useful_life(),
            method: ValuationMethod::default(),
        }
    }
}

/// Narrative commentary service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryConfig {
    /// Base URL of the model API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model name appended to the endpoint
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable the API key is read from
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_endpoint() -> String {
    DEFAULT_COMMENTARY_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_COMMENTARY_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl CommentaryConfig {
    /// Reads the API key from the configured environment variable.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/immokpa/config.toml`
/// - macOS: `~/Library/Application Support/immokpa/config.toml`
/// - Windows: `%APPDATA%\immokpa\config.toml`
///
/// Setting `IMMOKPA_CONFIG_DIR` replaces the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Defaults for new properties
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Commentary service
    #[serde(default)]
    pub commentary: CommentaryConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// `IMMOKPA_CONFIG_DIR` wins over the platform directory.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory the property store lives in.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.paths.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::config_dir(),
        }
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate().context(format!(
            "Invalid config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file (temp file + rename).
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - default useful life is within 1..=200 years
    /// - commentary endpoint, model and key variable are not blank
    pub fn validate(&self) -> Result<()> {
        let years = self.defaults.total_useful_life_years;
        if years == 0 || years > MAX_USEFUL_LIFE_YEARS {
            anyhow::bail!(
                "Default useful life must be between 1 and {} years, got {}",
                MAX_USEFUL_LIFE_YEARS,
                years
            );
        }

        if self.commentary.endpoint.trim().is_empty() {
            anyhow::bail!("Commentary endpoint cannot be empty");
        }
        if self.commentary.model.trim().is_empty() {
            anyhow::bail!("Commentary model cannot be empty");
        }
        if self.commentary.api_key_env.trim().is_empty() {
            anyhow::bail!("Commentary API key variable name cannot be empty");
        }

        Ok(())
    }

    /// Inputs for a new property with the configured defaults applied.
    #[must_use]
    pub fn default_inputs(&self) -> PropertyInputs {
        PropertyInputs {
            total_useful_life_years: self.defaults.total_useful_life_years,
            method: self.defaults.method,
            ..PropertyInputs::default()
        }
    }

    /// Reference tables to value with.
    ///
    /// Falls back to the built-in tables if the configured file cannot be
    /// loaded.
    #[must_use]
    pub fn reference_tables(&self) -> ReferenceTables {
        match &self.paths.reference_tables {
            Some(path) => ReferenceTables::load_from_file(path).unwrap_or_else(|e| {
                warn!("{:#}; using built-in reference tables", e);
                ReferenceTables::builtin().clone()
            }),
            None => ReferenceTables::builtin().clone(),
        }
    }
}
