//! Application configuration
//!
//! Read from `~/.grimoire/config.toml`. Every field is optional; a missing
//! file means all defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants;
use crate::paths;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Key the scenario collection is stored under
    pub storage_key: String,
    /// SQLite database location
    pub database_path: Option<PathBuf>,
    pub ai: AiSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: constants::app::STORAGE_KEY.to_string(),
            database_path: None,
            ai: AiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub skill_temperature: f32,
    pub scenario_temperature: f32,
    pub top_p: f32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: constants::ai::DEFAULT_MODEL.to_string(),
            base_url: None,
            timeout_secs: constants::ai::DEFAULT_TIMEOUT_SECS,
            skill_temperature: constants::ai::SKILL_TEMPERATURE,
            scenario_temperature: constants::ai::SCENARIO_TEMPERATURE,
            top_p: constants::ai::TOP_P,
        }
    }
}

impl AiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl AppConfig {
    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from_path(&paths::config_file())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: AppConfig =
            toml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(paths::database_path)
    }
}
