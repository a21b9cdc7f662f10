//! Settings file.
//!
//! Read from the TOML file passed with `--config`. Every table and key is
//! optional; anything missing falls back to its default.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use roster_model::ValidationThresholds;
use roster_rules::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT, GenerationError,
    GeneratorSettings,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generator: GeneratorConfig,
    pub thresholds: ValidationThresholds,
}

impl Settings {
    /// Defaults when no path is given; a given path must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read settings {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parse settings {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

// =============================================================================
// GENERATOR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Environment variable holding the API key. The key itself never lives in the file.
    pub api_key_env: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Client settings with the API key read from the environment.
    pub fn client_settings(&self) -> Result<GeneratorSettings, GenerationError> {
        Ok(GeneratorSettings::from_env(&self.api_key_env)?
            .with_model(&self.model)
            .with_base_url(&self.base_url)
            .with_timeout(self.timeout()))
    }
}
