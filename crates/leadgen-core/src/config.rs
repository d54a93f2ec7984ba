//! Configuration management for the lead machine

use serde::{Deserialize, Serialize};
use crate::constants::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::error::{LeadGenError, Result};
use crate::paths;
use std::path::{Path, PathBuf};

/// Environment prefix for layered configuration (`LEADGEN__GEMINI__API_KEY`)
pub const ENV_PREFIX: &str = "LEADGEN";

/// Bare variable the API key falls back to
pub const API_KEY_ENV_FALLBACK: &str = "API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadGenConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub credits: CreditsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default, alias = "apiKey")]
    pub api_key: String,

    #[serde(default = "default_gemini_model")]
    pub model: String,

    #[serde(alias = "api_url", default = "default_gemini_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditsConfig {
    /// Where the balance is persisted; defaults to `<data root>/credits.json`
    #[serde(default)]
    pub state_file: Option<PathBuf>,
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_gemini_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
        }
    }
}

impl CreditsConfig {
    pub fn state_file(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(paths::credits_file)
    }
}

impl LeadGenConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LeadGenError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_json_str(&content)
    }

    /// Load configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LeadGenConfig = serde_json::from_str(json)
            .map_err(|e| LeadGenError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Layer an optional JSON file and `LEADGEN__*` environment variables,
    /// then validate.
    ///
    /// When no key is configured, the bare `API_KEY` variable is used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = Self::load_unchecked(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Same layering as [`LeadGenConfig::load`] without validation, for
    /// commands that never reach the generation service.
    pub fn load_unchecked(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(LeadGenError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(
                config::File::from(path).format(config::FileFormat::Json),
            );
        }

        let mut config: LeadGenConfig = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .and_then(|built| built.try_deserialize())
            .map_err(|e| LeadGenError::Config(format!("Failed to load config: {}", e)))?;

        if config.gemini.api_key.is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV_FALLBACK) {
                log::debug!("Using {} for the Gemini API key", API_KEY_ENV_FALLBACK);
                config.gemini.api_key = key;
            }
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(LeadGenError::Config(
                "Gemini API key is required (set LEADGEN__GEMINI__API_KEY or API_KEY)".to_string(),
            ));
        }

        if self.gemini.model.trim().is_empty() {
            return Err(LeadGenError::Config("Gemini model is required".to_string()));
        }

        if !(self.gemini.base_url.starts_with("http://")
            || self.gemini.base_url.starts_with("https://"))
        {
            return Err(LeadGenError::Config(format!(
                "Gemini base URL must be http(s), got '{}'",
                self.gemini.base_url
            )));
        }

        Ok(())
    }
}
