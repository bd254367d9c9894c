//! Persisted gateway configuration.
//!
//! The config file is a small JSON document that operators edit by hand:
//!
//! ```json
//! {
//!   "port": 8080,
//!   "defaultModel": "deepseek",
//!   "models": {
//!     "deepseek": { "type": "deepseek", "apiKey": "", "apiUrl": "...", "modelName": "...", "systemMsg": "..." }
//!   }
//! }
//! ```
//!
//! When the file does not exist, built-in defaults are written so credentials
//! can be filled in out-of-band. A file that exists but does not parse is an
//! error; the gateway must not start with undefined provider state.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ProviderConfig, ProviderKind};
use crate::paths::{PathError, ensure_parent_dir};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Model type selected when a request names none.
pub const DEFAULT_MODEL_TYPE: &str = "deepseek";

/// System instruction used by the built-in providers.
pub const DEFAULT_SYSTEM_MSG: &str = "You are a professional translation engine. \
Translate the user's text into Simplified Chinese. If the text is already Chinese, \
translate it into English. Output only the translation without explanations.";

/// Errors loading or persisting the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Malformed config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to write config file {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from an existing file.
    Loaded,
    /// File was missing; built-in defaults were written.
    CreatedDefault,
}

/// On-disk gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Listen port (overridable from the environment).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Model type used when a request names none.
    #[serde(default)]
    pub default_model: String,
    /// Providers keyed by model type.
    #[serde(default)]
    pub models: BTreeMap<String, ProviderConfig>,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl GatewayConfig {
    /// Built-in configuration: two providers with empty credentials.
    pub fn with_defaults() -> Self {
        let models = BTreeMap::from([
            (
                "deepseek".to_string(),
                ProviderConfig::new(
                    ProviderKind::DeepSeek,
                    "",
                    "https://api.deepseek.com/v1/chat/completions",
                    "deepseek-chat",
                    DEFAULT_SYSTEM_MSG,
                ),
            ),
            (
                "openai".to_string(),
                ProviderConfig::new(
                    ProviderKind::OpenAi,
                    "",
                    "https://api.openai.com/v1/chat/completions",
                    "gpt-4o-mini",
                    DEFAULT_SYSTEM_MSG,
                ),
            ),
        ]);

        Self {
            port: DEFAULT_PORT,
            default_model: DEFAULT_MODEL_TYPE.to_string(),
            models,
        }
    }

    /// Read and parse a config file. `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    /// Write this config as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        ensure_parent_dir(path)?;

        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        json.push('\n');

        fs::write(path, json).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load the config file, writing built-in defaults first if it is missing.
    pub fn load_or_create(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        if let Some(config) = Self::load(path)? {
            return Ok((config, ConfigSource::Loaded));
        }

        let config = Self::with_defaults();
        config.save(path)?;
        Ok((config, ConfigSource::CreatedDefault))
    }

    /// Model types whose credential is still empty.
    pub fn models_missing_credentials(&self) -> Vec<&str> {
        self.models
            .iter()
            .filter(|(_, provider)| !provider.has_credential())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
