//! Provider configuration domain types.
//!
//! A provider is one upstream chat-completion backend. Every provider speaks
//! the same minimal OpenAI-style chat shape; the kind only exists to keep room
//! for request-shaping quirks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminates upstream backends.
///
/// Serialized as a plain string so the config file stays hand-editable.
/// Unknown strings are preserved as [`ProviderKind::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderKind {
    /// OpenAI or any OpenAI-compatible endpoint.
    #[default]
    OpenAi,
    /// DeepSeek chat API.
    DeepSeek,
    /// Anything else; the original string is kept.
    Custom(String),
}

impl ProviderKind {
    /// Canonical string form used in configuration and logs.
    pub fn as_str(&self) -> &str {
        match self {
            Self::OpenAi => "openai",
            Self::DeepSeek => "deepseek",
            Self::Custom(name) => name,
        }
    }
}

impl From<String> for ProviderKind {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Self::OpenAi,
            "deepseek" => Self::DeepSeek,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for ProviderKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ProviderKind> for String {
    fn from(kind: ProviderKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One upstream translation backend.
///
/// Field names follow the on-disk config schema (`type`, `apiKey`, `apiUrl`,
/// `modelName`, `systemMsg`). The `Debug` impl never prints the API key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Provider kind.
    #[serde(rename = "type", default)]
    pub kind: ProviderKind,
    /// Bearer credential sent upstream.
    #[serde(default)]
    pub api_key: String,
    /// Full chat-completions endpoint URL.
    #[serde(default)]
    pub api_url: String,
    /// Upstream model identifier (e.g. `deepseek-chat`).
    #[serde(default)]
    pub model_name: String,
    /// System instruction sent as the first chat message.
    #[serde(default)]
    pub system_msg: String,
}

impl ProviderConfig {
    /// Create a provider configuration.
    pub fn new(
        kind: impl Into<ProviderKind>,
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        model_name: impl Into<String>,
        system_msg: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            api_key: api_key.into(),
            api_url: api_url.into(),
            model_name: model_name.into(),
            system_msg: system_msg.into(),
        }
    }

    /// Whether a credential has been filled in.
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_empty() {
            "<empty>"
        } else {
            "<redacted>"
        };
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &key)
            .field("api_url", &self.api_url)
            .field("model_name", &self.model_name)
            .field("system_msg", &self.system_msg)
            .finish()
    }
}
