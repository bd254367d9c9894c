//! Translation request and chat message types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::provider::ProviderConfig;

/// How a request selects its provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Provider is looked up by `modelType` in the registry.
    Registry,
    /// Caller supplies full provider parameters for a one-off call.
    Inline,
}

impl fmt::Display for RequestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry => write!(f, "registry"),
            Self::Inline => write!(f, "inline"),
        }
    }
}

/// Body of `POST /translate`.
///
/// Only `text` is required in registry mode. When any inline provider field
/// is set, the request switches to [`RequestMode::Inline`].
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationRequest {
    /// Text to translate.
    pub text: String,
    /// Registry key (registry mode) or provider kind (inline mode).
    pub model_type: Option<String>,
    /// Inline bearer credential.
    pub api_key: Option<String>,
    /// Inline endpoint URL.
    pub api_url: Option<String>,
    /// Inline upstream model identifier.
    pub model_name: Option<String>,
    /// Inline system instruction.
    pub system_msg: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

impl TranslationRequest {
    /// Registry-mode request for `text`, optionally naming a model type.
    pub fn new(text: impl Into<String>, model_type: Option<&str>) -> Self {
        Self {
            text: text.into(),
            model_type: model_type.map(str::to_string),
            ..Self::default()
        }
    }

    /// Model type selector, with empty strings treated as absent.
    pub fn model_type(&self) -> Option<&str> {
        non_empty(self.model_type.as_ref())
    }

    /// Mode is inline as soon as any inline provider field is present.
    pub fn mode(&self) -> RequestMode {
        let inline = [
            &self.api_key,
            &self.api_url,
            &self.model_name,
            &self.system_msg,
        ]
        .into_iter()
        .any(|field| non_empty(field.as_ref()).is_some());

        if inline {
            RequestMode::Inline
        } else {
            RequestMode::Registry
        }
    }

    /// Build the one-off provider for an inline request.
    ///
    /// Returns `None` in registry mode. Callers should validate first; missing
    /// fields are filled with empty strings here.
    pub fn inline_provider(&self) -> Option<ProviderConfig> {
        if self.mode() != RequestMode::Inline {
            return None;
        }
        let field = |v: &Option<String>| v.clone().unwrap_or_default();
        Some(ProviderConfig::new(
            self.model_type().unwrap_or_default(),
            field(&self.api_key),
            field(&self.api_url),
            field(&self.model_name),
            field(&self.system_msg),
        ))
    }
}

// Inline credentials must never reach the logs.
impl fmt::Debug for TranslationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationRequest")
            .field("text_len", &self.text.chars().count())
            .field("model_type", &self.model_type)
            .field("mode", &self.mode())
            .field("api_url", &self.api_url)
            .field("model_name", &self.model_name)
            .finish_non_exhaustive()
    }
}

/// Chat role used in upstream requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

/// A role/content pair sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// The two messages of a translation: system instruction, then user text.
    pub fn translation_pair(provider: &ProviderConfig, text: &str) -> [Self; 2] {
        [Self::system(&provider.system_msg), Self::user(text)]
    }
}
