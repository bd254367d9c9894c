//! Provider registry.
//!
//! Maps logical model-type names (`deepseek`, `openai`, ...) to provider
//! configurations. Built once during startup and read-only afterwards, so it
//! is shared behind an `Arc` without any locking.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::config::GatewayConfig;
use crate::domain::ProviderConfig;

/// Errors from registry construction and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No model type was requested and no default is configured.
    #[error("No model type given and no default model is configured")]
    NoDefaultModel,

    /// The requested model type is not registered.
    #[error("Unknown model type: {0}")]
    UnknownModel(String),

    /// The configured default does not name a registered model type.
    #[error("Default model '{0}' is not a registered model type")]
    DefaultNotRegistered(String),
}

/// Immutable set of named providers plus the default selection.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, ProviderConfig>,
    default_model: Option<String>,
}

impl ProviderRegistry {
    /// Build a registry, checking that the default (if any) is registered.
    ///
    /// An empty default name is treated as "no default".
    pub fn new(
        providers: impl IntoIterator<Item = (String, ProviderConfig)>,
        default_model: Option<String>,
    ) -> Result<Self, RegistryError> {
        let providers: BTreeMap<_, _> = providers.into_iter().collect();
        let default_model = default_model.filter(|name| !name.trim().is_empty());

        if let Some(name) = &default_model
            && !providers.contains_key(name)
        {
            return Err(RegistryError::DefaultNotRegistered(name.clone()));
        }

        Ok(Self {
            providers,
            default_model,
        })
    }

    /// Build a registry from a loaded configuration file.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, RegistryError> {
        Self::new(
            config
                .models
                .iter()
                .map(|(name, provider)| (name.clone(), provider.clone())),
            Some(config.default_model.clone()),
        )
    }

    /// Resolve a model type to its provider.
    ///
    /// `None` or an empty string selects the default model. Resolution never
    /// falls back to an arbitrary entry when the default is missing.
    pub fn resolve(&self, model_type: Option<&str>) -> Result<&ProviderConfig, RegistryError> {
        let name = match model_type.filter(|name| !name.trim().is_empty()) {
            Some(name) => name,
            None => self
                .default_model
                .as_deref()
                .ok_or(RegistryError::NoDefaultModel)?,
        };

        self.providers
            .get(name)
            .ok_or_else(|| RegistryError::UnknownModel(name.to_string()))
    }

    /// The default model type, if configured.
    pub fn default_model(&self) -> Option<&str> {
        self.default_model.as_deref()
    }

    /// Registered model types, sorted.
    pub fn model_types(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
