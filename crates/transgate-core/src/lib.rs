#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod context;
pub mod domain;
pub mod paths;
pub mod ports;
pub mod registry;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::{
    ConfigError, ConfigSource, DEFAULT_MODEL_TYPE, DEFAULT_PORT, DEFAULT_SYSTEM_MSG, GatewayConfig,
};
pub use context::CallContext;
pub use domain::{
    ChatMessage, ChatRole, ProviderConfig, ProviderKind, RequestMode, TranslationRequest,
};
pub use paths::{CONFIG_FILE_NAME, DATA_DIR_ENV, PathError, data_root, default_config_path};
pub use ports::{TranslationClientPort, TranslationError};
pub use registry::{ProviderRegistry, RegistryError};
pub use validation::{ValidationError, validate};
