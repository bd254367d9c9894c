//! Domain types shared by every adapter.

mod provider;
mod request;

pub use provider::{ProviderConfig, ProviderKind};
pub use request::{ChatMessage, ChatRole, RequestMode, TranslationRequest};
