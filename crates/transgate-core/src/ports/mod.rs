//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define what the core expects from infrastructure and use only
//! domain types. No HTTP client types appear in any signature.

pub mod translation;

pub use translation::{TranslationClientPort, TranslationError};
