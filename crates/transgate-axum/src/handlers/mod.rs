//! HTTP handlers.

pub mod system;
pub mod translate;
