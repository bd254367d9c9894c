#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

// Used by integration tests only
#[cfg(test)]
use axum as _;

mod client;
mod config;
pub mod wire;

pub use client::ReqwestTranslationClient;
pub use config::UpstreamClientConfig;
