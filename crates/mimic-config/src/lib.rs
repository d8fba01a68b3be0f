#![allow(clippy::must_use_candidate)]

//! Typed configuration for the Mimic proxy
//!
//! Configuration comes from a TOML file with `{{ env.VAR }}` interpolation,
//! or from plain environment variables when no file is present.

mod env;
mod loader;
pub mod models;
pub mod server;
pub mod upstream;

use indexmap::IndexMap;
use serde::Deserialize;

pub use models::ModelConfig;
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

/// Top-level Mimic configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream chat-completion API configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Exposed models keyed by name
    #[serde(default = "models::default_models")]
    pub models: IndexMap<String, ModelConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            models: models::default_models(),
        }
    }
}
