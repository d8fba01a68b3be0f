//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use mimic_config::{Config, ModelConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults and no models
    pub fn new() -> Self {
        let mut config = Config::default();
        config.server.listen_address = Some(SocketAddr::from(([127, 0, 0, 1], 0)));
        config.upstream.api_key = Some(SecretString::from("test-key"));
        config.models.clear();

        Self { config }
    }

    /// Expose a chat model pointed at a mock completions endpoint
    pub fn with_model(mut self, name: &str, completions_url: &str) -> Self {
        self.config.models.insert(
            name.to_owned(),
            ModelConfig {
                endpoint: Some(completions_url.parse().expect("valid URL")),
                reasoning: false,
            },
        );
        self
    }

    /// Expose a reasoning model pointed at a mock completions endpoint
    pub fn with_reasoning_model(mut self, name: &str, completions_url: &str) -> Self {
        self.config.models.insert(
            name.to_owned(),
            ModelConfig {
                endpoint: Some(completions_url.parse().expect("valid URL")),
                reasoning: true,
            },
        );
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
