//! Static model-name to upstream-endpoint resolution

use indexmap::IndexMap;
use mimic_config::Config;
use url::Url;

use crate::error::ProxyError;

/// Behavioral class of an exposed model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Baseline chat model; no message-sequence constraints
    Chat,
    /// Reasoning-capable model; streams thinking text under a separate
    /// delta key and enforces strict turn alternation
    Reasoner,
}

/// Resolved upstream target for one model
#[derive(Debug, Clone)]
pub struct ModelTarget {
    /// Chat-completions endpoint to call
    pub endpoint: Url,
    /// Behavioral class
    pub kind: ModelKind,
}

/// Immutable model table, built once at startup and shared read-only
#[derive(Debug)]
pub struct ModelRegistry {
    models: IndexMap<String, ModelTarget>,
}

impl ModelRegistry {
    /// Build the registry from configuration
    ///
    /// Models without their own endpoint fall back to the shared upstream
    /// URL.
    pub fn from_config(config: &Config) -> Self {
        let models = config
            .models
            .iter()
            .map(|(name, model)| {
                let endpoint = model.endpoint.clone().unwrap_or_else(|| config.upstream.url.clone());
                let kind = if model.reasoning {
                    ModelKind::Reasoner
                } else {
                    ModelKind::Chat
                };
                (name.clone(), ModelTarget { endpoint, kind })
            })
            .collect();

        Self { models }
    }

    /// Look up a model by name
    ///
    /// # Errors
    ///
    /// Returns `ProxyError::ModelNotFound` for unknown names; an unknown
    /// model is a caller error, never a panic.
    pub fn resolve(&self, model: &str) -> Result<&ModelTarget, ProxyError> {
        self.models.get(model).ok_or_else(|| ProxyError::ModelNotFound {
            model: model.to_owned(),
        })
    }

    /// Names of all exposed models, in configuration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> Config {
        let mut config = Config::default();
        config.upstream.api_key = Some(secrecy::SecretString::from("k"));
        config
    }

    #[test]
    fn default_models_resolve_to_upstream_url() {
        let config = config_with_key();
        let registry = ModelRegistry::from_config(&config);

        let chat = registry.resolve("deepseek-chat").unwrap();
        assert_eq!(chat.endpoint, config.upstream.url);
        assert_eq!(chat.kind, ModelKind::Chat);

        let reasoner = registry.resolve("deepseek-reasoner").unwrap();
        assert_eq!(reasoner.kind, ModelKind::Reasoner);
    }

    #[test]
    fn unknown_model_is_an_error() {
        let registry = ModelRegistry::from_config(&config_with_key());
        let err = registry.resolve("invalid-model").unwrap_err();
        assert!(matches!(err, ProxyError::ModelNotFound { model } if model == "invalid-model"));
    }

    #[test]
    fn per_model_endpoint_override() {
        let mut config = config_with_key();
        config
            .models
            .get_mut("deepseek-chat")
            .unwrap()
            .endpoint = Some("http://localhost:9999/v1/chat/completions".parse().unwrap());

        let registry = ModelRegistry::from_config(&config);
        let chat = registry.resolve("deepseek-chat").unwrap();
        assert_eq!(chat.endpoint.port(), Some(9999));
    }

    #[test]
    fn names_preserve_configuration_order() {
        let registry = ModelRegistry::from_config(&config_with_key());
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["deepseek-chat", "deepseek-reasoner"]);
    }
}
