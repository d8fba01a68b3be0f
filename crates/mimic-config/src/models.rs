use indexmap::IndexMap;
use serde::Deserialize;
use url::Url;

/// Model names exposed by default, mirroring the DeepSeek lineup
pub const MODEL_CHAT: &str = "deepseek-chat";
pub const MODEL_REASONER: &str = "deepseek-reasoner";

/// Configuration for a single exposed model
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Endpoint override; falls back to `upstream.url` when absent
    #[serde(default)]
    pub endpoint: Option<Url>,
    /// Whether responses may carry reasoning output under a separate
    /// delta key; also enables message-sequence validation
    #[serde(default)]
    pub reasoning: bool,
}

/// Model table used when the config declares none
pub fn default_models() -> IndexMap<String, ModelConfig> {
    let mut models = IndexMap::new();
    models.insert(MODEL_CHAT.to_owned(), ModelConfig::default());
    models.insert(
        MODEL_REASONER.to_owned(),
        ModelConfig {
            endpoint: None,
            reasoning: true,
        },
    );
    models
}
