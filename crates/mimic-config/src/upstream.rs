use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default chat-completions endpoint when none is configured
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.deepseek.com/v1/chat/completions";

/// Upstream chat-completion API configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Bearer credential sent with every upstream request
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Chat-completions URL used for models without their own endpoint
    #[serde(default = "default_url")]
    pub url: Url,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: default_url(),
        }
    }
}

fn default_url() -> Url {
    Url::parse(DEFAULT_UPSTREAM_URL).expect("valid default URL")
}
