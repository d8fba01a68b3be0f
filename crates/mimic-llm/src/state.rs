//! Shared proxy state and the chat entry points

use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::Stream;
use mimic_config::Config;

use crate::error::ProxyError;
use crate::protocol::ollama::{ChatChunk, ChatCompletion, ChatTurn};
use crate::registry::ModelRegistry;
use crate::upstream::UpstreamClient;
use crate::validate::validate_turns;

/// Shared state for proxy route handlers
///
/// Everything inside is read-only after construction, so concurrent
/// request tasks share it without locking.
#[derive(Clone)]
pub struct ProxyState {
    inner: Arc<ProxyStateInner>,
}

struct ProxyStateInner {
    registry: ModelRegistry,
    upstream: UpstreamClient,
    started: Instant,
}

impl ProxyState {
    /// Build state from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream credential is absent; `validate()`
    /// normally catches this before the server is constructed.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config
            .upstream
            .api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("upstream credential is not configured"))?;

        Ok(Self {
            inner: Arc::new(ProxyStateInner {
                registry: ModelRegistry::from_config(config),
                upstream: UpstreamClient::new(api_key),
                started: Instant::now(),
            }),
        })
    }

    /// Execute a buffered chat completion
    ///
    /// # Errors
    ///
    /// Returns an error for unknown models, invalid turn sequences, and
    /// upstream failures.
    pub async fn chat(&self, model: &str, turns: &[ChatTurn]) -> Result<ChatCompletion, ProxyError> {
        let target = self.inner.registry.resolve(model)?;
        validate_turns(turns, target.kind)?;
        self.inner.upstream.complete(target, model, turns).await
    }

    /// Execute a streaming chat completion
    ///
    /// # Errors
    ///
    /// Fails before any output is produced; mid-stream failures truncate
    /// the returned stream instead.
    pub async fn chat_stream(
        &self,
        model: &str,
        turns: &[ChatTurn],
    ) -> Result<Pin<Box<dyn Stream<Item = ChatChunk> + Send>>, ProxyError> {
        let target = self.inner.registry.resolve(model)?;
        validate_turns(turns, target.kind)?;
        self.inner.upstream.complete_stream(target, model, turns).await
    }

    /// Names of all exposed models, in configuration order
    pub fn model_names(&self) -> Vec<String> {
        self.inner.registry.names().map(ToOwned::to_owned).collect()
    }

    /// Time since this state was constructed
    pub fn uptime(&self) -> Duration {
        self.inner.started.elapsed()
    }
}
