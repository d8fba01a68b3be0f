//! Upstream chat-completion client
//!
//! One `reqwest::Client` per process, shared by every request task. The
//! streaming path frames the upstream byte stream into lines and drives the
//! line parser over each one; the buffered path does a single round trip.

use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt, TryStreamExt, future};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tokio_util::codec::{AnyDelimiterCodec, FramedRead};
use tokio_util::io::StreamReader;

use crate::error::ProxyError;
use crate::parse::parse_line;
use crate::protocol::deepseek::{DeepseekRequest, DeepseekResponse};
use crate::protocol::ollama::{ChatChunk, ChatCompletion, ChatTurn};
use crate::registry::{ModelKind, ModelTarget};

/// Upper bound on one upstream stream line
const MAX_LINE_BYTES: usize = 256 * 1024;

/// Client for the upstream chat-completion API
pub struct UpstreamClient {
    client: Client,
    api_key: SecretString,
}

impl UpstreamClient {
    /// Create a client that authenticates with the given bearer credential
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Execute one buffered round trip and repackage the first choice
    ///
    /// # Errors
    ///
    /// Returns `UpstreamStatus` for non-success responses (classified by
    /// status range at the HTTP boundary), `Upstream` for transport
    /// failures, and `UpstreamShape` when the body cannot be used.
    pub async fn complete(
        &self,
        target: &ModelTarget,
        model: &str,
        turns: &[ChatTurn],
    ) -> Result<ChatCompletion, ProxyError> {
        let response = self.send(target, model, turns, false).await?;

        let body: DeepseekResponse = response
            .json()
            .await
            .map_err(|e| ProxyError::UpstreamShape(format!("failed to decode response: {e}")))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProxyError::UpstreamShape("response carried no choices".to_owned()))?;

        Ok(ChatCompletion {
            model: body.model,
            message: choice.message,
            done: true,
        })
    }

    /// Open a streaming round trip and translate it line by line
    ///
    /// Chunks are emitted in source-line order with no cross-line
    /// buffering. The stream ends after the first `done: true` chunk, or
    /// when the upstream closes — possibly without ever signaling
    /// completion, which callers must tolerate.
    ///
    /// # Errors
    ///
    /// Fails only while establishing the connection; mid-stream failures
    /// truncate the output instead.
    pub async fn complete_stream(
        &self,
        target: &ModelTarget,
        model: &str,
        turns: &[ChatTurn],
    ) -> Result<Pin<Box<dyn Stream<Item = ChatChunk> + Send>>, ProxyError> {
        let response = self.send(target, model, turns, true).await?;
        Ok(Box::pin(chunk_stream(response.bytes_stream(), target.kind)))
    }

    async fn send(
        &self,
        target: &ModelTarget,
        model: &str,
        turns: &[ChatTurn],
        stream: bool,
    ) -> Result<reqwest::Response, ProxyError> {
        let payload = DeepseekRequest {
            model,
            messages: turns,
            stream,
        };

        let response = self
            .client
            .post(target.endpoint.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(model, error = %e, "upstream request failed");
                ProxyError::Upstream(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(model, status = %status, "upstream returned error");
            return Err(ProxyError::UpstreamStatus { status, body });
        }

        Ok(response)
    }
}

/// Frame an upstream byte stream into lines and translate each one
///
/// Lines may arrive split across byte chunks; the framed reader
/// reassembles them. Invalid UTF-8 is replaced rather than faulting, so a
/// bad line is at worst skipped by the parser. Read errors truncate the
/// stream, and the first `done` chunk terminates it — `done` stays
/// monotonic no matter what the upstream sends afterwards.
fn chunk_stream<S, E>(bytes: S, kind: ModelKind) -> impl Stream<Item = ChatChunk> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<Box<dyn std::error::Error + Send + Sync>> + Send + 'static,
{
    let reader = StreamReader::new(bytes.map_err(std::io::Error::other));
    let lines = FramedRead::new(
        reader,
        AnyDelimiterCodec::new_with_max_length(vec![b'\n'], Vec::new(), MAX_LINE_BYTES),
    );

    lines
        .scan(false, move |finished, item| {
            if *finished {
                return future::ready(None);
            }

            let parsed = match item {
                Ok(raw) => {
                    let line = String::from_utf8_lossy(&raw);
                    parse_line(line.trim_end_matches('\r'), kind)
                }
                Err(error) => {
                    tracing::warn!(%error, "upstream stream read failed, truncating");
                    *finished = true;
                    Vec::new()
                }
            };

            if parsed.iter().any(|chunk| chunk.done) {
                *finished = true;
            }

            future::ready(Some(parsed))
        })
        .flat_map(futures_util::stream::iter)
}
