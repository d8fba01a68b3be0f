//! Mock upstream chat-completion server for integration tests
//!
//! Implements a minimal DeepSeek-style API that returns canned responses,
//! streaming them as SSE lines when requested

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

const DEFAULT_CONTENT: &str = "Hello from the mock upstream";

/// Mock upstream backend that returns predictable responses
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockUpstreamState>,
}

struct MockUpstreamState {
    request_count: AtomicU32,
    /// Response text, streamed in pieces when the request asks for it
    content: String,
    /// Stream the content under `delta.reasoning.output` instead of
    /// `delta.content`
    reasoning: bool,
    /// Respond with this status instead of a payload (0 = succeed)
    fail_status: u16,
}

impl MockUpstream {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(DEFAULT_CONTENT.to_owned(), false, 0).await
    }

    /// Start a mock server with custom response content
    pub async fn start_with_response(content: &str) -> anyhow::Result<Self> {
        Self::start_inner(content.to_owned(), false, 0).await
    }

    /// Start a mock server that streams content as reasoning output
    pub async fn start_reasoning(content: &str) -> anyhow::Result<Self> {
        Self::start_inner(content.to_owned(), true, 0).await
    }

    /// Start a mock server that answers every request with `status`
    pub async fn start_failing(status: u16) -> anyhow::Result<Self> {
        Self::start_inner(DEFAULT_CONTENT.to_owned(), false, status).await
    }

    async fn start_inner(content: String, reasoning: bool, fail_status: u16) -> anyhow::Result<Self> {
        let state = Arc::new(MockUpstreamState {
            request_count: AtomicU32::new(0),
            content,
            reasoning,
            fail_status,
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Full chat-completions URL for configuring the proxy
    pub fn completions_url(&self) -> String {
        format!("http://{}/v1/chat/completions", self.addr)
    }

    /// Number of requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// -- Wire types matching the upstream format --

#[derive(Debug, Deserialize)]
struct ChatCompletionRequest {
    model: String,
    #[allow(dead_code)]
    messages: Vec<serde_json::Value>,
    #[serde(default)]
    stream: Option<bool>,
}

// -- Handlers --

async fn handle_chat_completions(
    State(state): State<Arc<MockUpstreamState>>,
    Json(req): Json<ChatCompletionRequest>,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    if state.fail_status != 0 {
        let status = StatusCode::from_u16(state.fail_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (
            status,
            Json(serde_json::json!({
                "error": {
                    "message": "mock upstream intentional failure",
                    "type": "server_error"
                }
            })),
        )
            .into_response();
    }

    if req.stream.unwrap_or(false) {
        return build_streaming_response(&state, &req.model).into_response();
    }

    Json(serde_json::json!({
        "model": req.model,
        "choices": [{
            "message": { "role": "assistant", "content": state.content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 32, "total_tokens": 42 }
    }))
    .into_response()
}

/// Build an SSE streaming response body
///
/// Includes a blank keep-alive line and one deliberately broken data line
/// so the proxy's skip-and-continue behavior is always exercised.
fn build_streaming_response(state: &MockUpstreamState, model: &str) -> impl IntoResponse {
    let mut body = String::new();

    for piece in state.content.split_inclusive(' ') {
        let delta = if state.reasoning {
            serde_json::json!({ "reasoning": { "output": piece } })
        } else {
            serde_json::json!({ "content": piece })
        };
        let chunk = serde_json::json!({
            "model": model,
            "choices": [{ "delta": delta, "finish_reason": null }]
        });
        body.push_str(&format!("data: {chunk}\n\n"));
    }

    // Ignorable framing the proxy must skip
    body.push_str(": keep-alive\n\n");
    body.push_str("data: {malformed\n\n");

    // Terminal chunk with usage
    let chunk = serde_json::json!({
        "model": model,
        "choices": [{ "delta": { "content": "" }, "finish_reason": "stop" }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 32, "total_tokens": 42 }
    });
    body.push_str(&format!("data: {chunk}\n\n"));

    // Done marker
    body.push_str("data: [DONE]\n\n");

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/event-stream")],
        body,
    )
}
