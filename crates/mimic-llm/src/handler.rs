//! Axum route handlers for the chat endpoint

use std::convert::Infallible;
use std::pin::Pin;

use axum::body::Body;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use http::header;
use mimic_core::HttpError;

use crate::error::ProxyError;
use crate::protocol::ollama::{ChatChunk, ChatRequest};
use crate::state::ProxyState;

/// Build the chat router
pub fn chat_router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/chat", routing::post(chat))
        .with_state(state)
}

/// Handle `POST /api/chat`
///
/// Presence checks happen here; model lookup and sequence validation
/// happen in the state so both response paths share them.
async fn chat(State(state): State<ProxyState>, Json(request): Json<ChatRequest>) -> Response {
    let Some(model) = request.model.filter(|m| !m.is_empty()) else {
        return error_response(&ProxyError::MissingField { field: "model" });
    };
    let Some(messages) = request.messages.filter(|m| !m.is_empty()) else {
        return error_response(&ProxyError::MissingField { field: "messages" });
    };

    if request.stream {
        match state.chat_stream(&model, &messages).await {
            Ok(chunks) => ndjson_response(chunks),
            Err(e) => error_response(&e),
        }
    } else {
        match state.chat(&model, &messages).await {
            Ok(completion) => Json(completion).into_response(),
            Err(e) => error_response(&e),
        }
    }
}

/// Build a streaming response of newline-delimited JSON chunks
///
/// Each chunk is serialized and written as it arrives; the body stream is
/// pull-based, so a slow reader pauses the upstream instead of buffering
/// it. Dropping the response (caller disconnect) drops the upstream
/// connection with it.
fn ndjson_response(chunks: Pin<Box<dyn Stream<Item = ChatChunk> + Send>>) -> Response {
    let body = chunks.map(|chunk| {
        let mut line = serde_json::to_string(&chunk).unwrap_or_default();
        line.push('\n');
        Ok::<_, Infallible>(Bytes::from(line))
    });

    (
        [(header::CONTENT_TYPE, "application/json")],
        Body::from_stream(body),
    )
        .into_response()
}

/// Convert a proxy error to a JSON error response
fn error_response(error: &ProxyError) -> Response {
    let body = serde_json::json!({
        "error": error.client_message(),
        "code": error.error_code(),
    });

    (error.status_code(), Json(body)).into_response()
}
