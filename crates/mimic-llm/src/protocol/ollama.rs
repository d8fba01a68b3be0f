//! Ollama API wire format types
//!
//! The shapes clients of a local Ollama server expect: the `/api/chat`
//! request, the newline-delimited streaming chunk, the buffered completion,
//! and the `/api/tags` model listing.

use serde::{Deserialize, Serialize};

use super::deepseek::DeepseekMessage;

/// Inbound `/api/chat` request
///
/// `model` and `messages` are optional on the wire so their absence can be
/// rejected with a structured error instead of a deserialization fault.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Requested model name
    #[serde(default)]
    pub model: Option<String>,
    /// Conversation turns
    #[serde(default)]
    pub messages: Option<Vec<ChatTurn>>,
    /// Whether to stream the response
    #[serde(default)]
    pub stream: bool,
}

/// One message in a conversation
///
/// The role stays a free string on the wire; the sequence validator rejects
/// anything outside `user`/`assistant` for models that enforce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Message author role
    pub role: String,
    /// Message text
    pub content: String,
}

/// Assistant message within a streamed chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Always "assistant"
    pub role: String,
    /// Incremental text content
    pub content: String,
    /// Always serialized, always null; Ollama clients expect the field
    pub images: Option<Vec<String>>,
}

impl ChatMessage {
    /// Build an assistant message carrying the given content
    pub fn assistant(content: String) -> Self {
        Self {
            role: "assistant".to_owned(),
            content,
            images: None,
        }
    }
}

/// One unit of streamed output
///
/// `done` is monotonic within a stream: once a chunk carries `done: true`,
/// no further chunk follows. The eval counters are present only on that
/// terminal chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChunk {
    /// Model that produced the chunk
    pub model: String,
    /// Incremental assistant message
    pub message: ChatMessage,
    /// Whether this is the terminal chunk
    pub done: bool,
    /// Total tokens consumed, terminal chunk only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
    /// Prompt tokens consumed, terminal chunk only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
}

/// Buffered (non-streaming) `/api/chat` response
///
/// The upstream message is passed through unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletion {
    /// Model that produced the response
    pub model: String,
    /// The assistant's full message
    pub message: DeepseekMessage,
    /// Always true for a buffered response
    pub done: bool,
}

// -- Model listing types --

/// `/api/tags` response
#[derive(Debug, Clone, Serialize)]
pub struct TagsResponse {
    /// One entry per exposed model
    pub models: Vec<TaggedModel>,
}

/// Model entry within the `/api/tags` listing
#[derive(Debug, Clone, Serialize)]
pub struct TaggedModel {
    /// Model name
    pub name: String,
    /// Model identifier (same as name)
    pub model: String,
    /// Last-modified timestamp
    pub modified_at: &'static str,
    /// Model size in bytes
    pub size: u64,
    /// Content digest
    pub digest: &'static str,
    /// Model lineage details
    pub details: ModelDetails,
}

/// Static lineage metadata within a model entry
#[derive(Debug, Clone, Serialize)]
pub struct ModelDetails {
    /// Base model this one derives from
    pub parent_model: &'static str,
    /// On-disk format
    pub format: &'static str,
    /// Model family
    pub family: &'static str,
    /// All families this model belongs to
    pub families: &'static [&'static str],
}
