//! DeepSeek chat-completion API wire format types
//!
//! The upstream speaks the OpenAI-compatible shape. Everything inbound is
//! decoded defensively: optionals default instead of faulting, unknown
//! fields are ignored.

use serde::{Deserialize, Serialize};

use super::ollama::ChatTurn;

// -- Request types --

/// Outbound chat-completion request
#[derive(Debug, Serialize)]
pub struct DeepseekRequest<'a> {
    /// Model identifier, forwarded unchanged
    pub model: &'a str,
    /// Conversation turns, forwarded unchanged
    pub messages: &'a [ChatTurn],
    /// Whether the upstream should stream the response
    pub stream: bool,
}

// -- Response types --

/// Buffered (non-streaming) chat-completion response
#[derive(Debug, Clone, Deserialize)]
pub struct DeepseekResponse {
    /// Model that produced the response
    pub model: String,
    /// Generated choices; only the first is used
    #[serde(default)]
    pub choices: Vec<DeepseekChoice>,
}

/// Choice within a buffered response
#[derive(Debug, Clone, Deserialize)]
pub struct DeepseekChoice {
    /// The assistant's message
    pub message: DeepseekMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant message within a response choice
///
/// Serializable because the non-streaming translator passes it through to
/// the caller unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepseekMessage {
    /// Role (always "assistant")
    pub role: String,
    /// Text content
    #[serde(default)]
    pub content: Option<String>,
    /// Intermediate reasoning text (reasoner models only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
}

// -- Streaming types --

/// One decoded chunk from the upstream event stream
#[derive(Debug, Clone, Deserialize)]
pub struct DeepseekStreamChunk {
    /// Model that produced the chunk
    pub model: String,
    /// Delta choices; only the first is used
    #[serde(default)]
    pub choices: Vec<DeepseekStreamChoice>,
    /// Token usage, present on the terminal chunk
    #[serde(default)]
    pub usage: Option<DeepseekUsage>,
}

/// Choice within a streaming chunk
#[derive(Debug, Clone, Deserialize)]
pub struct DeepseekStreamChoice {
    /// Incremental delta
    #[serde(default)]
    pub delta: DeepseekDelta,
    /// Finish reason, present on the terminal chunk
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Delta content within a streaming choice
///
/// Reasoner models stream "thinking" text under `reasoning.output` while
/// `content` stays empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeepseekDelta {
    /// Incremental text content
    #[serde(default)]
    pub content: Option<String>,
    /// Incremental reasoning output
    #[serde(default)]
    pub reasoning: Option<DeepseekReasoning>,
}

/// Reasoning sub-object within a streaming delta
#[derive(Debug, Clone, Deserialize)]
pub struct DeepseekReasoning {
    /// Incremental reasoning text
    #[serde(default)]
    pub output: Option<String>,
}

/// Token usage on the terminal chunk
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeepseekUsage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Completion tokens
    #[serde(default)]
    pub completion_tokens: u64,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u64,
}
