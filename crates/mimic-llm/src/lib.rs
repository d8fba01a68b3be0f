//! Core translation crate for Mimic
//!
//! Translates between the Ollama HTTP surface exposed to clients and the
//! DeepSeek (OpenAI-style) chat-completion API upstream: request bodies on
//! the way out, buffered responses and SSE streams on the way back.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod handler;
pub mod parse;
pub mod protocol;
pub mod registry;
pub mod state;
pub mod upstream;
pub mod validate;

pub use error::ProxyError;
pub use handler::chat_router;
pub use registry::{ModelKind, ModelRegistry, ModelTarget};
pub use state::ProxyState;
pub use validate::{ValidationError, validate_turns};
