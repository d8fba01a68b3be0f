//! Wire-format types for both sides of the proxy

pub mod deepseek;
pub mod ollama;
