//! Line-by-line translation of the upstream event stream
//!
//! Each raw line from the upstream connection becomes zero or more Ollama
//! chat chunks. Malformed lines are logged and skipped; they never abort
//! the stream.

use crate::protocol::deepseek::DeepseekStreamChunk;
use crate::protocol::ollama::{ChatChunk, ChatMessage};
use crate::registry::ModelKind;

/// Stream terminator sentinel; carries no payload and is ignored —
/// completion is signaled by `finish_reason`, not by this marker
const DONE_MARKER: &str = "data: [DONE]";

/// Prefix of payload-carrying event lines
const DATA_PREFIX: &str = "data: ";

/// Translate one upstream stream line into Ollama chat chunks
///
/// Returns an empty vec for lines that carry nothing to forward: the
/// terminator sentinel, keep-alive blanks, comment framing, undecodable
/// JSON, and chunks without choices. The vec form leaves room to split one
/// line into several chunks; today every payload line yields exactly one.
pub fn parse_line(line: &str, kind: ModelKind) -> Vec<ChatChunk> {
    if line == DONE_MARKER {
        return Vec::new();
    }

    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return Vec::new();
    };

    let chunk: DeepseekStreamChunk = match serde_json::from_str(payload) {
        Ok(chunk) => chunk,
        Err(error) => {
            tracing::debug!(%error, line, "skipping undecodable stream line");
            return Vec::new();
        }
    };

    let Some(choice) = chunk.choices.first() else {
        return Vec::new();
    };

    let mut content = choice.delta.content.clone().unwrap_or_default();
    if content.is_empty() && kind == ModelKind::Reasoner {
        // Reasoner models stream thinking text under a separate key
        if let Some(output) = choice.delta.reasoning.as_ref().and_then(|r| r.output.clone()) {
            content = output;
        }
    }

    let done = choice.finish_reason.as_deref() == Some("stop");

    let mut out = ChatChunk {
        model: chunk.model,
        message: ChatMessage::assistant(content),
        done,
        eval_count: None,
        prompt_eval_count: None,
    };

    if done {
        let usage = chunk.usage.unwrap_or_default();
        out.eval_count = Some(usage.total_tokens);
        out.prompt_eval_count = Some(usage.prompt_tokens);
    }

    vec![out]
}
