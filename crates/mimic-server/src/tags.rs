use axum::Json;
use axum::extract::State;
use mimic_llm::ProxyState;
use mimic_llm::protocol::ollama::{ModelDetails, TaggedModel, TagsResponse};

// Static metadata reported for every model; clients only inspect the
// names, the rest keeps the listing shape well-formed.
const MODIFIED_AT: &str = "2024-03-15T10:00:00Z";
const SIZE_BYTES: u64 = 12_000_000_000;
const DIGEST: &str = "abcde12345fghij67890klmno1234567890abcdef";
const DETAILS: ModelDetails = ModelDetails {
    parent_model: "deepseek-base",
    format: "gguf",
    family: "deepseek",
    families: &["deepseek"],
};

/// Handle `GET /api/tags`, one entry per exposed model
pub async fn tags_handler(State(state): State<ProxyState>) -> Json<TagsResponse> {
    let models = state
        .model_names()
        .into_iter()
        .map(|name| TaggedModel {
            model: name.clone(),
            name,
            modified_at: MODIFIED_AT,
            size: SIZE_BYTES,
            digest: DIGEST,
            details: DETAILS.clone(),
        })
        .collect();

    Json(TagsResponse { models })
}
