use axum::Json;
use axum::extract::State;
use mimic_llm::ProxyState;

/// Health check handler
///
/// Uptime comes from the instant captured when the state was built, not
/// from any process-global.
pub async fn health_handler(State(state): State<ProxyState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "models": state.model_names(),
        "uptime": state.uptime().as_secs(),
    }))
}
