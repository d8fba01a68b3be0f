//! Server assembly for the Mimic proxy
//!
//! Wires the chat router together with the Ollama compatibility endpoints
//! (root banner, health, model tags) and runs the listener.

mod health;
mod tags;

use std::net::SocketAddr;

use axum::{Json, Router, routing};
use mimic_config::Config;
use mimic_llm::ProxyState;
use tower_http::trace::TraceLayer;

/// Default bind address, matching the port Ollama clients expect
const DEFAULT_LISTEN: ([u8; 4], u16) = ([0, 0, 0, 0], 11434);

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if proxy state construction fails (absent
    /// credential)
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_LISTEN));

        let state = ProxyState::from_config(config)?;

        let app = Router::new()
            .route("/", routing::get(root))
            .route("/health", routing::get(health::health_handler))
            .route("/api/tags", routing::get(tags::tags_handler))
            .with_state(state.clone())
            .merge(mimic_llm::chat_router(state))
            .layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

/// Handle `GET /`, the banner Ollama clients probe for
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Ollama is running" }))
}
