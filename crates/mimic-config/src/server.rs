use std::net::SocketAddr;

use serde::Deserialize;

/// HTTP listener configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind, e.g. `0.0.0.0:11434`
    pub listen_address: Option<SocketAddr>,
}
