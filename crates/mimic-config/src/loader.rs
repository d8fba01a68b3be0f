use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Build configuration from plain environment variables
    ///
    /// Used when no config file is present. Reads `OLLAMA_ADDRESS`
    /// (default `0.0.0.0`), `OLLAMA_PORT` (default `11434`), `API_URL`
    /// and `API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable fails to parse or validation fails
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        let address: IpAddr = match std::env::var("OLLAMA_ADDRESS") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid OLLAMA_ADDRESS `{raw}`: {e}"))?,
            Err(_) => IpAddr::from([0, 0, 0, 0]),
        };
        let port: u16 = match std::env::var("OLLAMA_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid OLLAMA_PORT `{raw}`: {e}"))?,
            Err(_) => 11434,
        };
        config.server.listen_address = Some(SocketAddr::new(address, port));

        if let Ok(raw) = std::env::var("API_URL") {
            config.upstream.url = raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid API_URL `{raw}`: {e}"))?;
        }

        if let Ok(key) = std::env::var("API_KEY") {
            config.upstream.api_key = Some(SecretString::from(key));
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is complete enough to start
    ///
    /// The process must fail fast on a missing credential rather than
    /// discover it on the first proxied request.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream credential is absent or the model
    /// table is empty
    pub fn validate(&self) -> anyhow::Result<()> {
        match &self.upstream.api_key {
            Some(key) if !key.expose_secret().is_empty() => {}
            _ => anyhow::bail!(
                "upstream credential is not configured; set upstream.api_key or the API_KEY environment variable"
            ),
        }

        if self.models.is_empty() {
            anyhow::bail!("at least one model must be configured");
        }

        Ok(())
    }
}
