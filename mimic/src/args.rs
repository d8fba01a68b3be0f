use std::path::PathBuf;

use clap::Parser;

/// Mimic — Ollama-compatible front for the DeepSeek API
#[derive(Debug, Parser)]
#[command(name = "mimic", about = "Ollama-compatible proxy for OpenAI-style chat APIs")]
pub struct Args {
    /// Path to configuration file; environment variables are used when
    /// the file does not exist
    #[arg(short, long, default_value = "mimic.toml", env = "MIMIC_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "MIMIC_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
