//! Server configuration parsed from CLI flags and environment variables.
//!
//! Uses clap derive macros; every option can also be set via a
//! `SYNTHIK_*` environment variable.

use clap::Parser;

/// Streaming chat backend for the synthik web app.
#[derive(Debug, Parser)]
#[command(name = "synthik", version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1", env = "SYNTHIK_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8080, env = "SYNTHIK_PORT")]
    pub port: u16,

    /// SQLite database URL; defaults to `synthik.db` under the data directory.
    #[arg(long, env = "SYNTHIK_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Base URL of the OpenAI-compatible completion endpoint.
    #[arg(
        long,
        default_value = "http://localhost:11434/v1",
        env = "SYNTHIK_MODEL_BASE_URL"
    )]
    pub model_base_url: String,

    /// API key for the completion endpoint (ignored by Ollama).
    #[arg(long, default_value = "ollama", env = "SYNTHIK_MODEL_API_KEY")]
    pub model_api_key: String,

    /// Model requested for every chat turn.
    #[arg(long, default_value = "llama3.1:8b", env = "SYNTHIK_MODEL")]
    pub model: String,

    /// Verification endpoint of the identity service.
    #[arg(long, env = "SYNTHIK_IDENTITY_URL")]
    pub identity_url: String,

    /// Directory with the built web frontend; SPA serving is skipped when unset.
    #[arg(long, env = "SYNTHIK_WEB_DIR")]
    pub web_dir: Option<String>,

    /// Suppress all output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
