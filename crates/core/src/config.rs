use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u64_opt(key: &str) -> Option<u64> {
    env_opt(key).and_then(|v| v.parse().ok())
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub client: ClientConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            client: ClientConfig::from_env(),
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!(
            "  server:  host={}, port={}, framing={}",
            self.server.host,
            self.server.port,
            self.server.framing
        );
        tracing::info!(
            "  client:  server_url={}, call_timeout_ms={}",
            self.client.server_url,
            self.client
                .call_timeout_ms
                .map(|ms| ms.to_string())
                .unwrap_or_else(|| "(none)".to_string())
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Response framing mode: "json" or "sse".
    pub framing: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("TRIAGE_HOST", "0.0.0.0"),
            port: env_u16("TRIAGE_PORT", 3001),
            framing: env_or("TRIAGE_FRAMING", "json"),
        }
    }
}

// ── Client ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full URL of the server's RPC endpoint.
    pub server_url: String,
    /// Per-call deadline in milliseconds. None disables the deadline.
    pub call_timeout_ms: Option<u64>,
}

impl ClientConfig {
    fn from_env() -> Self {
        Self {
            server_url: env_or("TRIAGE_SERVER_URL", "http://127.0.0.1:3001/mcp"),
            call_timeout_ms: env_u64_opt("TRIAGE_CALL_TIMEOUT_MS"),
        }
    }
}
