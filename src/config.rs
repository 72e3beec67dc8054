// src/config.rs
use std::env;
use std::time::Duration;

/// Runtime configuration, read from the environment once at startup.
/// `.env` is loaded by main before this runs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Base URL of the hosted agent runtime's API server. Overridable so
    /// tests can point at a mock server.
    pub agent_base_url: String,
    /// App name registered with the runtime.
    pub agent_app_name: String,
    pub agent_user_id: String,
    /// The reference deployment runs a single global runtime session.
    pub agent_session_id: String,
    /// Upper bound on one agent invocation.
    pub agent_timeout: Duration,
    /// Allowed CORS origins; empty means permissive.
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:8000"),
            agent_base_url: env_or("AGENT_BASE_URL", "http://localhost:8080"),
            agent_app_name: env_or("AGENT_APP_NAME", "gem_concierge"),
            agent_user_id: env_or("AGENT_USER_ID", "web_user"),
            agent_session_id: env_or("AGENT_SESSION_ID", "default"),
            agent_timeout: Duration::from_secs(
                env::var("AGENT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(120),
            ),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
