// src/services/agent.rs
use reqwest::StatusCode;
use serde_json::json;

use crate::config::Config;
use crate::error::AppError;
use crate::services::events::AgentEvent;

/// HTTP client for the hosted agent runtime's API server.
///
/// The runtime owns conversation state; this client only addresses one
/// (app, user, session) triple and ships single messages to it. No retries:
/// upstream failures surface directly as errors.
#[derive(Clone, Debug)]
pub struct AgentClient {
    http: reqwest::Client,
    base_url: String,
    app_name: String,
    user_id: String,
    session_id: String,
}

impl AgentClient {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.agent_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.agent_base_url.trim_end_matches('/').to_string(),
            app_name: config.agent_app_name.clone(),
            user_id: config.agent_user_id.clone(),
            session_id: config.agent_session_id.clone(),
        })
    }

    /// Create the runtime session this client talks to. Idempotent: the
    /// runtime answers 400 or 409 for a session that already exists,
    /// depending on version.
    pub async fn ensure_session(&self) -> Result<(), AppError> {
        let url = format!(
            "{}/apps/{}/users/{}/sessions/{}",
            self.base_url, self.app_name, self.user_id, self.session_id
        );
        let resp = self.http.post(url).json(&json!({})).send().await?;
        let status = resp.status();
        if status.is_success()
            || status == StatusCode::BAD_REQUEST
            || status == StatusCode::CONFLICT
        {
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(AppError::Agent(format!(
                "session setup returned {status}: {}",
                truncate(&body, 300)
            )))
        }
    }

    /// Send one user message and collect the turn's event list.
    pub async fn run(&self, message: &str) -> Result<Vec<AgentEvent>, AppError> {
        tracing::debug!(len = message.len(), "invoking agent runtime");
        let resp = self
            .http
            .post(format!("{}/run", self.base_url))
            .json(&json!({
                "app_name": self.app_name,
                "user_id": self.user_id,
                "session_id": self.session_id,
                "new_message": {
                    "role": "user",
                    "parts": [{ "text": message }],
                },
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Agent(format!(
                "runtime returned {status}: {}",
                truncate(&body, 300)
            )));
        }

        let events = resp.json::<Vec<AgentEvent>>().await?;
        tracing::debug!(count = events.len(), "agent runtime answered");
        Ok(events)
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
