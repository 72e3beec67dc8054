// src/state.rs
use std::sync::Arc;

use crate::services::agent::AgentClient;
use crate::services::gem_cache::GemCache;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub agent: AgentClient,
    pub gems: GemCache,
    /// Cache key used when a request carries no session id.
    pub default_session: String,
}

impl AppState {
    pub fn new(agent: AgentClient, default_session: impl Into<String>) -> Self {
        Self {
            agent,
            gems: GemCache::new(),
            default_session: default_session.into(),
        }
    }
}
