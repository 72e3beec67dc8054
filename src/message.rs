// src/message.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One prior turn replayed by the browser. The hosted runtime keeps its own
/// conversation state, so history is accepted but not forwarded.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<Gem>>,
}

#[derive(Deserialize)]
pub struct SelectRequest {
    pub selection: String,
}

#[derive(Serialize)]
pub struct SelectResponse {
    /// JSON object when the runtime returned parseable JSON, plain string
    /// otherwise. The frontend handles both.
    pub advice: serde_json::Value,
    pub selection: String,
}

#[derive(Deserialize)]
pub struct ResetRequest {
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct ResetResponse {
    /// Whether a cached gem set existed and was dropped.
    pub cleared: bool,
}

/// A recommended place with photos and review metadata, as produced by the
/// runtime's analysis tool. Aliases cover the key spellings the runtime has
/// been observed to emit.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Gem {
    #[serde(alias = "placeName")]
    pub name: String,
    #[serde(default, alias = "photos")]
    pub photo_urls: Vec<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, alias = "reviewCount", alias = "reviews")]
    pub review_count: u64,
}
