// src/services/gem_cache.rs
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::message::Gem;

/// At most this many gems are kept per session.
pub const MAX_GEMS: usize = 3;

/// Per-session store of the last discovered gem set.
///
/// Each discovery round replaces a session's entry wholesale; retrieval is by
/// 1-based index. No expiry and no eviction: entries live as long as the
/// process, which is fine for the handful of sessions this serves.
#[derive(Clone, Debug, Default)]
pub struct GemCache {
    inner: Arc<RwLock<HashMap<String, Vec<Gem>>>>,
}

impl GemCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session's gem set. Truncated to [`MAX_GEMS`]. Returns the
    /// number of gems stored.
    pub async fn store(&self, session_id: &str, mut gems: Vec<Gem>) -> usize {
        gems.truncate(MAX_GEMS);
        let len = gems.len();
        let mut guard = self.inner.write().await;
        guard.insert(session_id.to_string(), gems);
        len
    }

    /// Fetch the gem at a 1-based index, or `None` when the session has no
    /// cached set or the index is out of range.
    pub async fn get(&self, session_id: &str, index: usize) -> Option<Gem> {
        if index == 0 {
            return None;
        }
        let guard = self.inner.read().await;
        guard.get(session_id)?.get(index - 1).cloned()
    }

    /// Drop a session's cached set, e.g. when the user starts a new search.
    pub async fn clear(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Number of gems cached for a session.
    pub async fn len(&self, session_id: &str) -> usize {
        let guard = self.inner.read().await;
        guard.get(session_id).map_or(0, Vec::len)
    }

    /// Whether a session has no cached gems.
    pub async fn is_empty(&self, session_id: &str) -> bool {
        self.len(session_id).await == 0
    }
}

/// A message is a selection iff, after trimming, it is exactly "1", "2" or
/// "3". Anything else (including "12" or "one") is ordinary chat.
pub fn parse_selection(message: &str) -> Option<usize> {
    match message.trim() {
        "1" => Some(1),
        "2" => Some(2),
        "3" => Some(3),
        _ => None,
    }
}
