use axum::{Json, extract::State};
use chrono::Utc;

use crate::{
    error::AppError,
    message::{
        ChatRequest, ChatResponse, Gem, ResetRequest, ResetResponse, SelectRequest, SelectResponse,
    },
    services::{events, gem_cache, ranking},
    state::SharedState,
};

/// One conversational turn: forward the message to the agent runtime, pick
/// the reply text out of its events, and attach photos when appropriate.
///
/// Selection messages ("1", "2", "3") attach the matching cached gem; any
/// other message may carry a fresh discovery result, which replaces the
/// session's cached set wholesale. A missing or out-of-range selection just
/// means no gallery, never an error.
pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let trimmed = payload.message.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let session_id = session_key(&state, payload.session_id.as_deref());
    tracing::debug!(
        %session_id,
        history_len = payload.history.len(),
        "chat turn received"
    );

    let selection = gem_cache::parse_selection(trimmed);
    let events = state.agent.run(trimmed).await?;
    let response = events::extract_reply(&events);

    let photos = match selection {
        Some(index) => {
            // The runtime still answers the selection (weather, advice); the
            // gallery comes from the cache.
            let gem = state.gems.get(&session_id, index).await;
            if gem.is_none() {
                tracing::info!(%session_id, index, "selection had no cached gem");
            }
            gem.map(|g| vec![g])
        }
        None => match events::extract_gems(&events) {
            Some(gems) => {
                let ranked = ranking::rank_gems(gems);
                let stored = state.gems.store(&session_id, ranked.clone()).await;
                tracing::info!(%session_id, count = stored, "cached new gem set");
                non_empty(ranked)
            }
            None => None,
        },
    };

    Ok(Json(ChatResponse {
        response,
        timestamp: Utc::now(),
        photos,
    }))
}

/// Forward a gem selection to the runtime and relay its advice. The advice
/// comes back as JSON when the runtime produced some, raw text otherwise.
pub async fn select_handler(
    State(state): State<SharedState>,
    Json(payload): Json<SelectRequest>,
) -> Result<Json<SelectResponse>, AppError> {
    let selection = payload.selection.trim();
    if selection.is_empty() {
        return Err(AppError::BadRequest(
            "Selection cannot be empty".to_string(),
        ));
    }

    let events = state.agent.run(&format!("I choose {selection}")).await?;
    let advice = events::parse_advice(&events::extract_reply(&events));

    Ok(Json(SelectResponse {
        advice,
        selection: selection.to_string(),
    }))
}

/// Start a fresh search: drop the session's cached gem set so stale
/// selections stop resolving to the previous round's gallery.
pub async fn reset_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ResetRequest>,
) -> Json<ResetResponse> {
    let session_id = session_key(&state, payload.session_id.as_deref());
    let cleared = state.gems.clear(&session_id).await;
    tracing::info!(%session_id, cleared, "gallery reset");
    Json(ResetResponse { cleared })
}

fn session_key(state: &SharedState, requested: Option<&str>) -> String {
    match requested {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => state.default_session.clone(),
    }
}

fn non_empty(gems: Vec<Gem>) -> Option<Vec<Gem>> {
    if gems.is_empty() { None } else { Some(gems) }
}
