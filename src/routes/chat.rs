use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, HistoryResponse},
    services::metrics_manager::MetricsData,
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = match &payload.session_id {
        Some(s) if !s.trim().is_empty() => {
            let id = parse_session_id(s)?;
            state.sessions.ensure_session(&id).await
        }
        _ => state.sessions.create_session().await,
    };

    // Blank text or a request already in flight: drop it without an answer.
    let Some(prompt) = state.sessions.begin_exchange(&session_id, &payload.message).await else {
        tracing::debug!(session_id = %session_id, "submission dropped");
        state.metrics.record_dropped().await;
        return Ok(Json(ChatResponse { session_id, reply: None }));
    };

    let reply = state.gateway.answer(&prompt).await;
    state.metrics.record_reply(reply.outcome).await;

    if !state.sessions.settle_exchange(&session_id, reply.text.clone()).await {
        tracing::warn!(session_id = %session_id, "session removed before the reply arrived");
    }
    tracing::info!(session_id = %session_id, outcome = reply.outcome.as_str(), "chat exchange settled");

    Ok(Json(ChatResponse { session_id, reply: Some(reply.text) }))
}

pub async fn history_handler(
    State(state): State<SharedState>,
    Path(raw_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let session_id = parse_session_id(&raw_id)?;
    let view = state
        .sessions
        .view(&session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("unknown session {session_id}")))?;

    Ok(Json(HistoryResponse {
        session_id,
        pending: view.pending,
        messages: view.messages,
    }))
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}

fn parse_session_id(raw: &str) -> Result<String, AppError> {
    Uuid::parse_str(raw.trim())
        .map(|id| id.to_string())
        .map_err(|_| AppError::BadRequest(format!("invalid session id {raw:?}")))
}
