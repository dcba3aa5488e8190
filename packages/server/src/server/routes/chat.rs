//! Chat endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::chat::actions::{chat, history, ChatTurn};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub query: String,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub response: String,
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let outcome = chat(
        &request.query,
        request.session_id,
        request.user_id,
        request.timestamp,
        &state.deps,
    )
    .await?;

    Ok(Json(ChatResponse {
        session_id: outcome.session_id,
        response: outcome.response,
    }))
}

#[derive(Deserialize)]
pub struct HistoryParams {
    pub session_id: String,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub history: Vec<ChatTurn>,
}

pub async fn history_handler(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let turns = history(&params.session_id, &state.deps).await?;

    Ok(Json(HistoryResponse {
        session_id: params.session_id,
        history: turns,
    }))
}
