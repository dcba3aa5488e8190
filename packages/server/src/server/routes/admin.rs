//! Admin CRUD over markdown content and events.
//!
//! Unauthenticated. Content bodies are indexed into the knowledge store on
//! create/update, best effort.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::domains::content::{ContentItem, Event};
use crate::server::app::AppState;
use crate::server::error::ApiError;

async fn index_content(state: &AppState, item: &ContentItem) {
    let chunk = format!("{}\n\n{}", item.title, item.body);
    if let Err(e) = state
        .deps
        .knowledge
        .upsert("content", &item.id.to_string(), &chunk)
        .await
    {
        warn!(content_id = %item.id, error = %e, "failed to index content item");
    }
}

// =============================================================================
// Content
// =============================================================================

#[derive(Deserialize)]
pub struct ContentPayload {
    pub title: String,
    pub body: String,
}

pub async fn create_content_handler(
    State(state): State<AppState>,
    Json(payload): Json<ContentPayload>,
) -> Result<(StatusCode, Json<ContentItem>), ApiError> {
    let item = ContentItem::create(&payload.title, &payload.body, &state.db_pool).await?;
    index_content(&state, &item).await;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn list_content_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentItem>>, ApiError> {
    let items = ContentItem::list(&state.db_pool).await?;
    Ok(Json(items))
}

pub async fn get_content_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentItem>, ApiError> {
    let item = ContentItem::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("Content"))?;
    Ok(Json(item))
}

pub async fn update_content_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContentPayload>,
) -> Result<Json<ContentItem>, ApiError> {
    let item = ContentItem::update(id, &payload.title, &payload.body, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("Content"))?;
    index_content(&state, &item).await;
    Ok(Json(item))
}

pub async fn delete_content_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !ContentItem::delete(id, &state.db_pool).await? {
        return Err(ApiError::NotFound("Content"));
    }
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Events
// =============================================================================

#[derive(Deserialize)]
pub struct EventPayload {
    pub title: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
}

pub async fn create_event_handler(
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let event = Event::create(
        &payload.title,
        &payload.description,
        payload.starts_at,
        payload.location.as_deref(),
        &state.db_pool,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn list_events_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = Event::list(&state.db_pool).await?;
    Ok(Json(events))
}

pub async fn get_event_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    let event = Event::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("Event"))?;
    Ok(Json(event))
}

pub async fn update_event_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EventPayload>,
) -> Result<Json<Event>, ApiError> {
    let event = Event::update(
        id,
        &payload.title,
        &payload.description,
        payload.starts_at,
        payload.location.as_deref(),
        &state.db_pool,
    )
    .await?
    .ok_or(ApiError::NotFound("Event"))?;
    Ok(Json(event))
}

pub async fn delete_event_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !Event::delete(id, &state.db_pool).await? {
        return Err(ApiError::NotFound("Event"));
    }
    Ok(StatusCode::NO_CONTENT)
}
