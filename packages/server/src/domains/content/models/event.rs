use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Event - admin-managed event listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Event {
    pub async fn create(
        title: &str,
        description: &str,
        starts_at: DateTime<Utc>,
        location: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, starts_at, location)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(starts_at)
        .bind(location)
        .fetch_one(pool)
        .await?;
        Ok(event)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY starts_at")
            .fetch_all(pool)
            .await?;
        Ok(events)
    }

    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(event)
    }

    /// Update all mutable fields. `None` when the id is unknown.
    pub async fn update(
        id: Uuid,
        title: &str,
        description: &str,
        starts_at: DateTime<Utc>,
        location: Option<&str>,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = $2, description = $3, starts_at = $4, location = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(starts_at)
        .bind(location)
        .fetch_optional(pool)
        .await?;
        Ok(event)
    }

    /// Delete by id. `false` when the id is unknown.
    pub async fn delete(id: Uuid, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
