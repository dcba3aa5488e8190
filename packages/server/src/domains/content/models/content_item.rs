use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// ContentItem - admin-managed markdown content
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContentItem {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl ContentItem {
    pub async fn create(title: &str, body: &str, pool: &PgPool) -> Result<Self> {
        let item = sqlx::query_as::<_, ContentItem>(
            r#"
            INSERT INTO content_items (title, body)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(body)
        .fetch_one(pool)
        .await?;
        Ok(item)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let items = sqlx::query_as::<_, ContentItem>(
            "SELECT * FROM content_items ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(items)
    }

    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        let item = sqlx::query_as::<_, ContentItem>("SELECT * FROM content_items WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(item)
    }

    /// Update title and body. `None` when the id is unknown.
    pub async fn update(id: Uuid, title: &str, body: &str, pool: &PgPool) -> Result<Option<Self>> {
        let item = sqlx::query_as::<_, ContentItem>(
            r#"
            UPDATE content_items
            SET title = $2, body = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(body)
        .fetch_optional(pool)
        .await?;
        Ok(item)
    }

    /// Delete by id. `false` when the id is unknown.
    pub async fn delete(id: Uuid, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM content_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
