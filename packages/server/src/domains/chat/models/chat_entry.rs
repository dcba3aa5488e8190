use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// ChatEntry - one query/response exchange, append-only
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatEntry {
    pub id: Uuid,
    pub session_id: String,
    pub user_id: Option<String>,
    pub query: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl ChatEntry {
    /// Append an exchange to the log
    pub async fn create(
        session_id: &str,
        user_id: Option<&str>,
        query: &str,
        response: &str,
        timestamp: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self> {
        let entry = sqlx::query_as::<_, ChatEntry>(
            r#"
            INSERT INTO chat_entries (session_id, user_id, query, response, timestamp)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(session_id)
        .bind(user_id)
        .bind(query)
        .bind(response)
        .bind(timestamp)
        .fetch_one(pool)
        .await?;
        Ok(entry)
    }

    /// All exchanges for a session, oldest first
    pub async fn find_by_session(session_id: &str, pool: &PgPool) -> Result<Vec<Self>> {
        let entries = sqlx::query_as::<_, ChatEntry>(
            "SELECT * FROM chat_entries WHERE session_id = $1 ORDER BY timestamp, id",
        )
        .bind(session_id)
        .fetch_all(pool)
        .await?;
        Ok(entries)
    }
}
