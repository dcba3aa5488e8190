//! Chat log seam.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::models::ChatEntry;

#[async_trait]
pub trait ChatLog: Send + Sync {
    /// Append an exchange; entries are never mutated or deleted.
    async fn append(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        query: &str,
        response: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<ChatEntry>;

    /// All exchanges for a session, oldest first.
    async fn history(&self, session_id: &str) -> Result<Vec<ChatEntry>>;
}

/// PostgreSQL-backed chat log.
pub struct PostgresChatLog {
    pool: PgPool,
}

impl PostgresChatLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatLog for PostgresChatLog {
    async fn append(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        query: &str,
        response: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<ChatEntry> {
        ChatEntry::create(session_id, user_id, query, response, timestamp, &self.pool).await
    }

    async fn history(&self, session_id: &str) -> Result<Vec<ChatEntry>> {
        ChatEntry::find_by_session(session_id, &self.pool).await
    }
}
