//! Vector index over embedded text, used for retrieval-augmented chat.

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::OpenAIClient;
use pgvector::Vector;
use sqlx::PgPool;

const EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// A retrieved snippet with its source tag and cosine similarity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct KnowledgeMatch {
    pub source_type: String,
    pub source_id: String,
    pub content: String,
    pub similarity: f64,
}

/// Similarity index keyed by `{source_type, source_id}`.
#[async_trait]
pub trait KnowledgeIndex: Send + Sync {
    /// Embed `content` and insert or replace the chunk for this source.
    async fn upsert(&self, source_type: &str, source_id: &str, content: &str) -> Result<()>;

    /// Return up to `limit` chunks most similar to `query`, best first.
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<KnowledgeMatch>>;
}

/// pgvector-backed index; embeddings come from OpenAI.
pub struct PgVectorKnowledgeIndex {
    pool: PgPool,
    client: OpenAIClient,
}

impl PgVectorKnowledgeIndex {
    pub fn new(pool: PgPool, client: OpenAIClient) -> Self {
        Self { pool, client }
    }

    async fn embed(&self, text: &str) -> Result<Vector> {
        let embedding = self
            .client
            .create_embedding(text, EMBEDDING_MODEL)
            .await
            .context("failed to generate embedding")?;
        Ok(Vector::from(embedding))
    }
}

#[async_trait]
impl KnowledgeIndex for PgVectorKnowledgeIndex {
    async fn upsert(&self, source_type: &str, source_id: &str, content: &str) -> Result<()> {
        let embedding = self.embed(content).await?;

        sqlx::query(
            r#"
            INSERT INTO knowledge_chunks (source_type, source_id, content, embedding)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (source_type, source_id)
            DO UPDATE SET content = $3, embedding = $4, updated_at = NOW()
            "#,
        )
        .bind(source_type)
        .bind(source_id)
        .bind(content)
        .bind(embedding)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn search(&self, query: &str, limit: i64) -> Result<Vec<KnowledgeMatch>> {
        let embedding = self.embed(query).await?;

        let matches = sqlx::query_as::<_, KnowledgeMatch>(
            r#"
            SELECT
                source_type,
                source_id,
                content,
                (1 - (embedding <=> $1))::float8 AS similarity
            FROM knowledge_chunks
            WHERE embedding IS NOT NULL
            ORDER BY embedding <=> $1
            LIMIT $2
            "#,
        )
        .bind(embedding)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(matches)
    }
}
