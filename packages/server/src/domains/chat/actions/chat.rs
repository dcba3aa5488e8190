//! Chat action: retrieve context, complete, log the exchange.

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::kernel::ServerDeps;

/// How many retrieved snippets are fed to the completion as context.
const CONTEXT_LIMIT: i64 = 4;

pub struct ChatOutcome {
    pub session_id: String,
    pub response: String,
}

/// Handle one chat query.
///
/// Mints a session id when none is supplied, pulls similar prior snippets
/// from the knowledge index, asks the completion provider, and appends the
/// exchange to the log. A completion failure is the caller's error; a
/// retrieval or indexing failure is logged and the chat proceeds without it.
pub async fn chat(
    query: &str,
    session_id: Option<String>,
    user_id: Option<String>,
    timestamp: Option<DateTime<Utc>>,
    deps: &ServerDeps,
) -> Result<ChatOutcome> {
    let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let timestamp = timestamp.unwrap_or_else(Utc::now);

    let context = match deps.knowledge.search(query, CONTEXT_LIMIT).await {
        Ok(matches) => matches.into_iter().map(|m| m.content).collect(),
        Err(e) => {
            warn!(error = %e, "context retrieval failed, continuing without context");
            Vec::new()
        }
    };

    let response = deps.completions.complete(&context, query).await?;

    let entry = deps
        .chat_log
        .append(&session_id, user_id.as_deref(), query, &response, timestamp)
        .await?;

    // Index the exchange so later queries can retrieve it. Best effort.
    let chunk = format!("Q: {}\nA: {}", query, response);
    if let Err(e) = deps
        .knowledge
        .upsert("chat", &entry.id.to_string(), &chunk)
        .await
    {
        warn!(entry_id = %entry.id, error = %e, "failed to index chat exchange");
    }

    info!(session_id = %session_id, "chat exchange recorded");

    Ok(ChatOutcome {
        session_id,
        response,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::testing::{deps_with_completions, CannedCompletionProvider};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_chat_mints_session_id_when_absent() {
        let deps = deps_with_completions(Arc::new(CannedCompletionProvider::new("hi there")));

        let outcome = chat("hello", None, None, None, &deps).await.unwrap();

        assert!(!outcome.session_id.is_empty());
        assert_eq!(outcome.response, "hi there");
    }

    #[tokio::test]
    async fn test_chat_preserves_supplied_session_id() {
        let deps = deps_with_completions(Arc::new(CannedCompletionProvider::new("ok")));

        let outcome = chat("hello", Some("sess-1".to_string()), None, None, &deps)
            .await
            .unwrap();

        assert_eq!(outcome.session_id, "sess-1");
    }

    #[tokio::test]
    async fn test_chat_appends_to_log() {
        let deps = deps_with_completions(Arc::new(CannedCompletionProvider::new("answer")));

        chat(
            "question",
            Some("sess-2".to_string()),
            Some("user-9".to_string()),
            None,
            &deps,
        )
        .await
        .unwrap();

        let entries = deps.chat_log.history("sess-2").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].query, "question");
        assert_eq!(entries[0].response, "answer");
        assert_eq!(entries[0].user_id.as_deref(), Some("user-9"));
    }

    #[tokio::test]
    async fn test_completion_failure_bubbles_up() {
        use crate::kernel::testing::FailingCompletionProvider;
        let deps = deps_with_completions(Arc::new(FailingCompletionProvider));

        let result = chat("hello", None, None, None, &deps).await;
        assert!(result.is_err());
    }
}
