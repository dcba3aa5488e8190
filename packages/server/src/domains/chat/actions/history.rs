//! Chat history replay.

use anyhow::Result;
use serde::Serialize;

use crate::kernel::ServerDeps;

/// One side of an exchange, in the shape the frontend renders.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub sender: String,
    pub text: String,
}

/// Replay a session as alternating user/bot turns, oldest first.
pub async fn history(session_id: &str, deps: &ServerDeps) -> Result<Vec<ChatTurn>> {
    let entries = deps.chat_log.history(session_id).await?;

    let mut turns = Vec::with_capacity(entries.len() * 2);
    for entry in entries {
        turns.push(ChatTurn {
            sender: "user".to_string(),
            text: entry.query,
        });
        turns.push(ChatTurn {
            sender: "bot".to_string(),
            text: entry.response,
        });
    }
    Ok(turns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::testing::{deps_with_completions, CannedCompletionProvider};
    use chrono::Utc;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_history_alternates_user_and_bot() {
        let deps = deps_with_completions(Arc::new(CannedCompletionProvider::new("unused")));

        deps.chat_log
            .append("sess", None, "first q", "first a", Utc::now())
            .await
            .unwrap();
        deps.chat_log
            .append("sess", None, "second q", "second a", Utc::now())
            .await
            .unwrap();

        let turns = history("sess", &deps).await.unwrap();

        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].sender, "user");
        assert_eq!(turns[0].text, "first q");
        assert_eq!(turns[1].sender, "bot");
        assert_eq!(turns[1].text, "first a");
        assert_eq!(turns[2].text, "second q");
        assert_eq!(turns[3].text, "second a");
    }

    #[tokio::test]
    async fn test_unknown_session_is_empty() {
        let deps = deps_with_completions(Arc::new(CannedCompletionProvider::new("unused")));
        let turns = history("nope", &deps).await.unwrap();
        assert!(turns.is_empty());
    }
}
