//! In-memory fakes for the collaborator seams.
//!
//! Tests build a [`ServerDeps`] from these instead of touching Postgres,
//! SMTP or the OpenAI API.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domains::auth::{User, UserStore};
use crate::domains::chat::{ChatEntry, ChatLog};

use super::completion::CompletionProvider;
use super::deps::ServerDeps;
use super::email::{EmailSender, OutboundEmail};
use super::knowledge::{KnowledgeIndex, KnowledgeMatch};
use super::outbox::Outbox;

/// User store over a HashMap, with the same claim semantics as Postgres.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.lock().await.get(email).cloned())
    }

    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User> {
        let mut users = self.users.lock().await;
        if users.contains_key(email) {
            bail!("duplicate key value violates unique constraint \"users_email_key\"");
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            role: role.to_string(),
            otp_code: None,
            session_token: None,
            reset_token: None,
            reset_requested_at: None,
            created_at: Utc::now(),
        };
        users.insert(email.to_string(), user.clone());
        Ok(user)
    }

    async fn set_otp(&self, email: &str, code: &str) -> Result<()> {
        if let Some(user) = self.users.lock().await.get_mut(email) {
            user.otp_code = Some(code.to_string());
        }
        Ok(())
    }

    async fn claim_otp(
        &self,
        email: &str,
        code: &str,
        session_token: &str,
    ) -> Result<Option<User>> {
        let mut users = self.users.lock().await;
        match users.get_mut(email) {
            Some(user) if user.otp_code.as_deref() == Some(code) => {
                user.otp_code = None;
                user.session_token = Some(session_token.to_string());
                Ok(Some(user.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn set_reset_token(
        &self,
        email: &str,
        token: &str,
        requested_at: DateTime<Utc>,
    ) -> Result<()> {
        if let Some(user) = self.users.lock().await.get_mut(email) {
            user.reset_token = Some(token.to_string());
            user.reset_requested_at = Some(requested_at);
        }
        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token: &str,
        new_password_hash: &str,
    ) -> Result<Option<User>> {
        let mut users = self.users.lock().await;
        let holder = users
            .values_mut()
            .find(|u| u.reset_token.as_deref() == Some(token));

        match holder {
            Some(user) => {
                user.password_hash = new_password_hash.to_string();
                user.reset_token = None;
                user.reset_requested_at = None;
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }
}

/// Append-only chat log over a Vec.
#[derive(Default)]
pub struct MemoryChatLog {
    entries: Mutex<Vec<ChatEntry>>,
}

impl MemoryChatLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatLog for MemoryChatLog {
    async fn append(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        query: &str,
        response: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<ChatEntry> {
        let entry = ChatEntry {
            id: Uuid::new_v4(),
            session_id: session_id.to_string(),
            user_id: user_id.map(|s| s.to_string()),
            query: query.to_string(),
            response: response.to_string(),
            timestamp,
        };
        self.entries.lock().await.push(entry.clone());
        Ok(entry)
    }

    async fn history(&self, session_id: &str) -> Result<Vec<ChatEntry>> {
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .filter(|e| e.session_id == session_id)
            .cloned()
            .collect())
    }
}

/// Records every message instead of delivering it.
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().await.clone()
    }

    /// Poll until at least `count` messages have been recorded. Delivery runs
    /// on the outbox worker task, so tests must wait for it to drain.
    pub async fn wait_for(&self, count: usize) -> Vec<OutboundEmail> {
        for _ in 0..100 {
            {
                let sent = self.sent.lock().await;
                if sent.len() >= count {
                    return sent.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("timed out waiting for {} emails", count);
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        self.sent.lock().await.push(email.clone());
        Ok(())
    }
}

/// Fails every delivery.
pub struct FailingEmailSender;

#[async_trait]
impl EmailSender for FailingEmailSender {
    async fn send(&self, _email: &OutboundEmail) -> Result<()> {
        bail!("smtp relay unreachable")
    }
}

/// Returns a fixed reply for every query.
pub struct CannedCompletionProvider {
    reply: String,
}

impl CannedCompletionProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for CannedCompletionProvider {
    async fn complete(&self, _context: &[String], _query: &str) -> Result<String> {
        Ok(self.reply.clone())
    }
}

/// Fails every completion.
pub struct FailingCompletionProvider;

#[async_trait]
impl CompletionProvider for FailingCompletionProvider {
    async fn complete(&self, _context: &[String], _query: &str) -> Result<String> {
        bail!("completion provider unavailable")
    }
}

/// Empty index: every search misses, every upsert succeeds.
pub struct NullKnowledgeIndex;

#[async_trait]
impl KnowledgeIndex for NullKnowledgeIndex {
    async fn upsert(&self, _source_type: &str, _source_id: &str, _content: &str) -> Result<()> {
        Ok(())
    }

    async fn search(&self, _query: &str, _limit: i64) -> Result<Vec<KnowledgeMatch>> {
        Ok(Vec::new())
    }
}

/// Deps with in-memory stores, a recording sender and a canned completion.
/// Returns the sender so tests can assert on dispatched mail.
pub fn test_deps() -> (ServerDeps, Arc<RecordingEmailSender>) {
    let sender = Arc::new(RecordingEmailSender::new());
    let deps = ServerDeps::new(
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryChatLog::new()),
        Arc::new(CannedCompletionProvider::new("ok")),
        Arc::new(NullKnowledgeIndex),
        Outbox::spawn(sender.clone()),
        "http://localhost:3000".to_string(),
    );
    (deps, sender)
}

/// Deps with in-memory stores and the given completion provider.
pub fn deps_with_completions(completions: Arc<dyn CompletionProvider>) -> ServerDeps {
    let sender = Arc::new(RecordingEmailSender::new());
    ServerDeps::new(
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryChatLog::new()),
        completions,
        Arc::new(NullKnowledgeIndex),
        Outbox::spawn(sender),
        "http://localhost:3000".to_string(),
    )
}
