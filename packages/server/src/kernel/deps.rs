//! Explicitly constructed dependency bundle.
//!
//! Every external collaborator the request handlers touch lives behind a
//! trait object here, so tests can swap in the fakes from
//! [`testing`](super::testing).

use std::sync::Arc;

use crate::domains::auth::UserStore;
use crate::domains::chat::ChatLog;

use super::completion::CompletionProvider;
use super::knowledge::KnowledgeIndex;
use super::outbox::Outbox;

#[derive(Clone)]
pub struct ServerDeps {
    pub users: Arc<dyn UserStore>,
    pub chat_log: Arc<dyn ChatLog>,
    pub completions: Arc<dyn CompletionProvider>,
    pub knowledge: Arc<dyn KnowledgeIndex>,
    pub outbox: Outbox,
    /// Frontend base URL embedded in reset links.
    pub app_url: String,
}

impl ServerDeps {
    pub fn new(
        users: Arc<dyn UserStore>,
        chat_log: Arc<dyn ChatLog>,
        completions: Arc<dyn CompletionProvider>,
        knowledge: Arc<dyn KnowledgeIndex>,
        outbox: Outbox,
        app_url: String,
    ) -> Self {
        Self {
            users,
            chat_log,
            completions,
            knowledge,
            outbox,
            app_url,
        }
    }
}
