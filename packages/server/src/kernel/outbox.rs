//! Background email dispatch.
//!
//! Callers enqueue and return immediately; a spawned worker drains the queue
//! and performs delivery. Failures are logged and dropped - they are never
//! surfaced to the caller and never retried.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error};

use super::email::{EmailSender, OutboundEmail};

/// Handle for enqueueing outbound email.
#[derive(Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<OutboundEmail>,
}

impl Outbox {
    /// Spawn the delivery worker and return the enqueue handle.
    pub fn spawn(sender: Arc<dyn EmailSender>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<OutboundEmail>();

        tokio::spawn(async move {
            while let Some(email) = rx.recv().await {
                match sender.send(&email).await {
                    Ok(()) => {
                        debug!(to = %email.to, subject = %email.subject, "email delivered");
                    }
                    Err(e) => {
                        error!(
                            to = %email.to,
                            subject = %email.subject,
                            error = %e,
                            "email delivery failed"
                        );
                    }
                }
            }
        });

        Self { tx }
    }

    /// Queue a message for delivery. Never blocks and never fails the
    /// caller; a closed channel is logged.
    pub fn enqueue(&self, email: OutboundEmail) {
        if self.tx.send(email).is_err() {
            error!("outbox worker is gone, dropping email");
        }
    }
}
