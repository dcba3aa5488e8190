//! Email delivery seam.

use anyhow::Result;
use async_trait::async_trait;
use mailer::Mailer;
use tracing::info;

/// A subject/body message addressed to a single recipient.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivers a subject/body to an address. Fire-and-forget from the caller's
/// perspective; dispatch goes through the [`Outbox`](super::Outbox).
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}

/// SMTP-backed sender.
pub struct SmtpEmailSender {
    mailer: Mailer,
}

impl SmtpEmailSender {
    pub fn new(mailer: Mailer) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        self.mailer
            .send(&email.to, &email.subject, &email.body)
            .await?;
        Ok(())
    }
}

/// Sender used when SMTP is not configured: logs the message and succeeds.
pub struct LogOnlyEmailSender;

#[async_trait]
impl EmailSender for LogOnlyEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.body,
            "SMTP not configured, logging email instead of sending"
        );
        Ok(())
    }
}
