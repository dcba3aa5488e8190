//! Thin SMTP delivery client.
//!
//! Wraps lettre's async transport behind a small options/service pair so the
//! server never touches SMTP details directly.

use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

#[derive(Debug, Clone)]
pub struct MailerOptions {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    /// Address used in the From header, e.g. "no-reply@example.com".
    pub sender: String,
}

/// SMTP mail service. Cheap to clone; the underlying transport pools
/// connections.
#[derive(Clone)]
pub struct Mailer {
    options: MailerOptions,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl Mailer {
    pub fn new(options: MailerOptions) -> Result<Self, MailerError> {
        let creds = Credentials::new(options.username.clone(), options.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&options.smtp_host)?
            .port(options.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self { options, transport })
    }

    /// Send a plain-text message.
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError> {
        let message = Message::builder()
            .from(self.options.sender.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(message).await?;
        Ok(())
    }

    pub fn sender(&self) -> &str {
        &self.options.sender
    }
}
