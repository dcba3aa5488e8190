//! Forgot-password action: reset-token issuance

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::common::tokens::generate_reset_token;
use crate::domains::auth::emails::reset_email;
use crate::kernel::ServerDeps;

/// Result of a forgot-password request
pub enum ForgotPasswordOutcome {
    LinkIssued,
    UnknownEmail,
}

/// Issue a password-reset token and mail the reset link.
///
/// The issuance time is stored alongside the token. Nothing checks it later;
/// the token stays valid until consumed or replaced.
pub async fn forgot_password(email: &str, deps: &ServerDeps) -> Result<ForgotPasswordOutcome> {
    if deps.users.find_by_email(email).await?.is_none() {
        return Ok(ForgotPasswordOutcome::UnknownEmail);
    }

    let token = generate_reset_token();
    deps.users
        .set_reset_token(email, &token, Utc::now())
        .await?;
    deps.outbox.enqueue(reset_email(email, &deps.app_url, &token));

    info!(email = %email, "password reset link issued");
    Ok(ForgotPasswordOutcome::LinkIssued)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::actions::register;
    use crate::kernel::testing::test_deps;

    #[tokio::test]
    async fn test_token_is_stored_with_timestamp_and_mailed() {
        let (deps, sender) = test_deps();
        register("Alice", "alice@example.com", "pw1", "user", &deps)
            .await
            .unwrap();

        let outcome = forgot_password("alice@example.com", &deps).await.unwrap();
        assert!(matches!(outcome, ForgotPasswordOutcome::LinkIssued));

        let user = deps
            .users
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        let token = user.reset_token.expect("token should be stored");
        assert!(user.reset_requested_at.is_some());

        let sent = sender.wait_for(1).await;
        assert_eq!(sent[0].subject, "Password Reset Request");
        assert!(sent[0].body.contains(&token));
        assert!(sent[0].body.contains("/reset-password/"));
    }

    #[tokio::test]
    async fn test_unknown_email_is_reported() {
        let (deps, sender) = test_deps();

        let outcome = forgot_password("ghost@example.com", &deps).await.unwrap();
        assert!(matches!(outcome, ForgotPasswordOutcome::UnknownEmail));
        assert!(sender.sent().await.is_empty());
    }
}
