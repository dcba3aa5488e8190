//! OTP re-issuance action

use anyhow::Result;
use tracing::info;

use crate::common::tokens::generate_otp;
use crate::domains::auth::emails::resend_otp_email;
use crate::kernel::ServerDeps;

/// Result of a resend request
pub enum ResendOtpOutcome {
    OtpIssued,
    UnknownEmail,
}

/// Issue a fresh OTP for an existing user, unconditionally.
///
/// Same issuance path as login minus the credential check. There is no rate
/// limit and no check of the prior code's age.
pub async fn resend_otp(email: &str, deps: &ServerDeps) -> Result<ResendOtpOutcome> {
    if deps.users.find_by_email(email).await?.is_none() {
        return Ok(ResendOtpOutcome::UnknownEmail);
    }

    let code = generate_otp();
    deps.users.set_otp(email, &code).await?;
    deps.outbox.enqueue(resend_otp_email(email, &code));

    info!(email = %email, "OTP re-issued");
    Ok(ResendOtpOutcome::OtpIssued)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::actions::register;
    use crate::kernel::testing::test_deps;

    #[tokio::test]
    async fn test_resend_stores_and_mails_new_code() {
        let (deps, sender) = test_deps();
        register("Alice", "alice@example.com", "pw1", "user", &deps)
            .await
            .unwrap();

        let outcome = resend_otp("alice@example.com", &deps).await.unwrap();
        assert!(matches!(outcome, ResendOtpOutcome::OtpIssued));

        let code = deps
            .users
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap()
            .otp_code
            .unwrap();

        let sent = sender.wait_for(1).await;
        assert_eq!(sent[0].subject, "Your New OTP Code");
        assert!(sent[0].body.contains(&code));
    }

    #[tokio::test]
    async fn test_unknown_email_is_reported() {
        let (deps, sender) = test_deps();

        let outcome = resend_otp("ghost@example.com", &deps).await.unwrap();
        assert!(matches!(outcome, ResendOtpOutcome::UnknownEmail));
        assert!(sender.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_resend_works_without_prior_login() {
        let (deps, _) = test_deps();
        register("Alice", "alice@example.com", "pw1", "user", &deps)
            .await
            .unwrap();

        // No login happened; resend still issues a code.
        let outcome = resend_otp("alice@example.com", &deps).await.unwrap();
        assert!(matches!(outcome, ResendOtpOutcome::OtpIssued));
    }
}
