//! Login action: credential check, then OTP issuance

use anyhow::Result;
use tracing::info;

use crate::common::password::verify_password;
use crate::common::tokens::generate_otp;
use crate::domains::auth::emails::otp_email;
use crate::kernel::ServerDeps;

/// Result of a login attempt
pub enum LoginOutcome {
    /// Credentials verified; an OTP is stored and queued for delivery.
    OtpIssued,
    /// Unknown email or wrong password. Deliberately indistinguishable so
    /// the endpoint leaks nothing about which emails are registered.
    InvalidCredentials,
}

/// Check credentials and issue an OTP.
///
/// The OTP overwrites any prior code. Delivery goes through the outbox, so
/// this returns before the email has left the building.
pub async fn login(email: &str, password: &str, deps: &ServerDeps) -> Result<LoginOutcome> {
    let Some(user) = deps.users.find_by_email(email).await? else {
        return Ok(LoginOutcome::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        return Ok(LoginOutcome::InvalidCredentials);
    }

    let code = generate_otp();
    deps.users.set_otp(email, &code).await?;
    deps.outbox.enqueue(otp_email(email, &code));

    info!(email = %email, "OTP issued");
    Ok(LoginOutcome::OtpIssued)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::actions::register;
    use crate::kernel::testing::test_deps;

    #[tokio::test]
    async fn test_login_issues_and_stores_otp() {
        let (deps, sender) = test_deps();
        register("Alice", "alice@example.com", "pw1", "user", &deps)
            .await
            .unwrap();

        let outcome = login("alice@example.com", "pw1", &deps).await.unwrap();
        assert!(matches!(outcome, LoginOutcome::OtpIssued));

        let user = deps
            .users
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        let code = user.otp_code.expect("OTP should be stored");

        // The queued email carries the same code.
        let sent = sender.wait_for(1).await;
        assert_eq!(sent[0].to, "alice@example.com");
        assert!(sent[0].body.contains(&code));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
        let (deps, sender) = test_deps();
        register("Alice", "alice@example.com", "pw1", "user", &deps)
            .await
            .unwrap();

        let wrong_password = login("alice@example.com", "nope", &deps).await.unwrap();
        let unknown_email = login("bob@example.com", "pw1", &deps).await.unwrap();

        assert!(matches!(wrong_password, LoginOutcome::InvalidCredentials));
        assert!(matches!(unknown_email, LoginOutcome::InvalidCredentials));

        // Neither attempt dispatched mail.
        assert!(sender.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_second_login_overwrites_prior_otp() {
        let (deps, sender) = test_deps();
        register("Alice", "alice@example.com", "pw1", "user", &deps)
            .await
            .unwrap();

        login("alice@example.com", "pw1", &deps).await.unwrap();
        login("alice@example.com", "pw1", &deps).await.unwrap();

        // Exactly one code is live; the second email carries it.
        let stored = deps
            .users
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap()
            .otp_code
            .unwrap();
        let sent = sender.wait_for(2).await;
        assert_eq!(sent.len(), 2);
        assert!(sent[1].body.contains(&stored));
    }
}
