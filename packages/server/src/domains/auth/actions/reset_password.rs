//! Password-reset action: token consumption

use anyhow::Result;
use tracing::info;

use crate::common::password::hash_password;
use crate::kernel::ServerDeps;

/// Result of a reset attempt
pub enum ResetPasswordOutcome {
    PasswordChanged,
    /// No user currently holds this token.
    InvalidToken,
}

/// Consume a reset token and install the new password.
///
/// Hash installation and token clearing happen in one conditional store
/// update, so a token authorizes exactly one change.
pub async fn reset_password(
    token: &str,
    new_password: &str,
    deps: &ServerDeps,
) -> Result<ResetPasswordOutcome> {
    let new_hash = hash_password(new_password)?;

    match deps.users.consume_reset_token(token, &new_hash).await? {
        Some(user) => {
            info!(email = %user.email, "password changed via reset token");
            Ok(ResetPasswordOutcome::PasswordChanged)
        }
        None => Ok(ResetPasswordOutcome::InvalidToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::password::verify_password;
    use crate::domains::auth::actions::{forgot_password, register};
    use crate::kernel::testing::test_deps;

    async fn issued_token(deps: &crate::kernel::ServerDeps, email: &str) -> String {
        deps.users
            .find_by_email(email)
            .await
            .unwrap()
            .unwrap()
            .reset_token
            .expect("token should be stored")
    }

    #[tokio::test]
    async fn test_reset_changes_password_and_consumes_token() {
        let (deps, _) = test_deps();
        register("Alice", "alice@example.com", "pw1", "user", &deps)
            .await
            .unwrap();
        forgot_password("alice@example.com", &deps).await.unwrap();
        let token = issued_token(&deps, "alice@example.com").await;

        let outcome = reset_password(&token, "pw2", &deps).await.unwrap();
        assert!(matches!(outcome, ResetPasswordOutcome::PasswordChanged));

        let user = deps
            .users
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(user.reset_token.is_none(), "token is cleared");
        assert!(user.reset_requested_at.is_none());
        assert!(!verify_password("pw1", &user.password_hash).unwrap());
        assert!(verify_password("pw2", &user.password_hash).unwrap());

        // Replaying the consumed token fails.
        let replay = reset_password(&token, "pw3", &deps).await.unwrap();
        assert!(matches!(replay, ResetPasswordOutcome::InvalidToken));
    }

    #[tokio::test]
    async fn test_unissued_token_is_invalid() {
        let (deps, _) = test_deps();
        register("Alice", "alice@example.com", "pw1", "user", &deps)
            .await
            .unwrap();

        let outcome = reset_password("never-issued", "pw2", &deps).await.unwrap();
        assert!(matches!(outcome, ResetPasswordOutcome::InvalidToken));
    }
}
