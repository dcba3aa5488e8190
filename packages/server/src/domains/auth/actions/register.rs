//! Registration action

use anyhow::Result;
use tracing::info;

use crate::common::password::hash_password;
use crate::domains::auth::models::User;
use crate::kernel::ServerDeps;

/// Result of a registration attempt
pub enum RegisterOutcome {
    Created(User),
    EmailTaken,
}

/// Register a new user.
///
/// The password is hashed before it touches the store; a new user starts
/// with no OTP, session or reset state.
pub async fn register(
    name: &str,
    email: &str,
    password: &str,
    role: &str,
    deps: &ServerDeps,
) -> Result<RegisterOutcome> {
    if deps.users.find_by_email(email).await?.is_some() {
        return Ok(RegisterOutcome::EmailTaken);
    }

    let password_hash = hash_password(password)?;
    let user = deps.users.create(name, email, &password_hash, role).await?;

    info!(email = %email, "user registered");
    Ok(RegisterOutcome::Created(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::testing::test_deps;

    #[tokio::test]
    async fn test_register_creates_user_with_clean_state() {
        let (deps, _) = test_deps();

        let outcome = register("Alice", "alice@example.com", "pw1", "user", &deps)
            .await
            .unwrap();

        let RegisterOutcome::Created(user) = outcome else {
            panic!("expected Created");
        };
        assert_eq!(user.name, "Alice");
        assert_eq!(user.role, "user");
        assert!(user.otp_code.is_none());
        assert!(user.session_token.is_none());
        assert!(user.reset_token.is_none());
        assert_ne!(user.password_hash, "pw1", "password must be hashed");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let (deps, _) = test_deps();

        register("Alice", "alice@example.com", "pw1", "user", &deps)
            .await
            .unwrap();
        let second = register("Alice Again", "alice@example.com", "pw2", "user", &deps)
            .await
            .unwrap();

        assert!(matches!(second, RegisterOutcome::EmailTaken));

        // The original record is untouched.
        let user = deps
            .users
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.name, "Alice");
    }
}
