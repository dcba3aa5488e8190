//! End-to-end auth lifecycle against in-memory collaborators.

use server_core::domains::auth::actions::{
    forgot_password, login, register, reset_password, verify_otp, ForgotPasswordOutcome,
    LoginOutcome, RegisterOutcome, ResetPasswordOutcome, VerifyOtpOutcome,
};
use server_core::kernel::testing::test_deps;
use server_core::kernel::ServerDeps;

async fn stored_otp(deps: &ServerDeps, email: &str) -> String {
    deps.users
        .find_by_email(email)
        .await
        .unwrap()
        .unwrap()
        .otp_code
        .expect("an OTP should be stored")
}

async fn stored_reset_token(deps: &ServerDeps, email: &str) -> String {
    deps.users
        .find_by_email(email)
        .await
        .unwrap()
        .unwrap()
        .reset_token
        .expect("a reset token should be stored")
}

#[tokio::test]
async fn register_login_verify_lifecycle() {
    let (deps, sender) = test_deps();

    // Registration succeeds once.
    let created = register("Alice", "alice@example.com", "pw1", "user", &deps)
        .await
        .unwrap();
    assert!(matches!(created, RegisterOutcome::Created(_)));

    // Login with the right password issues an OTP and queues its email.
    let issued = login("alice@example.com", "pw1", &deps).await.unwrap();
    assert!(matches!(issued, LoginOutcome::OtpIssued));
    let code = stored_otp(&deps, "alice@example.com").await;
    let sent = sender.wait_for(1).await;
    assert!(sent[0].body.contains(&code));

    // The issued code opens a session exactly once.
    let verified = verify_otp("alice@example.com", &code, &deps).await.unwrap();
    let VerifyOtpOutcome::Verified {
        session_token,
        role,
    } = verified
    else {
        panic!("expected Verified");
    };
    assert_eq!(session_token.len(), 64);
    assert_eq!(role, "user");

    let replay = verify_otp("alice@example.com", &code, &deps).await.unwrap();
    assert!(
        matches!(replay, VerifyOtpOutcome::Rejected),
        "a consumed OTP must not verify again"
    );
}

#[tokio::test]
async fn forgot_reset_login_lifecycle() {
    let (deps, _) = test_deps();

    register("Alice", "alice@example.com", "pw1", "user", &deps)
        .await
        .unwrap();

    // Issue a reset token and consume it.
    let issued = forgot_password("alice@example.com", &deps).await.unwrap();
    assert!(matches!(issued, ForgotPasswordOutcome::LinkIssued));
    let token = stored_reset_token(&deps, "alice@example.com").await;

    let changed = reset_password(&token, "pw2", &deps).await.unwrap();
    assert!(matches!(changed, ResetPasswordOutcome::PasswordChanged));

    // Old password no longer authenticates, new one does.
    let old = login("alice@example.com", "pw1", &deps).await.unwrap();
    assert!(matches!(old, LoginOutcome::InvalidCredentials));

    let new = login("alice@example.com", "pw2", &deps).await.unwrap();
    assert!(matches!(new, LoginOutcome::OtpIssued));

    // The token was single-use.
    let replay = reset_password(&token, "pw3", &deps).await.unwrap();
    assert!(matches!(replay, ResetPasswordOutcome::InvalidToken));
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let (deps, _) = test_deps();

    register("Alice", "alice@example.com", "pw1", "user", &deps)
        .await
        .unwrap();
    let second = register("Mallory", "alice@example.com", "pwX", "user", &deps)
        .await
        .unwrap();

    assert!(matches!(second, RegisterOutcome::EmailTaken));
}
