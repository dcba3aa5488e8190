//! OTP verification action

use anyhow::Result;
use tracing::info;

use crate::common::tokens::generate_session_token;
use crate::kernel::ServerDeps;

/// Result of an OTP verification attempt
pub enum VerifyOtpOutcome {
    /// Code matched: the OTP is consumed and a session is open.
    Verified { session_token: String, role: String },
    /// Unknown email, no live code, or mismatch.
    Rejected,
}

/// Verify an OTP and open a session.
///
/// Consuming the code and installing the session token happen in one
/// conditional store update, so a code verifies at most once - the second
/// attempt with the same code finds the field already cleared.
pub async fn verify_otp(email: &str, code: &str, deps: &ServerDeps) -> Result<VerifyOtpOutcome> {
    let session_token = generate_session_token();

    match deps.users.claim_otp(email, code, &session_token).await? {
        Some(user) => {
            info!(email = %email, "OTP verified, session opened");
            Ok(VerifyOtpOutcome::Verified {
                session_token,
                role: user.role,
            })
        }
        None => Ok(VerifyOtpOutcome::Rejected),
    }
}
