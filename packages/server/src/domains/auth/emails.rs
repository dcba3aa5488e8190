//! Outbound auth email construction.

use crate::kernel::OutboundEmail;

/// OTP delivery after a successful credential check.
pub fn otp_email(to: &str, code: &str) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        subject: "Your OTP Code".to_string(),
        body: format!("Your OTP is: {}", code),
    }
}

/// OTP re-delivery on explicit request.
pub fn resend_otp_email(to: &str, code: &str) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        subject: "Your New OTP Code".to_string(),
        body: format!("Your new OTP is: {}", code),
    }
}

/// Password-reset link pointing back at the frontend.
pub fn reset_email(to: &str, app_url: &str, token: &str) -> OutboundEmail {
    let reset_link = format!("{}/reset-password/{}", app_url, token);
    OutboundEmail {
        to: to.to_string(),
        subject: "Password Reset Request".to_string(),
        body: format!("Click to reset: {}", reset_link),
    }
}
