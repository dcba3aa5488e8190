//! OTP and token generation.
//!
//! Session and reset tokens come from the OS CSPRNG. The short numeric OTP
//! uses the thread RNG; its strength is its single-use lifecycle, not its
//! entropy.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::rngs::OsRng;
use rand::{Rng, RngCore};

/// Generate a uniform 6-digit one-time code.
pub fn generate_otp() -> String {
    let code: u32 = rand::thread_rng().gen_range(100_000..=999_999);
    code.to_string()
}

/// Generate an opaque session token: 256 bits, hex encoded.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generate a URL-safe password-reset token from 32 random bytes.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_is_six_digits() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(otp.chars().next(), Some('0'), "OTP has fixed digit width");
        }
    }

    #[test]
    fn test_session_token_format() {
        let token = generate_session_token();
        assert_eq!(token.len(), 64, "256 bits as hex is 64 characters");
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_reset_token_is_url_safe() {
        let token = generate_reset_token();
        assert_eq!(token.len(), 43, "32 bytes base64url without padding");
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_session_token(), generate_session_token());
        assert_ne!(generate_reset_token(), generate_reset_token());
    }
}
