//! Password hashing using bcrypt

use anyhow::Result;

/// Hash a password with a fresh salt
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(Into::into)
}

/// Verify a password against a stored hash
///
/// Returns false on mismatch. A malformed stored hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("pw1").unwrap();

        assert!(verify_password("pw1", &hash).unwrap());
        assert!(!verify_password("pw2", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hash1 = hash_password("pw1").unwrap();
        let hash2 = hash_password("pw1").unwrap();
        assert_ne!(hash1, hash2, "Same password should hash differently");
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_password("pw1", "not-a-bcrypt-hash").is_err());
    }
}
