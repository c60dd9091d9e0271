//! Password hashing backed by bcrypt.
//!
//! The salt is generated per call and embedded in the digest, so the same
//! plaintext never hashes to the same string twice. The work factor comes from
//! [`PasswordConfig`], which is built once at startup.

use bcrypt::{hash, verify};
use notely_config::PasswordConfig;

use crate::errors::AppError;

pub fn hash_password(password: &str, config: &PasswordConfig) -> Result<String, AppError> {
    hash(password, config.cost)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored digest. A digest that is not valid bcrypt
/// is an error, not a mismatch.
pub fn verify_password(password: &str, digest: &str) -> Result<bool, AppError> {
    verify(password, digest)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> PasswordConfig {
        PasswordConfig { cost: 4 }
    }

    #[test]
    fn test_hash_and_verify() {
        let digest = hash_password("s3cret-pass", &fast_config()).unwrap();
        assert_ne!(digest, "s3cret-pass");
        assert!(verify_password("s3cret-pass", &digest).unwrap());
        assert!(!verify_password("other-pass", &digest).unwrap());
    }

    #[test]
    fn test_digest_embeds_cost() {
        let digest = hash_password("pw", &fast_config()).unwrap();
        assert!(digest.starts_with("$2b$04$"));
    }

    #[test]
    fn test_malformed_digest_is_error() {
        assert!(verify_password("pw", "plaintext-not-a-hash").is_err());
    }
}
