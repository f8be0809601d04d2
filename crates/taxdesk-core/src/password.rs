use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Hashes a password with bcrypt at the default cost.
///
/// bcrypt is deliberately slow; callers on an async runtime should run this
/// on a blocking thread.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch and an error only when the stored hash
/// itself is unreadable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_invalid_hash() {
        assert!(verify_password("anything", "not_a_bcrypt_hash").is_err());
    }
}
