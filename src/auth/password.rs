//! Salted password hashing.
//!
//! Stored form is `salt$hex(sha256(salt ++ password))`. The salt is a fresh
//! v4 UUID per password, so equal passwords hash differently across users.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Hash a plaintext password with a freshly generated salt.
pub fn hash_password(plain: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{}${}", salt, digest(&salt, plain))
}

/// Check a plaintext password against a stored `salt$hash` value.
///
/// Malformed stored values fail the check rather than erroring; they can
/// only come from manual database edits.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, hash)) => digest(salt, plain) == hash,
        None => false,
    }
}

fn digest(salt: &str, plain: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(plain.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let stored = hash_password("s3cret");
        assert!(verify_password("s3cret", &stored));
        assert!(!verify_password("wrong", &stored));
    }

    #[test]
    fn same_password_different_salts() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn malformed_stored_value_fails() {
        assert!(!verify_password("anything", "not-a-valid-entry"));
        assert!(!verify_password("anything", ""));
    }
}
