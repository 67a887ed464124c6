//! Argon2id password hashing (PHC string format).
use std::sync::LazyLock;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to gather salt entropy")]
    Entropy,
    #[error("failed to hash password: {0}")]
    Hash(String),
}

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::fill(&mut salt_bytes).map_err(|_| PasswordError::Entropy)?;
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hash(e.to_string()))?;

    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?
        .to_string();

    Ok(phc)
}

/// `false` for a wrong password *and* for an unparsable stored hash.
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

// Hash of a random throwaway password, built on first use.
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| {
    let mut throwaway = [0u8; 32];
    getrandom::fill(&mut throwaway).ok()?;
    let password: String = throwaway.iter().map(|b| format!("{b:02x}")).collect();
    hash_password(&password).ok()
});

/// Build the dummy hash now instead of on the first unknown-user sign-in.
pub fn prepare_dummy_hash() {
    LazyLock::force(&DUMMY_HASH);
}

/// Run a full verification against a hash no caller can match.
///
/// Used when the username is unknown so that path costs the same as a wrong
/// password. Always `false`.
pub fn verify_against_dummy(password: &str) -> bool {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(hash, password);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let phc = hash_password("correct horse battery").unwrap();

        assert!(phc.starts_with("$argon2id$"));
        assert!(verify_password(&phc, "correct horse battery"));
        assert!(!verify_password(&phc, "wrong password"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn dummy_hash_is_a_real_argon2_hash() {
        let hash = DUMMY_HASH.as_deref().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(PasswordHash::new(hash).is_ok());
    }

    #[test]
    fn dummy_verification_never_succeeds() {
        assert!(!verify_against_dummy("correct horse battery"));
        assert!(!verify_against_dummy(""));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("not-a-phc-string", "anything"));
    }
}
