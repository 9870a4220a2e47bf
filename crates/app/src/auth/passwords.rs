//! Password hashing
//!
//! Stored form is an Argon2id PHC string (`$argon2id$v=19$m=...$<salt>$<hash>`).

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use zeroize::Zeroize;

use crate::auth::hex::encode_hex;

const RANDOM_PASSWORD_BYTES: usize = 32;

/// Hashing failed inside the KDF.
#[derive(Debug, Error)]
#[error("failed to hash password: {0}")]
pub struct PasswordHashError(argon2::password_hash::Error);

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Returns [`PasswordHashError`] when Argon2 rejects the input or parameters.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordHashError)
}

/// Check `password` against a stored hash. Malformed hashes never match.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// A random password nobody knows, for accounts that sign in another way.
#[must_use]
pub fn random_password() -> String {
    let mut bytes = [0_u8; RANDOM_PASSWORD_BYTES];

    OsRng.fill_bytes(&mut bytes);

    let password = encode_hex(&bytes);

    bytes.zeroize();

    password
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn verifies_the_original_password() -> TestResult {
        let stored = hash_password("correct horse")?;

        assert!(verify_password("correct horse", &stored), "same password");
        assert!(!verify_password("correct horse!", &stored), "different password");

        Ok(())
    }

    #[test]
    fn salts_differ_between_hashes() -> TestResult {
        let first = hash_password("hunter22")?;
        let second = hash_password("hunter22")?;

        assert_ne!(first, second, "each hash should carry its own salt");
        assert!(verify_password("hunter22", &first), "first hash");
        assert!(verify_password("hunter22", &second), "second hash");

        Ok(())
    }

    #[test]
    fn stored_form_is_an_argon2id_phc_string() -> TestResult {
        let stored = hash_password("password123")?;

        assert!(stored.starts_with("$argon2id$"), "unexpected prefix: {stored}");
        assert!(!stored.contains("password123"), "plaintext leaked");

        Ok(())
    }

    #[test]
    fn fast_digests_do_not_verify() {
        assert!(!verify_password("x", ""), "empty");
        assert!(
            !verify_password(
                "x",
                "v1$00000000000000000000000000000000$0000000000000000000000000000000000000000000000000000000000000000"
            ),
            "legacy salted sha256"
        );
        assert!(!verify_password("x", "$argon2id$garbage"), "truncated phc");
    }

    #[test]
    fn random_passwords_are_long_and_distinct() {
        let first = random_password();
        let second = random_password();

        assert_eq!(first.len(), RANDOM_PASSWORD_BYTES * 2, "hex encoded");
        assert_ne!(first, second, "fresh randomness per call");
    }
}
