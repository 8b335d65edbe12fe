//! Password hashing and strength rules.
//!
//! Hashes are Argon2id in PHC string form, so parameters and salt travel
//! with the hash and can be tightened later without a migration.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Minimum password length for created and reset accounts.
pub const MIN_LENGTH: usize = 12;

/// Hash a plaintext password with a fresh random salt.
pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(digest.to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; `Err` means the stored hash itself is
/// unusable.
pub fn verify(password: &str, stored: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(other) => Err(other),
    }
}

/// Enforce the minimum length rule, returning a client-facing message on
/// rejection.
pub fn check_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_LENGTH} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_phc_string() {
        let digest = hash("what-is-man-that-thou-art-mindful").unwrap();
        assert!(digest.starts_with("$argon2id$"));
        assert!(verify("what-is-man-that-thou-art-mindful", &digest).unwrap());
    }

    #[test]
    fn mismatch_is_false_not_error() {
        let digest = hash("the-real-password").unwrap();
        assert!(!verify("a-guess", &digest).unwrap());
    }

    #[test]
    fn garbage_stored_hash_is_an_error() {
        assert!(verify("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn length_rule_counts_characters() {
        assert!(check_strength("elevenchars").is_err());
        assert!(check_strength("twelve_chars").is_ok());
        let msg = check_strength("x").unwrap_err();
        assert!(msg.contains("at least 12"));
    }
}
