//! Password digest value object.
//!
//! Plain-text passwords only pass through here on their way to an Argon2
//! digest; nothing else in the crate stores or returns them.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

use crate::config::{MSG_INVALID_PASSWORD, MSG_PASSWORD_MISMATCH};
use crate::errors::{AppError, AppResult};

/// Reasons a password/confirmation pair cannot produce a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("{}", MSG_INVALID_PASSWORD)]
    Blank,

    #[error("{}", MSG_PASSWORD_MISMATCH)]
    Mismatch,
}

impl PasswordError {
    /// Field the error is reported under.
    pub fn field(&self) -> &'static str {
        match self {
            PasswordError::Blank => "password",
            PasswordError::Mismatch => "password_confirmation",
        }
    }
}

/// One-way password digest.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Check a password against its confirmation.
    ///
    /// A blank password is rejected before the pair is compared.
    pub fn confirm(plain_text: &str, confirmation: &str) -> Result<(), PasswordError> {
        if plain_text.is_empty() {
            Err(PasswordError::Blank)
        } else if plain_text != confirmation {
            Err(PasswordError::Mismatch)
        } else {
            Ok(())
        }
    }

    /// Hash a plain-text password.
    ///
    /// # Errors
    /// Returns an internal error if Argon2 fails.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Restore a digest loaded from storage.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
