//! Advisor credential hashing.
//!
//! New credentials are Argon2id PHC strings with a per-hash random salt.
//! Bcrypt hashes written by earlier deployments still verify and are
//! replaced on the next successful login.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

const LEGACY_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

/// Hashed advisor password.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain-text password with a fresh salt.
    ///
    /// No strength rule is applied here; accounts created by an administrator
    /// may carry short bootstrap passwords. See [`Password::check_strength`].
    pub fn new(plain_text: &str) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?
            .to_string();
        Ok(Self { hash })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// True for bcrypt (`$2a$`, `$2b$`, `$2x$`, `$2y$`) hashes.
    pub fn is_legacy(&self) -> bool {
        LEGACY_PREFIXES.iter().any(|p| self.hash.starts_with(p))
    }

    /// Verify a plain-text password. Malformed stored hashes never verify.
    pub fn verify(&self, plain_text: &str) -> bool {
        if self.is_legacy() {
            return bcrypt::verify(plain_text, &self.hash).unwrap_or_else(|e| {
                tracing::debug!("Stored bcrypt hash is malformed: {}", e);
                false
            });
        }
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::debug!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }

    /// Minimum rule for passwords an advisor chooses.
    pub fn check_strength(plain_text: &str) -> AppResult<()> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}
