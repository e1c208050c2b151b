//! Password hashing using Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2, Params,
};
use gallery_core::{GalleryError, GalleryResult};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password hasher service using Argon2id.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Arc<Argon2<'static>>,
    decoy: Arc<OnceLock<String>>,
}

impl PasswordHasher {
    /// Creates a new password hasher with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    /// Creates a new password hasher with custom parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Self {
            argon2: Arc::new(argon2),
            decoy: Arc::default(),
        }
    }

    /// Creates a password hasher from a memory cost in MiB.
    #[must_use]
    pub fn with_cost(cost: u32) -> Self {
        let params = Params::new(cost.saturating_mul(1024), 3, 1, None).unwrap_or(Params::DEFAULT);
        Self::with_params(params)
    }

    /// Hashes a password.
    pub fn hash(&self, password: &str) -> GalleryResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| GalleryError::Internal(format!("Failed to hash password: {e}")))?;

        debug!("Password hashed successfully");
        Ok(hash.to_string())
    }

    /// Verifies a password against a hash.
    pub fn verify(&self, password: &str, hash: &str) -> GalleryResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| GalleryError::Internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => Err(GalleryError::Internal(format!("Password verification error: {e}"))),
        }
    }

    /// Verifies `password` against a decoy hash and always reports `false`.
    ///
    /// Called on logins for unknown emails so they do the same Argon2 work
    /// as a wrong password. The decoy is hashed on first use.
    pub fn verify_decoy(&self, password: &str) -> GalleryResult<bool> {
        let decoy = match self.decoy.get() {
            Some(hash) => hash,
            None => {
                let hash = self.hash("gallery-decoy-credential")?;
                self.decoy.get_or_init(|| hash)
            }
        };

        self.verify(password, decoy)?;
        Ok(false)
    }

    /// Whether the decoy hash has been computed.
    #[must_use]
    pub fn decoy_ready(&self) -> bool {
        self.decoy.get().is_some()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::with_cost(1);
        let hash = hasher.hash("impressionism").unwrap();
        assert!(hasher.verify("impressionism", &hash).unwrap());
        assert!(!hasher.verify("expressionism", &hash).unwrap());
    }

    #[test]
    fn test_different_salts() {
        let hasher = PasswordHasher::with_cost(1);
        let hash1 = hasher.hash("same-password").unwrap();
        let hash2 = hasher.hash("same-password").unwrap();
        assert_ne!(hash1, hash2);
        assert!(hash1.starts_with("$argon2id$"));
    }

    #[test]
    fn test_invalid_hash_format_returns_error() {
        let hasher = PasswordHasher::with_cost(1);
        assert!(hasher.verify("password", "not-a-valid-hash").is_err());
    }

    #[test]
    fn test_verify_decoy_never_matches() {
        let hasher = PasswordHasher::with_cost(1);
        assert!(!hasher.verify_decoy("impressionism").unwrap());
        assert!(!hasher.verify_decoy("gallery-decoy-credential").unwrap());

        assert!(hasher.decoy_ready());
        let clone = hasher.clone();
        assert_eq!(clone.decoy.get(), hasher.decoy.get());
        assert!(hasher.decoy.get().is_some_and(|hash| hash.starts_with("$argon2id$")));
    }

    #[test]
    fn test_debug_does_not_leak_internals() {
        assert_eq!(format!("{:?}", PasswordHasher::default()), "PasswordHasher { .. }");
    }
}
