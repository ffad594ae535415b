//! Password Service
//!
//! Argon2id hashing and verification.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::{PlatformError, Result};

#[derive(Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    pub fn hash_password(&self, password: &str) -> Result<String> {
        if password.is_empty() {
            return Err(PlatformError::validation("Password is required"));
        }

        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PlatformError::internal(format!("password hashing failed: {}", e)))
    }

    /// Verify a password against a stored hash. A mismatch is `Ok(false)`;
    /// an unreadable stored hash is a server fault.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| PlatformError::internal(format!("stored hash unreadable: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PlatformError::internal(format!("password verification failed: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = PasswordService::default();
        let hash = service.hash_password("hunter2!").unwrap();

        assert!(service.verify_password("hunter2!", &hash).unwrap());
        assert!(!service.verify_password("hunter3!", &hash).unwrap());
    }

    #[test]
    fn test_empty_password_rejected() {
        let service = PasswordService::default();
        let err = service.hash_password("").unwrap_err();
        assert!(matches!(err, PlatformError::Validation { .. }));
    }

    #[test]
    fn test_hashes_are_salted() {
        let service = PasswordService::default();
        let a = service.hash_password("hunter2!").unwrap();
        let b = service.hash_password("hunter2!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unreadable_hash_is_server_fault() {
        let service = PasswordService::default();
        let err = service.verify_password("hunter2!", "not-a-hash").unwrap_err();
        assert!(matches!(err, PlatformError::Internal { .. }));
    }
}
