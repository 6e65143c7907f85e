//! Argon2id implementation of the [`CredentialHasher`] port.
//!
//! Hashes are stored as PHC strings, so parameters travel with each hash and
//! can be raised later without invalidating existing accounts. Hashing runs
//! on the blocking pool to keep request workers responsive.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialHasher, CredentialHasherError};

/// Argon2id password hasher.
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialHasher {
    params: Params,
}

impl Argon2CredentialHasher {
    /// Hasher with the library's recommended parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with minimal cost, for tests only.
    #[cfg(any(test, feature = "test-support"))]
    #[must_use]
    pub fn fast_insecure() -> Self {
        match Params::new(8, 1, 1, None) {
            Ok(params) => Self { params },
            Err(error) => panic!("minimal argon2 params must be valid: {error}"),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    fn hash_blocking(&self, password: &str) -> Result<String, CredentialHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialHasherError::hash(err.to_string()))
    }

    fn verify_blocking(&self, password: &str, hash: &str) -> Result<bool, CredentialHasherError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|err| CredentialHasherError::malformed_hash(err.to_string()))?;
        // Verification uses the parameters encoded in the stored hash.
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialHasherError::malformed_hash(err.to_string())),
        }
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, CredentialHasherError>
where
    F: FnOnce() -> Result<T, CredentialHasherError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| CredentialHasherError::hash(format!("hashing task failed: {err}")))?
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: &str) -> Result<String, CredentialHasherError> {
        let hasher = self.clone();
        let password = Zeroizing::new(password.to_owned());
        run_blocking(move || hasher.hash_blocking(&password)).await
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialHasherError> {
        let hasher = self.clone();
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.to_owned();
        run_blocking(move || hasher.verify_blocking(&password, &hash)).await
    }
}
