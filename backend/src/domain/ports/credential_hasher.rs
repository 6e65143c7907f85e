//! Port for password hashing.
//!
//! Hashes are opaque strings to the domain; adapters choose the algorithm
//! and encode parameters in the stored value.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hashers.
    pub enum CredentialHasherError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Hash a new password.
    async fn hash(&self, password: &str) -> Result<String, CredentialHasherError>;

    /// Check `password` against a stored hash.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialHasherError>;
}
