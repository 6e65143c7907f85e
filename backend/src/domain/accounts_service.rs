//! Account registration and authentication.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CredentialHasher, CredentialHasherError, LoginService, NewUser, SignupService,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Error, FieldErrors, LoginCredentials, SignupRequest, User, UserId};

/// Message shown when the requested username is taken.
pub const USERNAME_TAKEN_MESSAGE: &str = "A user with that username already exists.";

/// Account service implementing [`LoginService`] and [`SignupService`].
pub struct AccountService<U: ?Sized, H: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U: ?Sized, H: ?Sized> Clone for AccountService<U, H> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<U: ?Sized, H: ?Sized> AccountService<U, H> {
    /// Create a new service from a user repository and a password hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository + ?Sized,
    H: CredentialHasher + ?Sized,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                warn!(kind = "connection", %message, "user repository unavailable");
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                warn!(kind = "query", %message, "user repository query failed");
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::UsernameTaken { .. } => Self::username_taken(),
        }
    }

    fn map_hasher_error(error: CredentialHasherError) -> Error {
        warn!(kind = error.kind(), %error, "credential hashing failed");
        Error::internal("credential hashing failed")
    }

    fn username_taken() -> Error {
        Error::validation(FieldErrors::single("username", USERNAME_TAKEN_MESSAGE))
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository + ?Sized,
    H: CredentialHasher + ?Sized,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let stored = self
            .users
            .find_credentials(credentials.username())
            .await
            .map_err(Self::map_user_error)?;
        let Some(stored) = stored else {
            debug!(username = credentials.username(), "login for unknown user");
            return Err(Error::unauthorized("invalid credentials"));
        };

        let valid = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(Self::map_hasher_error)?;
        if !valid {
            debug!(user_id = %stored.user.id(), "login with wrong password");
            return Err(Error::unauthorized("invalid credentials"));
        }
        Ok(stored.user.id())
    }
}

#[async_trait]
impl<U, H> SignupService for AccountService<U, H>
where
    U: UserRepository + ?Sized,
    H: CredentialHasher + ?Sized,
{
    async fn signup(&self, request: &SignupRequest) -> Result<User, Error> {
        let username = request.username();
        let existing = self
            .users
            .find_credentials(username.as_str())
            .await
            .map_err(Self::map_user_error)?;
        if existing.is_some() {
            return Err(Self::username_taken());
        }

        let password_hash = self
            .hasher
            .hash(request.password())
            .await
            .map_err(Self::map_hasher_error)?;
        let user = self
            .users
            .create(&NewUser {
                id: UserId::random(),
                username: username.clone(),
                password_hash,
            })
            .await
            .map_err(Self::map_user_error)?;
        info!(user_id = %user.id(), username = %user.username(), "user signed up");
        Ok(user)
    }
}
