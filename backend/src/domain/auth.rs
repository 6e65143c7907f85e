//! Authentication primitives: login credentials and signup requests.
//!
//! Inbound adapters hand raw form strings to these constructors; everything
//! past this point works with validated values. Passwords are wrapped in
//! [`Zeroizing`] so they are wiped when dropped.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{UserValidationError, Username};
use super::validation::{FieldErrors, REQUIRED_MESSAGE};

/// Minimum password length accepted at signup.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Message shown when the signup passwords differ.
pub const PASSWORD_MISMATCH_MESSAGE: &str = "The two password fields didn't match.";

/// Message shown when the login credentials are rejected.
pub const INVALID_LOGIN_MESSAGE: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl LoginValidationError {
    /// Form field the error belongs to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use noticeboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" reader ", "password").unwrap();
/// assert_eq!(creds.username(), "reader");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Collect every login validation failure as form errors.
    pub fn validate(username: &str, password: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        if username.trim().is_empty() {
            errors.add(LoginValidationError::EmptyUsername.field(), REQUIRED_MESSAGE);
        }
        if password.is_empty() {
            errors.add(LoginValidationError::EmptyPassword.field(), REQUIRED_MESSAGE);
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Self::try_from_parts(username, password)
            .map_err(|err| FieldErrors::single(err.field(), err.to_string()))
    }

    /// Username string suitable for lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated signup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    username: Username,
    password: Zeroizing<String>,
}

impl SignupRequest {
    /// Validate the signup form fields.
    ///
    /// All failures are reported together, keyed by form field.
    pub fn validate(username: &str, password1: &str, password2: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = match Username::new(username.trim()) {
            Ok(value) => Some(value),
            Err(UserValidationError::EmptyUsername) => {
                errors.add("username", REQUIRED_MESSAGE);
                None
            }
            Err(err) => {
                errors.add("username", err.to_string());
                None
            }
        };

        if password1.is_empty() {
            errors.add("password1", REQUIRED_MESSAGE);
        }
        if password2.is_empty() {
            errors.add("password2", REQUIRED_MESSAGE);
        }
        if !password1.is_empty() && !password2.is_empty() {
            if password1 != password2 {
                errors.add("password2", PASSWORD_MISMATCH_MESSAGE);
            } else if password1.chars().count() < PASSWORD_MIN_LEN {
                errors.add(
                    "password2",
                    format!(
                        "This password is too short. It must contain at least {PASSWORD_MIN_LEN} characters."
                    ),
                );
            }
        }

        match username {
            Some(username) if errors.is_empty() => Ok(Self {
                username,
                password: Zeroizing::new(password1.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    /// Requested username.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Chosen password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
