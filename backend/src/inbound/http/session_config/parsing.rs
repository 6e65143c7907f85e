//! Session toggles read from the environment.
//!
//! Each [`Toggle`] knows its variable name, how to parse it, and the value a
//! debug build falls back to. Release builds turn every missing or malformed
//! toggle into a [`SessionConfigError`].

use std::fmt;

use actix_web::cookie::SameSite;
use tracing::warn;

use super::{
    ALLOW_EPHEMERAL_ENV, BuildMode, COOKIE_SECURE_ENV, SAMESITE_ENV, SessionConfigError,
    SessionEnv,
};

/// One environment toggle with its debug fallback.
pub(super) struct Toggle<T> {
    name: &'static str,
    expected: &'static str,
    parse: fn(&str) -> Option<T>,
    fallback: T,
}

/// `Secure` flag on the session cookie; on unless disabled.
pub(super) const COOKIE_SECURE: Toggle<bool> = Toggle {
    name: COOKIE_SECURE_ENV,
    expected: "1|0|true|false|yes|no|on|off",
    parse: parse_bool,
    fallback: true,
};

/// Whether a missing key file may be replaced by a generated key.
pub(super) const ALLOW_EPHEMERAL: Toggle<bool> = Toggle {
    name: ALLOW_EPHEMERAL_ENV,
    expected: "1|0|true|false|yes|no|on|off",
    parse: parse_bool,
    fallback: false,
};

/// `SameSite` policy; development defaults to `Lax`, production to `Strict`.
pub(super) fn same_site(mode: BuildMode) -> Toggle<SameSite> {
    Toggle {
        name: SAMESITE_ENV,
        expected: "Strict|Lax|None",
        parse: parse_same_site,
        fallback: if mode.is_debug() {
            SameSite::Lax
        } else {
            SameSite::Strict
        },
    }
}

impl<T: Copy + fmt::Debug> Toggle<T> {
    /// Read the toggle from `env`.
    ///
    /// # Errors
    /// In release mode, a missing or unparsable value.
    pub(super) fn read<E: SessionEnv>(
        &self,
        env: &E,
        mode: BuildMode,
    ) -> Result<T, SessionConfigError> {
        let Some(raw) = env.string(self.name) else {
            return self.fall_back(mode, SessionConfigError::MissingEnv { name: self.name });
        };
        match (self.parse)(&raw) {
            Some(value) => Ok(value),
            None => self.fall_back(
                mode,
                SessionConfigError::InvalidEnv {
                    name: self.name,
                    value: raw,
                    expected: self.expected,
                },
            ),
        }
    }

    fn fall_back(
        &self,
        mode: BuildMode,
        error: SessionConfigError,
    ) -> Result<T, SessionConfigError> {
        if !mode.is_debug() {
            return Err(error);
        }
        warn!(
            toggle = self.name,
            fallback = ?self.fallback,
            reason = %error,
            "session toggle defaulted (dev only)"
        );
        Ok(self.fallback)
    }
}

/// Reject combinations browsers or production would not accept.
///
/// `SameSite=None` needs a `Secure` cookie, and release builds never run on
/// a generated key. Debug builds only warn about the former.
///
/// # Errors
/// [`SessionConfigError::InsecureSameSiteNone`] or
/// [`SessionConfigError::EphemeralNotAllowed`] in release mode.
pub(super) fn check_combination(
    mode: BuildMode,
    cookie_secure: bool,
    same_site: SameSite,
    allow_ephemeral: bool,
) -> Result<(), SessionConfigError> {
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    if same_site == SameSite::None && !cookie_secure {
        if !mode.is_debug() {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
        warn!("SameSite=None on an insecure cookie; browsers may drop the session");
    }
    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        "none" => Some(SameSite::None),
        _ => None,
    }
}
