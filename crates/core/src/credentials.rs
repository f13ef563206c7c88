//! Credential submission and the rule set shared by registration and login.
//!
//! Both request kinds carry the same `{ username, password }` shape and are
//! checked by [`validate_credentials`]. Every rule runs on every call so a
//! single response can report all violations at once.

use std::fmt;

use serde::Deserialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Rule constants
// ---------------------------------------------------------------------------

/// Minimum password length, in bytes of UTF-8.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum username length, in bytes of UTF-8.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Violation reported when the password is shorter than [`MIN_PASSWORD_LENGTH`].
pub const PASSWORD_TOO_SHORT: &str = "Password must be 8 characters";

/// Violation reported when the username is shorter than [`MIN_USERNAME_LENGTH`].
pub const USERNAME_TOO_SHORT: &str = "Username must be longer than 2 characters";

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// A username/password pair submitted for registration or login.
///
/// Lives for one request only. It is consumed by value by the account
/// service so the cleartext password is dropped with it.
///
/// A field missing from the body deserializes as empty and is then caught by
/// the length rules.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Collect every rule violation for a submission, password rule first.
///
/// Lengths are UTF-8 byte lengths. Returns an empty list when the
/// submission is acceptable.
pub fn credential_violations(credentials: &Credentials) -> Vec<String> {
    let mut violations = Vec::new();

    if credentials.password.len() < MIN_PASSWORD_LENGTH {
        violations.push(PASSWORD_TOO_SHORT.to_string());
    }

    if credentials.username.len() < MIN_USERNAME_LENGTH {
        violations.push(USERNAME_TOO_SHORT.to_string());
    }

    violations
}

/// Validate a submission, handing it back unchanged when every rule passes.
///
/// Values are not trimmed or case-folded; usernames are stored exactly as
/// submitted.
pub fn validate_credentials(credentials: Credentials) -> Result<Credentials, CoreError> {
    let violations = credential_violations(&credentials);
    if violations.is_empty() {
        Ok(credentials)
    } else {
        Err(CoreError::Validation(violations))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
