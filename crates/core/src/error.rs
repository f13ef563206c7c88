/// Client-facing message for every infrastructure failure.
pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong";

/// Client-facing message for a rejected registration.
pub const USERNAME_TAKEN_MESSAGE: &str = "Username already exists";

/// Client-facing message for a failed login. Unknown usernames and wrong
/// passwords share it so the response never reveals which one it was.
pub const INVALID_LOGIN_MESSAGE: &str = "Your username or password is invalid.";

/// Client-facing message accompanying a list of validation violations.
pub const VALIDATION_MESSAGE: &str = "A validation error occurred.";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// One or more credential rules failed. Holds every violation, in rule order.
    #[error("A validation error occurred.")]
    Validation(Vec<String>),

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Your username or password is invalid.")]
    InvalidLogin,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Infrastructure failure. The payload is the wrapped cause and is only
    /// ever logged, never returned to a client.
    #[error("Internal error: {0}")]
    Internal(String),
}
