use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use warden_core::error::{CoreError, SERVER_ERROR_MESSAGE, VALIDATION_MESSAGE};

/// Client-facing message for a request body that cannot be parsed.
pub const BIND_ERROR_MESSAGE: &str = "Error processing request.";

/// Client-facing message for any rejected bearer token.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `warden_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body could not be parsed into the expected shape.
    #[error("Malformed payload: {0}")]
    Bind(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
///
/// `name` is a stable machine-readable tag; `validation` is present only for
/// validation failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub name: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<Vec<String>>,
}

impl ErrorBody {
    fn new(status: StatusCode, name: &'static str, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            name,
            message: message.into(),
            validation: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(violations) => {
                    let mut body = ErrorBody::new(
                        StatusCode::BAD_REQUEST,
                        "VALIDATION",
                        VALIDATION_MESSAGE,
                    );
                    body.validation = Some(violations);
                    body
                }
                err @ CoreError::UsernameTaken => {
                    ErrorBody::new(StatusCode::BAD_REQUEST, "USERNAME_TAKEN", err.to_string())
                }
                err @ CoreError::InvalidLogin => {
                    ErrorBody::new(StatusCode::BAD_REQUEST, "INVALID_LOGIN", err.to_string())
                }
                CoreError::Unauthorized(reason) => {
                    tracing::debug!(reason = %reason, "Rejected unauthenticated request");
                    ErrorBody::new(
                        StatusCode::UNAUTHORIZED,
                        "UNAUTHORIZED",
                        UNAUTHORIZED_MESSAGE,
                    )
                }
                CoreError::Internal(msg) => server_error(&msg),
            },

            // --- HTTP-specific errors ---
            AppError::Bind(detail) => {
                tracing::debug!(error = %detail, "Rejected malformed request body");
                ErrorBody::new(StatusCode::BAD_REQUEST, "BIND_ERROR", BIND_ERROR_MESSAGE)
            }
        };

        let status =
            StatusCode::from_u16(body.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(body)).into_response()
    }
}

/// Log the cause and build the sanitized 500 body.
fn server_error(cause: &str) -> ErrorBody {
    tracing::error!(error = %cause, "Internal error");
    ErrorBody::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "SERVER_ERROR",
        SERVER_ERROR_MESSAGE,
    )
}
