//! Bearer-token authorization guard.
//!
//! [`require_auth`] is layered onto the protected route tree. It verifies the
//! `Authorization: Bearer <token>` header and stores an [`AuthUser`] in the
//! request extensions; handlers then take `AuthUser` as an extractor. The
//! guard never touches the database.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use warden_core::error::CoreError;
use warden_core::types::UserId;

use crate::auth::jwt::TokenIssuer;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated identity resolved from a verified bearer token.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    /// The user's identity (from the token's `id` claim).
    pub user_id: UserId,
}

/// Middleware that admits only requests carrying a valid bearer token.
///
/// On failure the request is answered with 401 and the inner handler is
/// never called.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(request.headers(), state.tokens.as_ref())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Resolve the caller's identity from the `Authorization` header.
pub fn authenticate(headers: &HeaderMap, tokens: &dyn TokenIssuer) -> Result<AuthUser, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let token = bearer_token(auth_header)
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

    let subject = tokens
        .verify(token)
        .map_err(|e| unauthorized(&e.to_string()))?;

    let user_id = subject
        .parse::<UserId>()
        .map_err(|_| unauthorized("Token subject is not a user id"))?;

    Ok(AuthUser { user_id })
}

/// Extract the token from a `Bearer <token>` header value. The scheme is
/// matched case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn unauthorized(reason: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(reason.to_string()))
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when `require_auth` ran for this route.
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| unauthorized("Route is not behind the authorization guard"))
    }
}
