//! Handlers for the `/account` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use warden_core::types::UserId;

use crate::error::AppResult;
use crate::extract::ValidCredentials;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Identity of the authenticated caller.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: UserId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/public/account/register
///
/// Create an account. Returns 201 with an empty body.
pub async fn register(
    State(state): State<AppState>,
    ValidCredentials(credentials): ValidCredentials,
) -> AppResult<StatusCode> {
    state.accounts.register(credentials).await?;
    Ok(StatusCode::CREATED)
}

/// POST /v1/public/account/login
///
/// Authenticate with username + password. Returns a bearer token.
pub async fn login(
    State(state): State<AppState>,
    ValidCredentials(credentials): ValidCredentials,
) -> AppResult<Json<LoginResponse>> {
    let token = state.accounts.login(credentials).await?;
    Ok(Json(LoginResponse { token }))
}

/// GET /v1/private/account/me
///
/// Echo the identity carried by the caller's bearer token.
pub async fn me(user: AuthUser) -> Json<DataResponse<MeResponse>> {
    Json(DataResponse {
        data: MeResponse { id: user.user_id },
    })
}
