//! Route definitions for the `/account` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Public routes mounted at `/v1/public/account`.
///
/// ```text
/// POST /register -> register
/// POST /login    -> login
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(account::register))
        .route("/login", post(account::login))
}

/// Protected routes mounted at `/v1/private/account`.
///
/// ```text
/// GET /me -> me
/// ```
pub fn private_router() -> Router<AppState> {
    Router::new().route("/me", get(account::me))
}
