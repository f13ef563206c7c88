pub mod account;
pub mod health;

use axum::middleware;
use axum::Router;

use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /public/healthy                 liveness probe
/// /public/account/register        register
/// /public/account/login           login
///
/// /private/account/me             authenticated identity (requires auth)
/// ```
///
/// Everything under `/private` sits behind [`require_auth`].
pub fn api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .merge(health::router())
        .nest("/account", account::public_router());

    let private = Router::new()
        .nest("/account", account::private_router())
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .nest("/public", public)
        .nest("/private", private)
}
