use axum::{routing::get, Router};

use crate::state::AppState;

/// GET /healthy -- liveness probe.
async fn healthy() -> &'static str {
    "healthy"
}

/// Mount the liveness probe (under `/v1/public`).
pub fn router() -> Router<AppState> {
    Router::new().route("/healthy", get(healthy))
}
