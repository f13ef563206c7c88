//! Request body extractors.

use axum::extract::{FromRequest, Request};
use axum::Json;
use warden_core::credentials::{validate_credentials, Credentials};

use crate::error::AppError;

/// A `{ username, password }` body that parsed and passed the credential rules.
///
/// Rejects with `BIND_ERROR` when the body is not the expected JSON shape and
/// with `VALIDATION` (listing every violation) when a rule fails. Registration
/// and login both use it.
#[derive(Debug)]
pub struct ValidCredentials(pub Credentials);

impl<S> FromRequest<S> for ValidCredentials
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(credentials) = Json::<Credentials>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Bind(rejection.body_text()))?;

        let credentials = validate_credentials(credentials)?;
        Ok(Self(credentials))
    }
}
