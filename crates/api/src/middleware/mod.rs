//! Authorization middleware.
//!
//! - [`auth::require_auth`] -- guard layered onto protected routes.
//! - [`auth::AuthUser`] -- typed identity the guard hands to handlers.

pub mod auth;
