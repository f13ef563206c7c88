//! Request handlers.
//!
//! Handlers delegate to [`crate::services`] and map errors via
//! [`crate::error::AppError`].

pub mod account;
