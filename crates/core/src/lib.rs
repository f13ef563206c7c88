//! Domain types for the warden account service.
//!
//! Everything here is free of HTTP and database concerns: the error taxonomy,
//! the shared credential rules, the user record, and the [`store::CredentialStore`]
//! boundary that persistence backends implement.

pub mod credentials;
pub mod error;
pub mod store;
pub mod types;
pub mod user;
