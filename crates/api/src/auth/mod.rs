//! Authentication primitives.
//!
//! - [`password`] -- bcrypt password hashing and verification.
//! - [`jwt`] -- HS256 bearer-token issuance and verification.

pub mod jwt;
pub mod password;
