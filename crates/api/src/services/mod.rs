//! Business logic shared by the HTTP handlers.

pub mod account;

pub use account::AccountService;
