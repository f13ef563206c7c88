use std::sync::Arc;

use warden_core::store::CredentialStore;

use crate::auth::jwt::{JwtIssuer, TokenError, TokenIssuer};
use crate::auth::password::{BcryptHasher, HashError};
use crate::config::ServerConfig;
use crate::services::AccountService;

/// Failure assembling [`AppState`] from configuration.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Nothing in it is
/// mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Registration and login.
    pub accounts: Arc<AccountService>,
    /// Token verification for the authorization guard.
    pub tokens: Arc<dyn TokenIssuer>,
}

impl AppState {
    /// Wire the account service from configuration and a credential store.
    pub fn new(config: ServerConfig, store: Arc<dyn CredentialStore>) -> Result<Self, StateError> {
        let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtIssuer::new(&config.jwt)?);
        let hasher = Arc::new(BcryptHasher::new(config.bcrypt_cost)?);
        let accounts = Arc::new(AccountService::new(store, hasher, Arc::clone(&tokens)));

        Ok(Self {
            config: Arc::new(config),
            accounts,
            tokens,
        })
    }
}
