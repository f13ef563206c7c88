//! Registration and login orchestration.
//!
//! [`AccountService`] combines a [`CredentialStore`], a [`PasswordHasher`] and
//! a [`TokenIssuer`]. Business outcomes (taken username, invalid login) come
//! back as typed [`CoreError`] values; infrastructure failures are wrapped as
//! [`CoreError::Internal`] with the cause attached for logging.

use std::sync::Arc;

use uuid::Uuid;
use warden_core::credentials::Credentials;
use warden_core::error::CoreError;
use warden_core::store::{CredentialStore, StoreError};
use warden_core::user::NewUser;

use crate::auth::jwt::TokenIssuer;
use crate::auth::password::PasswordHasher;

pub struct AccountService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Create an account for already-validated credentials.
    ///
    /// Fails with [`CoreError::UsernameTaken`] if the username exists, including
    /// when a concurrent registration wins the race between the existence check
    /// and the insert.
    pub async fn register(&self, credentials: Credentials) -> Result<(), CoreError> {
        let Credentials { username, password } = credentials;

        // 1. Reject taken usernames up front.
        let exists = self
            .store
            .username_exists(&username)
            .await
            .map_err(|e| CoreError::Internal(format!("Error checking username: {e}")))?;
        if exists {
            return Err(CoreError::UsernameTaken);
        }

        // 2. Assign identity and hash the password.
        let id = Uuid::new_v4();
        let password_hash = self.hash_password(password).await?;

        // 3. Persist. The store's uniqueness guarantee settles any race.
        let user = self
            .store
            .create(NewUser {
                id,
                username,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::DuplicateUsername(_) => CoreError::UsernameTaken,
                other => CoreError::Internal(format!("Error creating account: {other}")),
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "Account registered");
        Ok(())
    }

    /// Authenticate credentials and return a signed bearer token.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`CoreError::InvalidLogin`].
    pub async fn login(&self, credentials: Credentials) -> Result<String, CoreError> {
        let Credentials { username, password } = credentials;

        // 1. Find user by username.
        let user = self
            .store
            .find_by_username(&username)
            .await
            .map_err(|e| CoreError::Internal(format!("Error finding user: {e}")))?
            .ok_or_else(|| {
                tracing::debug!(username = %username, "Login for unknown username");
                CoreError::InvalidLogin
            })?;

        // 2. Verify password.
        if !self.verify_password(password, user.password_hash).await? {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(CoreError::InvalidLogin);
        }

        // 3. Issue token.
        let token = self
            .tokens
            .issue(&user.id.to_string())
            .map_err(|e| CoreError::Internal(format!("Token generation error: {e}")))?;

        tracing::info!(user_id = %user.id, "Login succeeded");
        Ok(token)
    }

    /// Run bcrypt on the blocking pool so it does not stall the executor.
    async fn hash_password(&self, password: String) -> Result<String, CoreError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CoreError::Internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| CoreError::Internal(format!("Error creating password: {e}")))
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, CoreError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| CoreError::Internal(format!("Password verification task failed: {e}")))?
            .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use warden_core::error::INVALID_LOGIN_MESSAGE;
    use warden_core::store::MemoryCredentialStore;
    use warden_core::user::User;

    use super::*;
    use crate::auth::jwt::{JwtConfig, JwtIssuer};
    use crate::auth::password::{BcryptHasher, MIN_BCRYPT_COST};

    fn issuer() -> Arc<JwtIssuer> {
        Arc::new(
            JwtIssuer::new(&JwtConfig {
                secret: "account-service-test-secret".to_string(),
                expiry_mins: 15,
            })
            .unwrap(),
        )
    }

    fn service_with(store: Arc<dyn CredentialStore>) -> AccountService {
        AccountService::new(
            store,
            Arc::new(BcryptHasher::new(MIN_BCRYPT_COST).unwrap()),
            issuer(),
        )
    }

    fn alice() -> Credentials {
        Credentials::new("alice123", "longenough1")
    }

    /// Store whose every call fails, standing in for an unreachable database.
    struct DownStore;

    #[async_trait]
    impl CredentialStore for DownStore {
        async fn username_exists(&self, _: &str) -> Result<bool, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
        async fn find_by_username(&self, _: &str) -> Result<Option<User>, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
        async fn create(&self, _: NewUser) -> Result<User, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
    }

    /// Store that misses the existence check but loses the insert race.
    struct RacingStore;

    #[async_trait]
    impl CredentialStore for RacingStore {
        async fn username_exists(&self, _: &str) -> Result<bool, StoreError> {
            Ok(false)
        }
        async fn find_by_username(&self, _: &str) -> Result<Option<User>, StoreError> {
            Ok(None)
        }
        async fn create(&self, user: NewUser) -> Result<User, StoreError> {
            Err(StoreError::DuplicateUsername(user.username))
        }
    }

    #[tokio::test]
    async fn register_stores_hashed_password() {
        let store = Arc::new(MemoryCredentialStore::new());
        let service = service_with(store.clone());

        service.register(alice()).await.unwrap();

        let user = store.find_by_username("alice123").await.unwrap().unwrap();
        assert_ne!(user.password_hash, "longenough1");
        assert!(user.password_hash.starts_with("$2b$"));
    }

    #[tokio::test]
    async fn register_twice_is_username_taken() {
        let store = Arc::new(MemoryCredentialStore::new());
        let service = service_with(store.clone());

        service.register(alice()).await.unwrap();
        let second = service.register(alice()).await;

        assert_matches!(second, Err(CoreError::UsernameTaken));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn register_race_surfaces_as_username_taken() {
        let service = service_with(Arc::new(RacingStore));
        assert_matches!(service.register(alice()).await, Err(CoreError::UsernameTaken));
    }

    #[tokio::test]
    async fn register_store_failure_is_internal() {
        let service = service_with(Arc::new(DownStore));
        assert_matches!(
            service.register(alice()).await,
            Err(CoreError::Internal(cause)) if cause.contains("connection refused")
        );
    }

    #[tokio::test]
    async fn login_returns_verifiable_token() {
        let store = Arc::new(MemoryCredentialStore::new());
        let tokens = issuer();
        let service = AccountService::new(
            store.clone(),
            Arc::new(BcryptHasher::new(MIN_BCRYPT_COST).unwrap()),
            tokens.clone(),
        );

        service.register(alice()).await.unwrap();
        let token = service.login(alice()).await.unwrap();
        assert!(!token.is_empty());

        let user = store.find_by_username("alice123").await.unwrap().unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), user.id.to_string());
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_are_indistinguishable() {
        let service = service_with(Arc::new(MemoryCredentialStore::new()));
        service.register(alice()).await.unwrap();

        let unknown = service
            .login(Credentials::new("nobody", "longenough1"))
            .await
            .unwrap_err();
        let wrong = service
            .login(Credentials::new("alice123", "wrongpassword"))
            .await
            .unwrap_err();

        assert_matches!(unknown, CoreError::InvalidLogin);
        assert_matches!(wrong, CoreError::InvalidLogin);
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(unknown.to_string(), INVALID_LOGIN_MESSAGE);
    }

    #[tokio::test]
    async fn login_store_failure_is_internal() {
        let service = service_with(Arc::new(DownStore));
        assert_matches!(service.login(alice()).await, Err(CoreError::Internal(_)));
    }

    #[tokio::test]
    async fn login_with_corrupt_hash_is_internal() {
        let store = Arc::new(MemoryCredentialStore::new());
        store
            .create(NewUser {
                id: Uuid::new_v4(),
                username: "broken".to_string(),
                password_hash: "not-a-bcrypt-hash".to_string(),
            })
            .await
            .unwrap();
        let service = service_with(store);

        assert_matches!(
            service.login(Credentials::new("broken", "longenough1")).await,
            Err(CoreError::Internal(_))
        );
    }
}
