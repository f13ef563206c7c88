//! Credential store boundary.
//!
//! The account service talks to persistence only through [`CredentialStore`].
//! `warden_db::PgCredentialStore` is the production backend;
//! [`MemoryCredentialStore`] keeps users in process and backs tests and
//! database-less local runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::user::{NewUser, User};

/// Failure reported by a credential store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store's uniqueness guarantee rejected the write.
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// The backend could not complete the operation.
    #[error("Credential store failure: {0}")]
    Backend(String),
}

/// Persistence of user records, keyed by username.
///
/// Implementations must enforce username uniqueness on [`create`](Self::create)
/// themselves and report a lost race as [`StoreError::DuplicateUsername`],
/// never as a silent overwrite.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Whether a user with exactly this username exists.
    async fn username_exists(&self, username: &str) -> Result<bool, StoreError>;

    /// Find a user by username (case-sensitive).
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user, returning the stored record.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Process-local credential store.
///
/// The uniqueness check and the insert happen under one write lock, so two
/// concurrent registrations of the same username cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.users.read().await.contains_key(username))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(StoreError::DuplicateUsername(user.username));
        }

        let record = User {
            id: user.id,
            username: user.username,
            password_hash: user.password_hash,
            created_at: chrono::Utc::now(),
        };
        users.insert(record.username.clone(), record.clone());
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use uuid::Uuid;

    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: "$2b$04$hash".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_find() {
        let store = MemoryCredentialStore::new();
        let input = new_user("alice123");
        let id = input.id;

        store.create(input).await.unwrap();

        assert!(store.username_exists("alice123").await.unwrap());
        let found = store.find_by_username("alice123").await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.password_hash, "$2b$04$hash");
    }

    #[tokio::test]
    async fn lookups_are_case_sensitive() {
        let store = MemoryCredentialStore::new();
        store.create(new_user("Alice")).await.unwrap();

        assert!(!store.username_exists("alice").await.unwrap());
        assert!(store.find_by_username("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryCredentialStore::new();
        store.create(new_user("alice123")).await.unwrap();

        let result = store.create(new_user("alice123")).await;
        assert_matches!(result, Err(StoreError::DuplicateUsername(name)) if name == "alice123");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_creates_admit_exactly_one() {
        let store = Arc::new(MemoryCredentialStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(new_user("racer")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.len().await, 1);
    }
}
