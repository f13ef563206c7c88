//! PostgreSQL-backed [`CredentialStore`].

use async_trait::async_trait;
use warden_core::store::{CredentialStore, StoreError};
use warden_core::user::{NewUser, User};

use crate::repositories::user_repo::USERNAME_CONSTRAINT;
use crate::repositories::UserRepo;
use crate::DbPool;

/// PostgreSQL error code for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Credential store over the `users` table.
///
/// Username uniqueness is enforced by the `uq_users_username` constraint, so
/// concurrent registrations across service instances cannot both succeed.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: DbPool,
}

impl PgCredentialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        UserRepo::username_exists(&self.pool, username)
            .await
            .map_err(backend_error)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = UserRepo::find_by_username(&self.pool, username)
            .await
            .map_err(backend_error)?;
        Ok(row.map(User::from))
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        match UserRepo::create(&self.pool, &user).await {
            Ok(row) => Ok(row.into()),
            Err(err) if is_username_violation(&err) => {
                tracing::debug!(username = %user.username, "Username insert hit unique constraint");
                Err(StoreError::DuplicateUsername(user.username))
            }
            Err(err) => Err(backend_error(err)),
        }
    }
}

/// Whether a sqlx error is the unique violation on `users.username`.
fn is_username_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(USERNAME_CONSTRAINT)
        }
        _ => false,
    }
}

fn backend_error(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}
