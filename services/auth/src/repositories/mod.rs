//! Credential store

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{Role, User, UserChanges};

pub mod user;

pub use user::UserRepository;

/// Persistence operations the auth service needs from the credential store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Case-sensitive exact match on username
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>>;

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>>;

    /// All users ordered by id ascending
    async fn list(&self) -> DatabaseResult<Vec<User>>;

    /// Insert a user; a taken username yields `DatabaseError::UniqueViolation`
    async fn insert(
        &self,
        username: &str,
        name: &str,
        password_hash: &str,
        role: Role,
    ) -> DatabaseResult<User>;

    /// Apply the present fields of `changes`; a missing id is not an error
    async fn update(&self, id: i32, changes: &UserChanges) -> DatabaseResult<()>;

    /// Delete by id; a missing id is not an error
    async fn delete(&self, id: i32) -> DatabaseResult<()>;
}
