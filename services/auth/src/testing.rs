//! In-memory credential store and service builder for tests

use argon2::Params;
use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::jwt::{JwtConfig, JwtService};
use crate::models::{Role, User, UserChanges};
use crate::password::CredentialHasher;
use crate::repositories::UserStore;
use crate::service::AuthService;

pub const RESERVED_USERNAME: &str = "root.admin";
pub const TEST_JWT_SECRET: &str = "test-secret";

/// Auth service over `store` with a cheap hashing cost
pub fn test_service(store: Arc<dyn UserStore>) -> AuthService {
    let jwt = JwtService::new(JwtConfig::new(TEST_JWT_SECRET)).expect("valid JWT config");
    let params = Params::new(8, 1, 1, None).expect("valid argon2 params");
    AuthService::new(
        store,
        jwt,
        CredentialHasher::with_params(params),
        RESERVED_USERNAME,
    )
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    next_id: i32,
}

/// Vec-backed `UserStore` that mimics the table's id sequence and unique username
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: Mutex<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.users.len()
    }

    pub async fn id_of(&self, username: &str) -> Option<i32> {
        self.inner
            .lock()
            .await
            .users
            .iter()
            .find(|user| user.username == username)
            .map(|user| user.id)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> DatabaseResult<Vec<User>> {
        let inner = self.inner.lock().await;
        let mut users = inner.users.clone();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn insert(
        &self,
        username: &str,
        name: &str,
        password_hash: &str,
        role: Role,
    ) -> DatabaseResult<User> {
        let mut inner = self.inner.lock().await;
        if inner.users.iter().any(|u| u.username == username) {
            return Err(DatabaseError::UniqueViolation("users_username_key".to_string()));
        }

        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            username: username.to_string(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: Some(Utc::now().naive_utc()),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: i32, changes: &UserChanges) -> DatabaseResult<()> {
        let mut inner = self.inner.lock().await;
        if let Some(username) = &changes.username {
            if inner
                .users
                .iter()
                .any(|u| u.id != id && &u.username == username)
            {
                return Err(DatabaseError::UniqueViolation("users_username_key".to_string()));
            }
        }

        if let Some(user) = inner.users.iter_mut().find(|u| u.id == id) {
            if let Some(username) = &changes.username {
                user.username = username.clone();
            }
            if let Some(name) = &changes.name {
                user.name = name.clone();
            }
            if let Some(hash) = &changes.password_hash {
                user.password_hash = hash.clone();
            }
            if let Some(role) = changes.role {
                user.role = role;
            }
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> DatabaseResult<()> {
        self.inner.lock().await.users.retain(|u| u.id != id);
        Ok(())
    }
}
