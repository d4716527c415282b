//! Staff account administration. Callers must already hold a superadmin token.

use common::error::DatabaseError;
use tracing::{info, warn};

use crate::error::{AuthError, AuthResult};
use crate::models::{NewUser, PublicUser, Role, UpdateUser, UserChanges};
use crate::service::AuthService;

fn conflict_on_duplicate(err: DatabaseError) -> AuthError {
    match err {
        DatabaseError::UniqueViolation(_) => AuthError::Conflict("User already exists".to_string()),
        other => AuthError::Database(other),
    }
}

impl AuthService {
    /// All users ordered by id, without password hashes
    pub async fn list_users(&self) -> AuthResult<Vec<PublicUser>> {
        let users = self.store.list().await?;
        Ok(users.iter().map(|user| user.public()).collect())
    }

    pub async fn create_user(&self, new_user: NewUser) -> AuthResult<PublicUser> {
        let password_hash = self.hasher.hash(&new_user.password).await?;
        let role = new_user.role.unwrap_or_default();

        let user = self
            .store
            .insert(&new_user.username, &new_user.name, &password_hash, role)
            .await
            .map_err(conflict_on_duplicate)?;

        info!("Created user {} with role {}", user.username, user.role);
        Ok(user.public())
    }

    /// Overwrite the supplied fields of a user.
    ///
    /// Supplied strings overwrite even when empty. An empty password is
    /// treated as "keep the current one".
    pub async fn update_user(&self, id: i32, update: UpdateUser) -> AuthResult<()> {
        if let Some(target) = self.store.find_by_id(id).await? {
            if target.username == self.reserved_username {
                let renamed = update
                    .username
                    .as_deref()
                    .is_some_and(|username| username != self.reserved_username);
                let demoted = update.role.is_some_and(|role| role != Role::Superadmin);
                if renamed || demoted {
                    warn!("Refused to rename or demote the reserved superadmin");
                    return Err(AuthError::Forbidden(
                        "The main superadmin cannot be renamed or demoted".to_string(),
                    ));
                }
            }
        }

        let password_hash = match update.password.as_deref() {
            Some(password) if !password.is_empty() => Some(self.hasher.hash(password).await?),
            _ => None,
        };

        let changes = UserChanges {
            username: update.username,
            name: update.name,
            password_hash,
            role: update.role,
        };

        self.store
            .update(id, &changes)
            .await
            .map_err(conflict_on_duplicate)
    }

    pub async fn delete_user(&self, id: i32) -> AuthResult<()> {
        if let Some(target) = self.store.find_by_id(id).await? {
            if target.username == self.reserved_username {
                warn!("Refused to delete the reserved superadmin");
                return Err(AuthError::Forbidden(
                    "The main superadmin cannot be deleted".to_string(),
                ));
            }
        }

        self.store.delete(id).await?;
        info!("Deleted user {}", id);
        Ok(())
    }

    /// Create the reserved superadmin on first boot.
    ///
    /// Returns `true` when the account was created.
    pub async fn seed_superadmin(&self, name: &str, password: Option<&str>) -> AuthResult<bool> {
        if let Some(existing) = self.store.find_by_username(&self.reserved_username).await? {
            if existing.role != Role::Superadmin {
                warn!(
                    "Reserved account {} has role {}",
                    existing.username, existing.role
                );
            }
            return Ok(false);
        }

        let Some(password) = password.filter(|p| !p.is_empty()) else {
            return Err(AuthError::Internal(format!(
                "Superadmin {} does not exist and no bootstrap password is configured",
                self.reserved_username
            )));
        };

        let password_hash = self.hasher.hash(password).await?;
        self.store
            .insert(&self.reserved_username, name, &password_hash, Role::Superadmin)
            .await?;

        info!("Superadmin {} created", self.reserved_username);
        Ok(true)
    }
}
