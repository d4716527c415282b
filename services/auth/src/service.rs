//! Authentication service: login, token validation and the role gate

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{AuthError, AuthResult};
use crate::jwt::{Claims, JwtService};
use crate::models::{Role, User, UserChanges, UserSummary};
use crate::password::CredentialHasher;
use crate::repositories::UserStore;

/// Successful login result
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserSummary,
}

/// Authentication and user administration over a credential store
#[derive(Clone)]
pub struct AuthService {
    pub(crate) store: Arc<dyn UserStore>,
    pub(crate) jwt: JwtService,
    pub(crate) hasher: CredentialHasher,
    pub(crate) reserved_username: String,
}

impl AuthService {
    /// Create a new auth service.
    ///
    /// `reserved_username` names the bootstrap superadmin account that can
    /// never be deleted, renamed or demoted.
    pub fn new(
        store: Arc<dyn UserStore>,
        jwt: JwtService,
        hasher: CredentialHasher,
        reserved_username: impl Into<String>,
    ) -> Self {
        Self {
            store,
            jwt,
            hasher,
            reserved_username: reserved_username.into(),
        }
    }

    pub fn reserved_username(&self) -> &str {
        &self.reserved_username
    }

    /// Verify credentials and issue a session token
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<LoginOutcome> {
        info!("Login attempt for user: {}", username);

        let Some(user) = self.store.find_by_username(username).await? else {
            self.hasher.verify_unknown(password).await?;
            warn!("Login failed for user: {}", username);
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            warn!("Login failed for user: {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        if CredentialHasher::needs_rehash(&user.password_hash) {
            self.upgrade_hash(&user, password).await;
        }

        let token = self.jwt.issue_token(&user)?;
        info!("User {} logged in", user.username);

        Ok(LoginOutcome {
            token,
            user: user.summary(),
        })
    }

    /// Replace a legacy hash after a successful login. Failures only cost
    /// the upgrade, never the login.
    async fn upgrade_hash(&self, user: &User, password: &str) {
        let password_hash = match self.hasher.hash(password).await {
            Ok(hash) => hash,
            Err(e) => {
                warn!("Could not rehash password for {}: {}", user.username, e);
                return;
            }
        };

        let changes = UserChanges {
            password_hash: Some(password_hash),
            ..UserChanges::default()
        };
        match self.store.update(user.id, &changes).await {
            Ok(()) => info!("Upgraded password hash for {}", user.username),
            Err(e) => warn!("Could not store upgraded hash for {}: {}", user.username, e),
        }
    }

    /// Validate a bearer token
    pub fn authenticate(&self, token: &str) -> AuthResult<Claims> {
        self.jwt.validate_token(token)
    }

    /// Allow only superadmins through
    pub fn authorize_superadmin(&self, claims: &Claims) -> AuthResult<()> {
        if claims.role != Role::Superadmin {
            warn!("User {} denied superadmin access", claims.username);
            return Err(AuthError::Forbidden("Access denied".to_string()));
        }
        Ok(())
    }
}
