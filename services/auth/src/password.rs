//! Salted, adaptive password hashing
//!
//! New hashes are Argon2id. Accounts created before the migration to Argon2
//! carry bcrypt hashes (`$2a$`, `$2b$`, `$2y$`), which still verify and are
//! upgraded on the next successful login.
//!
//! Both algorithms are CPU-bound, so all work runs on the blocking pool
//! instead of a runtime worker thread.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use std::sync::{Arc, OnceLock};
use tokio::task;
use tracing::warn;

use crate::error::{AuthError, AuthResult};

const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

/// Password hashed once per hasher and checked on logins for unknown users
const DUMMY_PASSWORD: &str = "unknown-user-placeholder";

fn is_bcrypt(stored_hash: &str) -> bool {
    BCRYPT_PREFIXES
        .iter()
        .any(|prefix| stored_hash.starts_with(prefix))
}

fn argon2(params: &Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone())
}

fn hash_blocking(params: &Params, password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    argon2(params)
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("Failed to hash password: {}", e)))
}

fn verify_blocking(params: &Params, password: &str, stored_hash: &str) -> bool {
    if is_bcrypt(stored_hash) {
        return bcrypt::verify(password, stored_hash).unwrap_or_else(|e| {
            warn!("Stored bcrypt hash could not be checked: {}", e);
            false
        });
    }

    let parsed_hash = match PasswordHash::new(stored_hash) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Stored password hash could not be parsed: {}", e);
            return false;
        }
    };

    argon2(params)
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

fn join_error(err: task::JoinError) -> AuthError {
    AuthError::Internal(format!("Password hashing task failed: {}", err))
}

/// Argon2id hasher with a configurable cost
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
    dummy_hash: Arc<OnceLock<String>>,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::with_params(Params::default())
    }
}

impl CredentialHasher {
    /// Create a hasher with explicit Argon2 cost parameters
    pub fn with_params(params: Params) -> Self {
        Self {
            params,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    /// Hash a password with a fresh random salt
    pub async fn hash(&self, password: &str) -> AuthResult<String> {
        let params = self.params.clone();
        let password = password.to_string();

        task::spawn_blocking(move || hash_blocking(&params, &password))
            .await
            .map_err(join_error)?
    }

    /// Verify a password against a stored hash.
    ///
    /// Argon2 cost parameters are read from the stored hash, so hashes made
    /// with an older cost keep verifying. A hash that cannot be parsed
    /// never matches.
    pub async fn verify(&self, password: &str, stored_hash: &str) -> AuthResult<bool> {
        let params = self.params.clone();
        let password = password.to_string();
        let stored_hash = stored_hash.to_string();

        task::spawn_blocking(move || verify_blocking(&params, &password, &stored_hash))
            .await
            .map_err(join_error)
    }

    /// Spend one verification on a login whose username does not exist,
    /// so that it costs as much as a wrong password.
    pub async fn verify_unknown(&self, password: &str) -> AuthResult<()> {
        let params = self.params.clone();
        let password = password.to_string();
        let dummy_hash = Arc::clone(&self.dummy_hash);

        task::spawn_blocking(move || -> AuthResult<()> {
            let stored_hash = match dummy_hash.get() {
                Some(hash) => hash,
                None => {
                    let hash = hash_blocking(&params, DUMMY_PASSWORD)?;
                    dummy_hash.get_or_init(|| hash)
                }
            };
            verify_blocking(&params, &password, stored_hash);
            Ok(())
        })
        .await
        .map_err(join_error)?
    }

    /// Whether a stored hash predates Argon2 and should be replaced
    pub fn needs_rehash(stored_hash: &str) -> bool {
        is_bcrypt(stored_hash)
    }

    #[cfg(test)]
    pub(crate) fn has_dummy_hash(&self) -> bool {
        self.dummy_hash.get().is_some()
    }
}
