//! JWT service for session token generation and validation
//!
//! Tokens are HS256-signed with a shared secret and carry the public user
//! summary, so protected requests never need a database round-trip.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::error::{AuthError, AuthResult};
use crate::models::{Role, User, UserSummary};

/// Session lifetime: 24 hours
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Shared HMAC secret used to sign and verify tokens
    pub secret: String,
    /// Token lifetime in seconds (default: 24 hours)
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

fn default_token_ttl() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: i32,
    pub username: String,
    /// Display name
    pub name: String,
    pub role: Role,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

impl Claims {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> AuthResult<Self> {
        if config.secret.is_empty() {
            return Err(AuthError::Internal(
                "JWT secret must not be empty".to_string(),
            ));
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Ok(JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        })
    }

    /// Issue a session token for a user
    pub fn issue_token(&self, user: &User) -> AuthResult<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AuthError::Internal(format!("Failed to get current time: {}", e)))?
            .as_secs();

        self.issue_token_at(user, now)
    }

    fn issue_token_at(&self, user: &User, issued_at: u64) -> AuthResult<String> {
        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role,
            iat: issued_at,
            exp: issued_at + self.config.token_ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Validate a token and return the claims.
    ///
    /// Every failure collapses into `Unauthorized`; the reason only goes to
    /// the debug log.
    pub fn validate_token(&self, token: &str) -> AuthResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                AuthError::Unauthorized
            })
    }

    /// Get the token lifetime in seconds
    pub fn token_ttl(&self) -> u64 {
        self.config.token_ttl_secs
    }
}
