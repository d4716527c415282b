//! Error types for authentication and user administration

use common::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. The two are never told apart.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Missing, malformed, badly signed or expired token
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("{0}")]
    Internal(String),
}

pub type AuthResult<T> = Result<T, AuthError>;
