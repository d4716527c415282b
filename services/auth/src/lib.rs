//! Authentication for the dealership backend
//!
//! Staff accounts, password hashing, session tokens and the superadmin
//! role gate. The HTTP layer lives in the api service; this crate only
//! exposes the domain operations and the credential store.

pub mod admin;
pub mod error;
pub mod jwt;
pub mod models;
pub mod password;
pub mod repositories;
pub mod service;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{AuthError, AuthResult};
pub use jwt::{Claims, JwtConfig, JwtService};
pub use models::{NewUser, PublicUser, Role, UpdateUser, User, UserSummary};
pub use password::CredentialHasher;
pub use repositories::{UserRepository, UserStore};
pub use service::{AuthService, LoginOutcome};
