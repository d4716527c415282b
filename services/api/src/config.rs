//! Service settings
//!
//! Built once at startup from environment variables: `APP_<SECTION>__<KEY>`
//! (e.g. `APP_SERVER__PORT`, `APP_MEDIA__BUCKET`) plus the conventional
//! `DATABASE_URL`, `PORT` and `JWT_SECRET`, which take precedence.

use ::config::{Config, ConfigError, Environment};
use auth::JwtConfig;
use common::database::DatabaseConfig;
use media::MediaConfig;
use serde::Deserialize;
use std::env;

use crate::payments::PaymentsConfig;

/// Default request body cap: 50 MiB, enough for a gallery of inline images
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            request_timeout_secs: 120,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The reserved superadmin account created on first boot
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub superadmin_username: String,
    pub superadmin_name: String,
    /// Only needed while the account does not exist yet
    pub superadmin_password: Option<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            superadmin_username: "superadmin".to_string(),
            superadmin_name: "Super Admin".to_string(),
            superadmin_password: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub payments: PaymentsConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("jwt.secret", env::var("JWT_SECRET").ok())?
            .build()?
            .try_deserialize()
    }
}
