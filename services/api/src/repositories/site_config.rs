//! Config repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;
use tracing::info;

use super::ConfigStore;
use crate::models::ConfigKey;

#[derive(Clone)]
pub struct ConfigRepository {
    pool: PgPool,
}

impl ConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigStore for ConfigRepository {
    async fn get_all(&self) -> DatabaseResult<BTreeMap<String, String>> {
        let rows = sqlx::query("SELECT key, COALESCE(value, '') AS value FROM config")
            .fetch_all(&self.pool)
            .await?;

        let mut entries = BTreeMap::new();
        for row in &rows {
            let key: String = row.try_get("key")?;
            let value: String = row.try_get("value")?;
            entries.insert(key, value);
        }
        Ok(entries)
    }

    async fn upsert(&self, key: ConfigKey, value: &str) -> DatabaseResult<()> {
        info!("Setting config key {}", key.as_str());

        sqlx::query(
            r#"
            INSERT INTO config (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(key.as_str())
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
