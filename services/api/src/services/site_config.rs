//! Site configuration service

use common::error::DatabaseResult;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::ConfigUpdate;
use crate::repositories::ConfigStore;

#[derive(Clone)]
pub struct ConfigService {
    store: Arc<dyn ConfigStore>,
}

impl ConfigService {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Stored entries only, no defaults
    pub async fn get_all(&self) -> DatabaseResult<BTreeMap<String, String>> {
        self.store.get_all().await
    }

    /// Upsert each recognized key present with a non-empty value.
    /// Returns the number of keys written.
    pub async fn set_recognized(&self, update: &ConfigUpdate) -> DatabaseResult<usize> {
        let entries = update.entries();
        for (key, value) in &entries {
            self.store.upsert(*key, value).await?;
        }
        Ok(entries.len())
    }
}
