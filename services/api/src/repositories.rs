//! Repositories for database operations
//!
//! Services talk to the stores through these traits so they can run against
//! in-memory stores in tests.

use async_trait::async_trait;
use common::error::DatabaseResult;
use std::collections::BTreeMap;

use crate::models::{
    ConfigKey, ImageRow, ImageSet, NewVehicle, NewVehicleFields, UsedVehicle, UsedVehicleFields,
    VehicleKind,
};

pub mod site_config;
pub mod vehicle;

pub use site_config::ConfigRepository;
pub use vehicle::VehicleRepository;

/// Catalog storage for both listing kinds
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// New vehicles, id ascending
    async fn list_new(&self) -> DatabaseResult<Vec<NewVehicle>>;

    /// Used vehicles, id descending
    async fn list_used(&self) -> DatabaseResult<Vec<UsedVehicle>>;

    async fn count_new(&self) -> DatabaseResult<i64>;

    /// Insert a new vehicle and return its id
    async fn insert_new(&self, fields: &NewVehicleFields, images: &ImageSet) -> DatabaseResult<i32>;

    /// Overwrite the present fields. Image columns are written only when `images` is given.
    async fn update_new(
        &self,
        id: i32,
        fields: &NewVehicleFields,
        images: Option<&ImageSet>,
    ) -> DatabaseResult<()>;

    async fn insert_used(
        &self,
        fields: &UsedVehicleFields,
        images: &ImageSet,
    ) -> DatabaseResult<UsedVehicle>;

    async fn update_used(
        &self,
        id: i32,
        fields: &UsedVehicleFields,
        images: Option<&ImageSet>,
    ) -> DatabaseResult<()>;

    async fn delete(&self, kind: VehicleKind, id: i32) -> DatabaseResult<()>;

    /// Image columns of every row of one kind
    async fn image_rows(&self, kind: VehicleKind) -> DatabaseResult<Vec<ImageRow>>;

    async fn rewrite_images(
        &self,
        kind: VehicleKind,
        id: i32,
        images: &ImageSet,
    ) -> DatabaseResult<()>;
}

/// Key-value storage for site settings
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get_all(&self) -> DatabaseResult<BTreeMap<String, String>>;

    async fn upsert(&self, key: ConfigKey, value: &str) -> DatabaseResult<()>;
}
