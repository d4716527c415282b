//! Catalog service: vehicle listings with image normalization

use common::error::DatabaseError;
use media::MediaUploader;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::gallery::{migrate_row, normalize_images};
use crate::models::{
    ImageSet, NewVehicle, NewVehiclePayload, UsedVehicle, UsedVehiclePayload, VehicleKind,
};
use crate::repositories::VehicleStore;
use crate::seed::DEFAULT_CATALOG;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn VehicleStore>,
    uploader: Arc<dyn MediaUploader>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn VehicleStore>, uploader: Arc<dyn MediaUploader>) -> Self {
        Self { store, uploader }
    }

    pub async fn list_new(&self) -> CatalogResult<Vec<NewVehicle>> {
        Ok(self.store.list_new().await?)
    }

    pub async fn list_used(&self) -> CatalogResult<Vec<UsedVehicle>> {
        Ok(self.store.list_used().await?)
    }

    /// Create a 0km listing and return its id. Brand and name are required.
    pub async fn create_new(&self, payload: NewVehiclePayload) -> CatalogResult<i32> {
        let fields = &payload.fields;
        if is_blank(fields.brand.as_deref()) || is_blank(fields.name.as_deref()) {
            return Err(CatalogError::InvalidInput(
                "Brand and model are required".to_string(),
            ));
        }

        let images = normalize_images(self.uploader.as_ref(), &payload.media).await;
        Ok(self.store.insert_new(fields, &images).await?)
    }

    /// Overwrite the fields present in `payload`. A missing id is not an error.
    pub async fn update_new(&self, id: i32, payload: NewVehiclePayload) -> CatalogResult<()> {
        let fields = &payload.fields;
        if fields.brand.is_some() && is_blank(fields.brand.as_deref()) {
            return Err(CatalogError::InvalidInput("Brand cannot be blank".to_string()));
        }
        if fields.name.is_some() && is_blank(fields.name.as_deref()) {
            return Err(CatalogError::InvalidInput("Model cannot be blank".to_string()));
        }

        let images = if payload.media.is_present() {
            Some(normalize_images(self.uploader.as_ref(), &payload.media).await)
        } else {
            None
        };

        self.store.update_new(id, fields, images.as_ref()).await?;
        Ok(())
    }

    /// Create a used listing and return the stored record
    pub async fn create_used(&self, payload: UsedVehiclePayload) -> CatalogResult<UsedVehicle> {
        let images = normalize_images(self.uploader.as_ref(), &payload.media).await;
        Ok(self.store.insert_used(&payload.fields, &images).await?)
    }

    pub async fn update_used(&self, id: i32, payload: UsedVehiclePayload) -> CatalogResult<()> {
        let images = if payload.media.is_present() {
            Some(normalize_images(self.uploader.as_ref(), &payload.media).await)
        } else {
            None
        };

        self.store
            .update_used(id, &payload.fields, images.as_ref())
            .await?;
        Ok(())
    }

    /// Remove a listing. Deleting a missing id succeeds.
    pub async fn delete(&self, kind: VehicleKind, id: i32) -> CatalogResult<()> {
        self.store.delete(kind, id).await?;
        Ok(())
    }

    /// Move inline payloads still stored in either table to the media host.
    ///
    /// Returns the number of rows rewritten. Rows are handled one by one, so
    /// a failure part-way leaves earlier rows migrated.
    pub async fn migrate_inline_images(&self) -> CatalogResult<usize> {
        let mut migrated = 0;

        for kind in [VehicleKind::New, VehicleKind::Used] {
            for row in self.store.image_rows(kind).await? {
                let Some(images) = migrate_row(self.uploader.as_ref(), &row).await else {
                    continue;
                };

                self.store.rewrite_images(kind, row.id, &images).await?;
                migrated += 1;
                info!("Migrated images of {} row {}", kind.table(), row.id);
            }
        }

        info!("Image migration rewrote {} rows", migrated);
        Ok(migrated)
    }

    /// Insert the default 0km catalog when the table is empty.
    ///
    /// Returns the number of listings inserted.
    pub async fn seed_default_catalog(&self) -> CatalogResult<usize> {
        if self.store.count_new().await? > 0 {
            return Ok(0);
        }

        let no_images = ImageSet::default();
        for vehicle in DEFAULT_CATALOG {
            if let Err(e) = self.store.insert_new(&vehicle.fields(), &no_images).await {
                warn!("Stopped seeding at {} {}: {}", vehicle.brand, vehicle.name, e);
                return Err(e.into());
            }
        }

        info!("Inserted {} default vehicles", DEFAULT_CATALOG.len());
        Ok(DEFAULT_CATALOG.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageInput, ImageRow, NewVehicleFields, UsedVehicleFields};
    use crate::testing::InMemoryVehicleStore;
    use media::testing::{FakeUploader, inline_png};

    fn service(store: Arc<InMemoryVehicleStore>) -> CatalogService {
        CatalogService::new(store, Arc::new(FakeUploader::new()))
    }

    fn new_payload(brand: &str, name: &str) -> NewVehiclePayload {
        NewVehiclePayload {
            fields: NewVehicleFields {
                brand: Some(brand.to_string()),
                name: Some(name.to_string()),
                ..Default::default()
            },
            media: ImageInput::default(),
        }
    }

    fn used_payload(model: &str) -> UsedVehiclePayload {
        UsedVehiclePayload {
            fields: UsedVehicleFields {
                brand: Some("ford".to_string()),
                model: Some(model.to_string()),
                ..Default::default()
            },
            media: ImageInput::default(),
        }
    }

    #[tokio::test]
    async fn test_create_new_requires_brand_and_name() {
        let store = Arc::new(InMemoryVehicleStore::new());
        let catalog = service(store.clone());

        let missing = catalog.create_new(new_payload("fiat", "  ")).await;
        assert!(matches!(missing, Err(CatalogError::InvalidInput(_))));

        let no_brand = NewVehiclePayload::default();
        assert!(matches!(
            catalog.create_new(no_brand).await,
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(catalog.list_new().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_orders() {
        let store = Arc::new(InMemoryVehicleStore::new());
        let catalog = service(store.clone());

        let a = catalog.create_new(new_payload("fiat", "A")).await.unwrap();
        let b = catalog.create_new(new_payload("fiat", "B")).await.unwrap();
        let new_ids: Vec<i32> = catalog.list_new().await.unwrap().iter().map(|v| v.id).collect();
        assert_eq!(new_ids, vec![a, b]);

        let a = catalog.create_used(used_payload("A")).await.unwrap();
        let b = catalog.create_used(used_payload("B")).await.unwrap();
        let used_ids: Vec<i32> = catalog.list_used().await.unwrap().iter().map(|v| v.id).collect();
        assert_eq!(used_ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn test_update_without_image_fields_keeps_images() {
        let store = Arc::new(InMemoryVehicleStore::new());
        let catalog = service(store.clone());

        let mut payload = new_payload("fiat", "Cronos");
        payload.media.images = Some(vec!["https://cdn.example.com/a.jpg".to_string()]);
        let id = catalog.create_new(payload).await.unwrap();

        let update = NewVehiclePayload {
            fields: NewVehicleFields {
                price: Some("$1".to_string()),
                description: Some(String::new()),
                ..Default::default()
            },
            media: ImageInput::default(),
        };
        catalog.update_new(id, update).await.unwrap();

        let vehicle = &catalog.list_new().await.unwrap()[0];
        assert_eq!(vehicle.price.as_deref(), Some("$1"));
        assert_eq!(vehicle.description.as_deref(), Some(""));
        assert_eq!(vehicle.name, "Cronos");
        assert_eq!(vehicle.image.as_deref(), Some("https://cdn.example.com/a.jpg"));
        assert_eq!(vehicle.images.len(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let store = Arc::new(InMemoryVehicleStore::new());
        let catalog = service(store.clone());
        let id = catalog.create_new(new_payload("fiat", "Cronos")).await.unwrap();

        let update = NewVehiclePayload {
            fields: NewVehicleFields {
                name: Some(" ".to_string()),
                ..Default::default()
            },
            media: ImageInput::default(),
        };

        assert!(matches!(
            catalog.update_new(id, update).await,
            Err(CatalogError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_update_clears_images_when_sent_empty() {
        let store = Arc::new(InMemoryVehicleStore::new());
        let catalog = service(store.clone());

        let mut payload = used_payload("Focus");
        payload.media.image = Some("https://cdn.example.com/a.jpg".to_string());
        let vehicle = catalog.create_used(payload).await.unwrap();
        assert_eq!(vehicle.image.as_deref(), Some("https://cdn.example.com/a.jpg"));

        let update = UsedVehiclePayload {
            fields: UsedVehicleFields::default(),
            media: ImageInput {
                image: Some(String::new()),
                images: Some(Vec::new()),
            },
        };
        catalog.update_used(vehicle.id, update).await.unwrap();

        let stored = &catalog.list_used().await.unwrap()[0];
        assert!(stored.image.is_none());
        assert!(stored.images.is_empty());
        assert_eq!(stored.model, "Focus");
    }

    #[tokio::test]
    async fn test_used_vehicle_without_brand_is_stored_blank() {
        let store = Arc::new(InMemoryVehicleStore::new());
        let catalog = service(store.clone());

        let vehicle = catalog
            .create_used(UsedVehiclePayload::default())
            .await
            .unwrap();

        assert_eq!(vehicle.brand, "");
        assert_eq!(vehicle.model, "");
    }

    #[tokio::test]
    async fn test_delete_missing_vehicle_is_noop() {
        let store = Arc::new(InMemoryVehicleStore::new());
        let catalog = service(store.clone());
        catalog.create_new(new_payload("fiat", "Cronos")).await.unwrap();
        let before = catalog.list_new().await.unwrap();

        catalog.delete(VehicleKind::New, 999).await.unwrap();
        catalog.delete(VehicleKind::Used, 999).await.unwrap();

        assert_eq!(catalog.list_new().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_migration_is_idempotent() {
        let store = Arc::new(InMemoryVehicleStore::new());
        let uploader = Arc::new(FakeUploader::new());
        let catalog = CatalogService::new(store.clone(), uploader.clone());

        store
            .put_images(
                VehicleKind::New,
                ImageRow {
                    id: 0,
                    image: Some(inline_png("cover")),
                    images: vec![inline_png("cover"), "https://cdn.example.com/b.jpg".to_string()],
                },
            )
            .await;
        store
            .put_images(
                VehicleKind::Used,
                ImageRow {
                    id: 0,
                    image: Some(inline_png("used")),
                    images: Vec::new(),
                },
            )
            .await;
        store
            .put_images(
                VehicleKind::Used,
                ImageRow {
                    id: 0,
                    image: Some("https://cdn.example.com/hosted.jpg".to_string()),
                    images: Vec::new(),
                },
            )
            .await;

        assert_eq!(catalog.migrate_inline_images().await.unwrap(), 2);
        assert_eq!(catalog.migrate_inline_images().await.unwrap(), 0);
        assert_eq!(uploader.upload_count(), 2);

        let new = &catalog.list_new().await.unwrap()[0];
        assert_eq!(new.image.as_deref(), Some("https://media.test/1.png"));
        assert_eq!(new.images[1], "https://cdn.example.com/b.jpg");
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let store = Arc::new(InMemoryVehicleStore::new());
        let catalog = service(store.clone());

        assert_eq!(
            catalog.seed_default_catalog().await.unwrap(),
            DEFAULT_CATALOG.len()
        );
        assert_eq!(catalog.seed_default_catalog().await.unwrap(), 0);
        assert_eq!(catalog.list_new().await.unwrap().len(), DEFAULT_CATALOG.len());
    }
}
